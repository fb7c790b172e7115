use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /api/messages`.
///
/// `text` is kept as a raw JSON value so that a non-string `text` is reported
/// through the same validation path as a missing one.
#[derive(Debug, Default, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub text: Option<Value>,
}

impl CreateMessageRequest {
    /// The submitted text, if it is present and a JSON string.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }
}

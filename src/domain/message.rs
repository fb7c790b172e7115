use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Error text returned for every rejected message body.
pub const INVALID_TEXT_MESSAGE: &str = "Message text is required and must be a non-empty string.";

/// Stripped along with whitespace, matching how browsers trim input.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Fixed-width ISO-8601 UTC layout, e.g. `2024-05-01T09:30:00.123Z`.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// A stored board entry. Immutable once the store hands it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub timestamp: Timestamp,
}

/// Message body that has already been trimmed and checked for emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// Validates caller-supplied text.
    ///
    /// `None` stands for a missing, null or non-string value.
    ///
    /// # Errors
    /// Returns `AppError::InvalidInput` if the text is absent or blank after trimming.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(|r| r.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)) {
            Some(trimmed) if !trimmed.is_empty() => Ok(Self(trimmed.to_string())),
            _ => Err(AppError::InvalidInput(INVALID_TEXT_MESSAGE.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MessageText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Point in time encoded as a sortable UTC string.
///
/// The encoding is fixed width, so comparing the strings compares the instants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Captures the current wall-clock time.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if the clock reading cannot be formatted.
    pub fn now() -> Result<Self> {
        Self::from_datetime(OffsetDateTime::now_utc())
    }

    /// # Errors
    /// Returns `AppError::Internal` if the instant falls outside the four-digit year range.
    pub fn from_datetime(at: OffsetDateTime) -> Result<Self> {
        let utc = at.to_offset(time::UtcOffset::UTC);
        utc.format(TIMESTAMP_FORMAT).map(Self).map_err(|e| {
            tracing::error!(error = %e, "Failed to format timestamp");
            AppError::Internal
        })
    }

    /// Parses the stored representation back into an instant, if it is in the canonical layout.
    #[must_use]
    pub fn to_datetime(&self) -> Option<OffsetDateTime> {
        PrimitiveDateTime::parse(&self.0, TIMESTAMP_FORMAT).ok().map(PrimitiveDateTime::assume_utc)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

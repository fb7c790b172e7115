use crate::domain::message::{Message, Timestamp};

#[derive(Debug, sqlx::FromRow)]
pub struct MessageRecord {
    pub(crate) id: i64,
    pub(crate) text: String,
    pub(crate) timestamp: String,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self { id: record.id, text: record.text, timestamp: Timestamp::from(record.timestamp) }
    }
}

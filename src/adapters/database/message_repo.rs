use crate::adapters::database::records::MessageRecord;
use crate::domain::message::{Message, MessageText, Timestamp};
use crate::error::Result;
use sqlx::SqliteConnection;

#[derive(Clone, Debug, Default)]
pub struct MessageRepository {}

impl MessageRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Inserts a message and returns the row as stored.
    ///
    /// The id comes from the table's `AUTOINCREMENT` key.
    ///
    /// # Errors
    /// Returns `AppError::StoreUnavailable` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, text))]
    pub(crate) async fn create(
        &self,
        conn: &mut SqliteConnection,
        text: &MessageText,
        timestamp: &Timestamp,
    ) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r"
            INSERT INTO messages (text, timestamp)
            VALUES (?1, ?2)
            RETURNING id, text, timestamp
            ",
        )
        .bind(text.as_str())
        .bind(timestamp.as_str())
        .fetch_one(conn)
        .await?;

        Ok(record.into())
    }

    /// Fetches every message in insertion order.
    ///
    /// # Errors
    /// Returns `AppError::StoreUnavailable` if the query or any row decode fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn fetch_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Message>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r"
            SELECT id, text, timestamp
            FROM messages
            ORDER BY id ASC
            ",
        )
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Counts stored messages.
    ///
    /// # Errors
    /// Returns `AppError::StoreUnavailable` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn count(&self, conn: &mut SqliteConnection) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages").fetch_one(conn).await?;
        Ok(count)
    }
}

use crate::adapters::database::DbPool;
use crate::adapters::database::message_repo::MessageRepository;
use crate::domain::message::{Message, MessageText, Timestamp};
use crate::error::Result;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

/// Messages inserted into an empty board when seeding is enabled.
pub const WELCOME_MESSAGES: [&str; 2] = ["Hello, SQLite!", "これが最初のメッセージです。"];

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) appended_total: Counter<u64>,
    pub(crate) listed: Histogram<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("chatboard-server");
        Self {
            appended_total: meter
                .u64_counter("chatboard_messages_appended_total")
                .with_description("Total append attempts that reached the database")
                .build(),
            listed: meter
                .u64_histogram("chatboard_messages_listed")
                .with_description("Number of messages returned by a single list call")
                .build(),
        }
    }
}

/// The message store: an ordered, append-only collection of board messages.
///
/// Every operation acquires one pooled connection, uses it, and releases it when
/// the guard drops, whether the operation succeeded or not.
#[derive(Clone, Debug)]
pub struct MessageService {
    pool: DbPool,
    repo: MessageRepository,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(pool: DbPool, repo: MessageRepository) -> Self {
        Self { pool, repo, metrics: Metrics::new() }
    }

    /// Returns every stored message ordered by id.
    ///
    /// # Errors
    /// Returns `AppError::StoreUnavailable` if the database cannot be reached or read.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Message>> {
        let mut conn = self.pool.acquire().await?;
        let messages = self.repo.fetch_all(&mut conn).await?;

        self.metrics.listed.record(messages.len() as u64, &[]);
        tracing::debug!(count = messages.len(), "Messages retrieved");
        Ok(messages)
    }

    /// Validates, timestamps and stores a new message.
    ///
    /// `raw_text` is `None` when the caller supplied no usable string.
    ///
    /// # Errors
    /// Returns `AppError::InvalidInput` if the text is missing or blank; nothing is stored.
    /// Returns `AppError::StoreUnavailable` if the row cannot be committed.
    #[tracing::instrument(err(level = "warn"), skip(self, raw_text))]
    pub async fn append(&self, raw_text: Option<&str>) -> Result<Message> {
        let text = MessageText::parse(raw_text)?;
        let timestamp = Timestamp::now()?;

        let result = async {
            let mut conn = self.pool.acquire().await?;
            self.repo.create(&mut conn, &text, &timestamp).await
        }
        .await;

        match result {
            Ok(message) => {
                tracing::debug!(message_id = message.id, "Message stored");
                self.metrics.appended_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(message)
            }
            Err(e) => {
                self.metrics.appended_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e)
            }
        }
    }

    /// Number of stored messages.
    ///
    /// # Errors
    /// Returns `AppError::StoreUnavailable` if the database cannot be queried.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn count(&self) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;
        self.repo.count(&mut conn).await
    }

    /// Stores `texts` in order if, and only if, the board is empty.
    ///
    /// Returns how many messages were inserted.
    ///
    /// # Errors
    /// Returns `AppError::InvalidInput` if any text is blank; nothing is stored.
    /// Returns `AppError::StoreUnavailable` if the transaction fails.
    #[tracing::instrument(err(level = "warn"), skip(self, texts))]
    pub async fn seed_if_empty(&self, texts: &[&str]) -> Result<u64> {
        let texts = texts.iter().map(|t| MessageText::parse(Some(*t))).collect::<Result<Vec<_>>>()?;

        let mut tx = self.pool.begin().await?;
        if self.repo.count(&mut tx).await? > 0 {
            tracing::info!("Board already has messages, skipping seed");
            return Ok(0);
        }

        let mut inserted = 0;
        for text in &texts {
            let timestamp = Timestamp::now()?;
            self.repo.create(&mut tx, text, &timestamp).await?;
            inserted += 1;
        }
        tx.commit().await?;

        tracing::info!(inserted, "Seeded welcome messages");
        Ok(inserted)
    }
}

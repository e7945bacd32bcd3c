use std::sync::Arc;

use messagely_db::Database;
use messagely_types::{Message, ReadReceipt};
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::error::{RepoError, Result};
use crate::users::correspondent;

/// Lookups on single messages. Creating messages is not this crate's job.
pub struct MessageRepository<C = SystemClock> {
    db: Arc<Database>,
    clock: C,
}

impl MessageRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_clock(db, SystemClock)
    }
}

impl<C: Clock> MessageRepository<C> {
    pub fn with_clock(db: Arc<Database>, clock: C) -> Self {
        Self { db, clock }
    }

    /// The message with both parties' current profiles.
    pub fn get(&self, id: i64) -> Result<Message> {
        let row = self
            .db
            .get_message(id)?
            .ok_or_else(|| RepoError::message_not_found(id))?;

        Ok(Message {
            id: row.id,
            from_user: correspondent(row.from),
            to_user: correspondent(row.to),
            body: row.body,
            sent_at: row.sent_at,
            read_at: row.read_at,
        })
    }

    /// Stamp the read time. A message already read keeps its first read time.
    pub fn mark_read(&self, id: i64) -> Result<ReadReceipt> {
        let read_at = self
            .db
            .mark_message_read(id, self.clock.now())?
            .ok_or_else(|| RepoError::message_not_found(id))?;

        info!(id, "Marked message read");
        Ok(ReadReceipt { id, read_at })
    }
}

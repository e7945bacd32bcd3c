//! Database row types — these map directly to SQLite rows.
//! Distinct from messagely-types records to keep the DB layer independent.

use chrono::{DateTime, Utc};

pub struct UserRow {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub join_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

pub struct UserSummaryRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Public profile columns of one side of a message.
pub struct PartyRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// A message joined with the profile of the other party: the recipient for
/// outgoing messages, the sender for incoming ones.
pub struct CorrespondenceRow {
    pub id: i64,
    pub party: PartyRow,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

pub struct MessageRow {
    pub id: i64,
    pub from: PartyRow,
    pub to: PartyRow,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

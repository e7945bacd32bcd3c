//! Record types handed out by the messagely repositories.
//!
//! These are independent of the SQLite row layout in messagely-db.

pub mod models;

pub use models::{
    Correspondent, Message, NewUser, ReadReceipt, ReceivedMessage, SentMessage, User,
    UserProfile, UserSummary,
};

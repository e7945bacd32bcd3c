//! messagely core: user accounts and message lookups over messagely-db.
//!
//! Storage, password hashing and time are all injected, so every repository
//! can run against an in-memory database with a manual clock.

pub mod clock;
pub mod config;
pub mod error;
pub mod messages;
pub mod password;
pub mod users;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EmptyRelation, HashConfig, RepositoryOptions};
pub use error::{RepoError, Result};
pub use messages::MessageRepository;
pub use password::{Argon2Scheme, PasswordScheme};
pub use users::UserRepository;

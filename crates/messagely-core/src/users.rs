use std::sync::Arc;

use messagely_db::Database;
use messagely_db::models::{CorrespondenceRow, PartyRow, UserRow};
use messagely_types::{
    Correspondent, NewUser, ReceivedMessage, SentMessage, User, UserProfile, UserSummary,
};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::{EmptyRelation, RepositoryOptions};
use crate::error::{RepoError, Result};
use crate::password::{Argon2Scheme, PasswordScheme};

/// Registration, authentication and lookups over the `users` relation.
///
/// Holds no per-call state: every method is one round trip to the database
/// (two for an empty message listing under [`EmptyRelation::Empty`]).
pub struct UserRepository<S = Argon2Scheme, C = SystemClock> {
    db: Arc<Database>,
    scheme: S,
    clock: C,
    empty_relation: EmptyRelation,
}

impl UserRepository {
    /// Argon2id hashing and the system clock.
    pub fn new(db: Arc<Database>, options: RepositoryOptions) -> Result<Self> {
        Ok(Self::with_parts(
            db,
            Argon2Scheme::new(options.hash)?,
            SystemClock,
            options.empty_relation,
        ))
    }
}

impl<S: PasswordScheme, C: Clock> UserRepository<S, C> {
    pub fn with_parts(db: Arc<Database>, scheme: S, clock: C, empty_relation: EmptyRelation) -> Self {
        Self {
            db,
            scheme,
            clock,
            empty_relation,
        }
    }

    pub fn empty_relation(&self) -> EmptyRelation {
        self.empty_relation
    }

    // -- Credentials --

    /// Create a user. The password is hashed before anything touches storage;
    /// a taken username comes back as [`RepoError::ConstraintViolation`].
    pub fn register(&self, new_user: NewUser) -> Result<User> {
        let password = self.scheme.hash(&new_user.password)?;
        let now = self.clock.now();

        let row = UserRow {
            username: new_user.username,
            password,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone: new_user.phone,
            join_at: now,
            last_login_at: now,
        };
        self.db.insert_user(&row)?;

        info!(username = %row.username, "Registered user");
        Ok(User {
            username: row.username,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            join_at: row.join_at,
            last_login_at: row.last_login_at,
        })
    }

    /// `Ok(false)` for a wrong password and for an unknown username alike.
    /// Does not touch `last_login_at`; see [`Self::update_login_timestamp`].
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let Some(hash) = self.db.get_password_hash(username)? else {
            debug!(username, "Authentication failed: unknown user");
            return Ok(false);
        };

        let ok = self.scheme.verify(password, &hash)?;
        if !ok {
            debug!(username, "Authentication failed: password mismatch");
        }
        Ok(ok)
    }

    pub fn update_login_timestamp(&self, username: &str) -> Result<()> {
        let now = self.clock.now();
        if self.db.set_last_login(username, now)? == 0 {
            return Err(RepoError::user_not_found(username));
        }

        info!(username, "Updated last login");
        Ok(())
    }

    // -- Reads --

    pub fn all(&self) -> Result<Vec<UserSummary>> {
        let rows = self.db.list_users()?;

        Ok(rows
            .into_iter()
            .map(|r| UserSummary {
                username: r.username,
                first_name: r.first_name,
                last_name: r.last_name,
            })
            .collect())
    }

    pub fn get(&self, username: &str) -> Result<UserProfile> {
        let row = self
            .db
            .get_user(username)?
            .ok_or_else(|| RepoError::user_not_found(username))?;

        Ok(UserProfile {
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            join_at: row.join_at,
            last_login_at: row.last_login_at,
        })
    }

    // -- Message relations --

    /// Messages sent by `username`, with the recipient's profile as it reads now.
    pub fn messages_from(&self, username: &str) -> Result<Vec<SentMessage>> {
        let rows = self.db.get_messages_from(username)?;
        self.check_empty(username, &rows)?;

        Ok(rows
            .into_iter()
            .map(|r| SentMessage {
                id: r.id,
                to_user: correspondent(r.party),
                body: r.body,
                sent_at: r.sent_at,
                read_at: r.read_at,
            })
            .collect())
    }

    /// Messages received by `username`, with the sender's profile as it reads now.
    pub fn messages_to(&self, username: &str) -> Result<Vec<ReceivedMessage>> {
        let rows = self.db.get_messages_to(username)?;
        self.check_empty(username, &rows)?;

        Ok(rows
            .into_iter()
            .map(|r| ReceivedMessage {
                id: r.id,
                from_user: correspondent(r.party),
                body: r.body,
                sent_at: r.sent_at,
                read_at: r.read_at,
            })
            .collect())
    }

    fn check_empty(&self, username: &str, rows: &[CorrespondenceRow]) -> Result<()> {
        if !rows.is_empty() {
            return Ok(());
        }

        match self.empty_relation {
            EmptyRelation::NotFound => Err(RepoError::user_not_found(username)),
            EmptyRelation::Empty if self.db.user_exists(username)? => Ok(()),
            EmptyRelation::Empty => Err(RepoError::user_not_found(username)),
        }
    }
}

pub(crate) fn correspondent(party: PartyRow) -> Correspondent {
    Correspondent {
        username: party.username,
        first_name: party.first_name,
        last_name: party.last_name,
        phone: party.phone,
    }
}

use std::sync::Arc;

use chrono::Utc;
use messagely_core::{Argon2Scheme, EmptyRelation, HashConfig, ManualClock, UserRepository};
use messagely_db::Database;
use messagely_types::NewUser;

pub type TestRepo = UserRepository<Argon2Scheme, Arc<ManualClock>>;

pub struct Fixture {
    pub db: Arc<Database>,
    pub clock: Arc<ManualClock>,
    pub users: TestRepo,
}

/// In-memory database, manual clock, and a low-cost Argon2 configuration.
pub fn fixture(empty_relation: EmptyRelation) -> Fixture {
    let db = Arc::new(Database::open_in_memory().expect("open in-memory db"));
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let scheme = Argon2Scheme::new(HashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("argon2 params");

    let users = UserRepository::with_parts(db.clone(), scheme, clock.clone(), empty_relation);
    Fixture { db, clock, users }
}

pub fn new_user(username: &str, password: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: password.to_string(),
        first_name: format!("{}-first", username),
        last_name: format!("{}-last", username),
        phone: "+1 555 0100".to_string(),
    }
}

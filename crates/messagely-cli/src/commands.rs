use anyhow::{Result, bail};
use messagely_core::{Clock, MessageRepository, PasswordScheme, UserRepository};
use messagely_types::NewUser;
use serde_json::{Value, json};
use tracing::warn;

use crate::cli::Command;

/// Run one command and return its JSON result.
pub fn run<S, C, M>(
    command: Command,
    users: &UserRepository<S, C>,
    messages: &MessageRepository<M>,
) -> Result<Value>
where
    S: PasswordScheme,
    C: Clock,
    M: Clock,
{
    let value = match command {
        Command::Register {
            username,
            password,
            first_name,
            last_name,
            phone,
        } => serde_json::to_value(users.register(NewUser {
            username,
            password,
            first_name,
            last_name,
            phone,
        })?)?,

        Command::Login { username, password } => {
            if !users.authenticate(&username, &password)? {
                warn!(username = %username, "Login rejected");
                bail!("invalid username or password");
            }
            users.update_login_timestamp(&username)?;
            json!({ "username": username, "authenticated": true })
        }

        Command::Users => serde_json::to_value(users.all()?)?,
        Command::User { username } => serde_json::to_value(users.get(&username)?)?,
        Command::Sent { username } => serde_json::to_value(users.messages_from(&username)?)?,
        Command::Inbox { username } => serde_json::to_value(users.messages_to(&username)?)?,
        Command::Message { id } => serde_json::to_value(messages.get(id)?)?,
        Command::Read { id } => serde_json::to_value(messages.mark_read(id)?)?,
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use messagely_core::{Argon2Scheme, EmptyRelation, HashConfig, ManualClock};
    use messagely_db::Database;

    struct Harness {
        db: Arc<Database>,
        users: UserRepository<Argon2Scheme, Arc<ManualClock>>,
        messages: MessageRepository<Arc<ManualClock>>,
    }

    impl Harness {
        fn new() -> Self {
            let db = Arc::new(Database::open_in_memory().unwrap());
            let clock = Arc::new(ManualClock::new(Utc::now()));
            let scheme = Argon2Scheme::new(HashConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap();
            Self {
                users: UserRepository::with_parts(
                    db.clone(),
                    scheme,
                    clock.clone(),
                    EmptyRelation::Empty,
                ),
                messages: MessageRepository::with_clock(db.clone(), clock),
                db,
            }
        }

        fn run(&self, command: Command) -> Result<Value> {
            run(command, &self.users, &self.messages)
        }

        fn register(&self, username: &str) -> Value {
            self.run(Command::Register {
                username: username.into(),
                password: "hunter22".into(),
                first_name: "First".into(),
                last_name: "Last".into(),
                phone: "555-0100".into(),
            })
            .unwrap()
        }
    }

    #[test]
    fn register_output_hides_hash() {
        let h = Harness::new();
        let out = h.register("ada");
        assert_eq!(out["username"], "ada");
        assert!(out.get("password").is_none());
    }

    #[test]
    fn login_checks_password() {
        let h = Harness::new();
        h.register("ada");

        let ok = h
            .run(Command::Login {
                username: "ada".into(),
                password: "hunter22".into(),
            })
            .unwrap();
        assert_eq!(ok["authenticated"], true);

        assert!(
            h.run(Command::Login {
                username: "ada".into(),
                password: "wrong".into(),
            })
            .is_err()
        );
    }

    #[test]
    fn listing_and_messages() {
        let h = Harness::new();
        h.register("ada");
        h.register("bob");
        let id = h.db.insert_message("ada", "bob", "ping", Utc::now()).unwrap();

        let users = h.run(Command::Users).unwrap();
        assert_eq!(users.as_array().unwrap().len(), 2);

        let inbox = h.run(Command::Inbox { username: "bob".into() }).unwrap();
        assert_eq!(inbox[0]["from_user"]["username"], "ada");

        let read = h.run(Command::Read { id }).unwrap();
        assert_eq!(read["id"], id);

        let message = h.run(Command::Message { id }).unwrap();
        assert_eq!(message["body"], "ping");
        assert!(!message["read_at"].is_null());
    }

    #[test]
    fn unknown_user_surfaces_not_found() {
        let h = Harness::new();
        let err = h.run(Command::User { username: "ghost".into() }).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

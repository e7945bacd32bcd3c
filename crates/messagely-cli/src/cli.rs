use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// User accounts and direct messages over a local SQLite database
#[derive(Parser, Debug)]
#[command(name = "messagely")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides MESSAGELY_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a user account
    Register {
        username: String,
        #[arg(long, env = "MESSAGELY_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
    },

    /// Check credentials and record the login time
    Login {
        username: String,
        #[arg(long, env = "MESSAGELY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List every user
    Users,

    /// Show one user's profile
    User { username: String },

    /// Messages sent by a user
    Sent { username: String },

    /// Messages received by a user
    Inbox { username: String },

    /// Show a single message
    Message { id: i64 },

    /// Mark a message as read
    Read { id: i64 },
}

// Hand-written so passwords never reach log output.
impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Register {
                username,
                first_name,
                last_name,
                phone,
                ..
            } => f
                .debug_struct("Register")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .field("first_name", first_name)
                .field("last_name", last_name)
                .field("phone", phone)
                .finish(),
            Command::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Command::Users => f.write_str("Users"),
            Command::User { username } => f.debug_struct("User").field("username", username).finish(),
            Command::Sent { username } => f.debug_struct("Sent").field("username", username).finish(),
            Command::Inbox { username } => f.debug_struct("Inbox").field("username", username).finish(),
            Command::Message { id } => f.debug_struct("Message").field("id", id).finish(),
            Command::Read { id } => f.debug_struct("Read").field("id", id).finish(),
        }
    }
}

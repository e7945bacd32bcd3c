mod cli;
mod commands;
mod config;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use messagely_core::{MessageRepository, UserRepository};
use messagely_db::Database;

use crate::cli::Cli;
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries only JSON results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "messagely=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(db_path) = cli.db {
        config.db_path = db_path;
    }
    let db = Arc::new(Database::open(&config.db_path)?);
    let users = UserRepository::new(db.clone(), config.options)?;
    info!(
        db = %config.db_path.display(),
        empty_relation = %users.empty_relation(),
        "Starting messagely"
    );
    let messages = MessageRepository::new(db);

    let output = commands::run(cli.command, &users, &messages)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

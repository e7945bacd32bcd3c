use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use messagely_core::{EmptyRelation, HashConfig, RepositoryOptions};

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub options: RepositoryOptions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HashConfig::default();

        let db_path = lookup("MESSAGELY_DB_PATH").unwrap_or_else(|| "messagely.db".into());
        let hash = HashConfig {
            memory_kib: parse_or(&lookup, "MESSAGELY_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "MESSAGELY_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "MESSAGELY_HASH_PARALLELISM", defaults.parallelism)?,
        };
        let empty_relation = match lookup("MESSAGELY_EMPTY_MESSAGES") {
            Some(raw) => raw
                .parse::<EmptyRelation>()
                .map_err(anyhow::Error::msg)
                .context("MESSAGELY_EMPTY_MESSAGES")?,
            None => EmptyRelation::default(),
        };

        Ok(Self {
            db_path: PathBuf::from(db_path),
            options: RepositoryOptions {
                hash,
                empty_relation,
            },
        })
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: u32) -> Result<u32>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got '{}'", key, raw))?;
    if value == 0 {
        bail!("{} must be a positive integer, got '{}'", key, raw);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("messagely.db"));
        assert_eq!(config.options, RepositoryOptions::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("MESSAGELY_DB_PATH", "/tmp/m.db"),
            ("MESSAGELY_HASH_MEMORY_KIB", "4096"),
            ("MESSAGELY_HASH_ITERATIONS", "3"),
            ("MESSAGELY_EMPTY_MESSAGES", "not-found"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/m.db"));
        assert_eq!(config.options.hash.memory_kib, 4096);
        assert_eq!(config.options.hash.iterations, 3);
        assert_eq!(config.options.hash.parallelism, 1);
        assert_eq!(config.options.empty_relation, EmptyRelation::NotFound);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(config_from(&[("MESSAGELY_HASH_ITERATIONS", "lots")]).is_err());
        assert!(config_from(&[("MESSAGELY_EMPTY_MESSAGES", "maybe")]).is_err());
    }

    #[test]
    fn rejects_zero_work_factor() {
        let err = config_from(&[("MESSAGELY_HASH_PARALLELISM", "0")]).unwrap_err();
        assert!(err.to_string().contains("MESSAGELY_HASH_PARALLELISM"));
        assert!(config_from(&[("MESSAGELY_HASH_ITERATIONS", " 0 ")]).is_err());
    }
}

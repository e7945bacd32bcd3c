use std::fmt;
use std::str::FromStr;

use argon2::Params;

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// What `messages_from` / `messages_to` return when the join yields no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyRelation {
    /// An existing user with no messages gets an empty list; an unknown user is NotFound.
    #[default]
    Empty,
    /// Any empty join is NotFound, even for a user that exists.
    NotFound,
}

impl FromStr for EmptyRelation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(EmptyRelation::Empty),
            "not-found" | "not_found" | "notfound" => Ok(EmptyRelation::NotFound),
            other => Err(format!(
                "unknown empty-relation policy '{}', expected 'empty' or 'not-found'",
                other
            )),
        }
    }
}

impl fmt::Display for EmptyRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyRelation::Empty => f.write_str("empty"),
            EmptyRelation::NotFound => f.write_str("not-found"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryOptions {
    pub hash: HashConfig,
    pub empty_relation: EmptyRelation,
}

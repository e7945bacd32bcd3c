use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::{CorrespondenceRow, MessageRow, PartyRow, UserRow, UserSummaryRow};
use crate::{Database, Result};

impl Database {
    // -- Users --

    pub fn insert_user(&self, user: &UserRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password, first_name, last_name, phone, join_at, last_login_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    user.username,
                    user.password,
                    user.first_name,
                    user.last_name,
                    user.phone,
                    user.join_at,
                    user.last_login_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_password_hash(&self, username: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let hash = conn
                .query_row(
                    "SELECT password FROM users WHERE username = ?1",
                    [username],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(hash)
        })
    }

    /// Returns the number of rows touched: 0 when the username is unknown.
    pub fn set_last_login(&self, username: &str, at: DateTime<Utc>) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET last_login_at = ?2 WHERE username = ?1",
                rusqlite::params![username, at],
            )?;
            Ok(changed)
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserSummaryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT username, first_name, last_name FROM users ORDER BY username")?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(UserSummaryRow {
                        username: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn get_user(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, username))
    }

    pub fn user_exists(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
                [username],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    // -- Messages --

    /// Raw insert used for seeding and fixtures. Returns the generated id.
    pub fn insert_message(
        &self,
        from_username: &str,
        to_username: &str,
        body: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (from_username, to_username, body, sent_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![from_username, to_username, body, sent_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Messages sent by `username`, each joined with the recipient's current profile.
    pub fn get_messages_from(&self, username: &str) -> Result<Vec<CorrespondenceRow>> {
        self.with_conn(|conn| {
            query_correspondence(
                conn,
                "SELECT m.id, u.username, u.first_name, u.last_name, u.phone, m.body, m.sent_at, m.read_at
                 FROM messages m
                 JOIN users u ON m.to_username = u.username
                 WHERE m.from_username = ?1
                 ORDER BY m.id",
                username,
            )
        })
    }

    /// Messages received by `username`, each joined with the sender's current profile.
    pub fn get_messages_to(&self, username: &str) -> Result<Vec<CorrespondenceRow>> {
        self.with_conn(|conn| {
            query_correspondence(
                conn,
                "SELECT m.id, u.username, u.first_name, u.last_name, u.phone, m.body, m.sent_at, m.read_at
                 FROM messages m
                 JOIN users u ON m.from_username = u.username
                 WHERE m.to_username = ?1
                 ORDER BY m.id",
                username,
            )
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT m.id,
                            f.username, f.first_name, f.last_name, f.phone,
                            t.username, t.first_name, t.last_name, t.phone,
                            m.body, m.sent_at, m.read_at
                     FROM messages m
                     JOIN users f ON m.from_username = f.username
                     JOIN users t ON m.to_username = t.username
                     WHERE m.id = ?1",
                    [id],
                    |row| {
                        Ok(MessageRow {
                            id: row.get(0)?,
                            from: party_at(row, 1)?,
                            to: party_at(row, 5)?,
                            body: row.get(9)?,
                            sent_at: row.get(10)?,
                            read_at: row.get(11)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Stamp `read_at` unless already set. Returns the stored read time, or
    /// `None` when no message has this id.
    pub fn mark_message_read(&self, id: i64, at: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        self.with_conn(|conn| {
            let read_at = conn
                .query_row(
                    "UPDATE messages SET read_at = COALESCE(read_at, ?2) WHERE id = ?1 RETURNING read_at",
                    rusqlite::params![id, at],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(read_at)
        })
    }
}

fn query_user(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT username, password, first_name, last_name, phone, join_at, last_login_at
         FROM users WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                password: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                phone: row.get(4)?,
                join_at: row.get(5)?,
                last_login_at: row.get(6)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_correspondence(
    conn: &Connection,
    sql: &str,
    username: &str,
) -> Result<Vec<CorrespondenceRow>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map([username], |row| {
            Ok(CorrespondenceRow {
                id: row.get(0)?,
                party: party_at(row, 1)?,
                body: row.get(5)?,
                sent_at: row.get(6)?,
                read_at: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Read four consecutive profile columns starting at `start`.
fn party_at(row: &Row<'_>, start: usize) -> rusqlite::Result<PartyRow> {
    Ok(PartyRow {
        username: row.get(start)?,
        first_name: row.get(start + 1)?,
        last_name: row.get(start + 2)?,
        phone: row.get(start + 3)?,
    })
}

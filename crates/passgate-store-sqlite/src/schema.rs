//! SQL schema for the passgate SQLite store.
//!
//! The schema version lives in `PRAGMA user_version`. A stored value of `0`
//! means the file is fresh. [`ensure_schema`] and [`upgrade_schema`] are the
//! explicit create and upgrade steps; the store runs them inside a single
//! transaction while opening.

use passgate_core::{user::SeedAccount, version::SchemaVersion};
use rusqlite::{Connection, params};

/// Default file name for the credential database.
pub const DB_NAME: &str = "user.db";

// `username` is deliberately not UNIQUE and `password` is plain text.
const CREATE_USER_TABLE: &str = "
CREATE TABLE user (
    _id      INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    password TEXT NOT NULL
);
";

const DROP_USER_TABLE: &str = "DROP TABLE IF EXISTS user;";

pub(crate) const INSERT_USER: &str =
  "INSERT INTO user (username, password) VALUES (?1, ?2)";

/// Create the `user` table and insert the seed account.
///
/// Fails if the table already exists; callers gate this on a stored version
/// of `0`.
pub fn ensure_schema(conn: &Connection, seed: &SeedAccount) -> rusqlite::Result<()> {
  conn.execute_batch(CREATE_USER_TABLE)?;
  conn.execute(INSERT_USER, params![seed.username, seed.password])?;
  tracing::debug!(seed = %seed.username, "created user table");
  Ok(())
}

/// Drop the `user` table and recreate it with only the seed account.
///
/// There is no per-version migration: every transition discards all rows.
pub fn upgrade_schema(
  conn:        &Connection,
  old_version: u32,
  new_version: SchemaVersion,
  seed:        &SeedAccount,
) -> rusqlite::Result<()> {
  tracing::info!(
    old = old_version,
    new = new_version.get(),
    "upgrading schema; existing users are discarded"
  );
  conn.execute_batch(DROP_USER_TABLE)?;
  ensure_schema(conn, seed)
}

pub(crate) fn read_version(conn: &Connection) -> rusqlite::Result<u32> {
  conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

pub(crate) fn write_version(
  conn:    &Connection,
  version: SchemaVersion,
) -> rusqlite::Result<()> {
  conn.pragma_update(None, "user_version", version.get())
}

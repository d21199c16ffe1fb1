//! [`SqliteStore`] — the SQLite implementation of [`CredentialStore`].

use std::{cmp::Ordering, path::Path};

use passgate_core::{
  store::CredentialStore,
  user::{SeedAccount, UserRecord},
  version::{SchemaVersion, StoreOptions},
};
use rusqlite::{Connection, TransactionBehavior};

use crate::{
  Error, Result,
  schema::{INSERT_USER, ensure_schema, read_version, upgrade_schema, write_version},
};

// ─── Open handshake ──────────────────────────────────────────────────────────

/// What the open sequence did to bring the file to the target version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handshake {
  Ready,
  Created,
  Upgraded { from: u32 },
  Downgrade { found: u32 },
}

/// Compare the stored version to the target and create or upgrade as needed,
/// all inside one immediate transaction.
fn handshake(conn: &mut Connection, options: &StoreOptions) -> rusqlite::Result<Handshake> {
  let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
  let found = read_version(&tx)?;
  let target = options.version;

  let outcome = match found.cmp(&target.get()) {
    Ordering::Equal => Handshake::Ready,
    Ordering::Greater => Handshake::Downgrade { found },
    Ordering::Less if found == 0 => {
      ensure_schema(&tx, &options.seed)?;
      Handshake::Created
    }
    Ordering::Less => {
      upgrade_schema(&tx, found, target, &options.seed)?;
      Handshake::Upgraded { from: found }
    }
  };

  if matches!(outcome, Handshake::Created | Handshake::Upgraded { .. }) {
    write_version(&tx, target)?;
  }
  tx.commit()?;
  Ok(outcome)
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRecord> {
  Ok(UserRecord {
    id:       row.get(0)?,
    username: row.get(1)?,
    password: row.get(2)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A credential store backed by a single SQLite file.
///
/// Cloning is cheap — clones share the one connection thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
  seed: SeedAccount,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring it to `options.version`.
  pub async fn open(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, options).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, options).await
  }

  async fn init(conn: tokio_rusqlite::Connection, options: StoreOptions) -> Result<Self> {
    let target = options.version;
    let seed = options.seed.clone();

    let outcome = conn.call(move |conn| Ok(handshake(conn, &options)?)).await?;

    match outcome {
      Handshake::Ready => tracing::debug!(version = target.get(), "opened store"),
      Handshake::Created => tracing::info!(version = target.get(), "initialised new store"),
      Handshake::Upgraded { from } => {
        tracing::info!(from, to = target.get(), "upgraded store")
      }
      Handshake::Downgrade { found } => {
        tracing::warn!(found, target = target.get(), "refusing to downgrade store");
        return Err(Error::Downgrade { found, target });
      }
    }

    Ok(Self { conn, seed })
  }

  /// The version currently stamped into the file.
  pub async fn schema_version(&self) -> Result<SchemaVersion> {
    let raw = self.conn.call(|conn| Ok(read_version(conn)?)).await?;
    Ok(SchemaVersion::new(raw)?)
  }

  /// Run the destructive upgrade path now: drop the table, recreate it with
  /// only the seed account, and stamp `new_version`.
  pub async fn upgrade(&self, new_version: SchemaVersion) -> Result<()> {
    let seed = self.seed.clone();

    let current: Option<u32> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let found = read_version(&tx)?;
        if found >= new_version.get() {
          return Ok(Some(found));
        }
        upgrade_schema(&tx, found, new_version, &seed)?;
        write_version(&tx, new_version)?;
        tx.commit()?;
        Ok(None)
      })
      .await?;

    match current {
      Some(current) => Err(Error::NotAnUpgrade { current, requested: new_version }),
      None => Ok(()),
    }
  }

  /// Close the underlying connection, waiting for pending calls to finish.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteStore {
  type Error = Error;

  async fn check_login(&self, username: &str, password: &str) -> Result<bool> {
    let user = username.to_owned();
    let pass = password.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT 1 FROM user WHERE username = ?1 AND password = ?2 LIMIT 1",
        )?;
        Ok(stmt.exists(rusqlite::params![user, pass])?)
      })
      .await?;

    tracing::debug!(username, success = found, "login check");
    Ok(found)
  }

  async fn add_user(&self, username: &str, password: &str) -> Result<UserRecord> {
    let user = username.to_owned();
    let pass = password.to_owned();

    let record = self
      .conn
      .call(move |conn| {
        conn.execute(INSERT_USER, rusqlite::params![user, pass])?;
        Ok(UserRecord {
          id:       conn.last_insert_rowid(),
          username: user,
          password: pass,
        })
      })
      .await?;

    tracing::debug!(id = record.id, username = %record.username, "added user");
    Ok(record)
  }

  async fn list_users(&self) -> Result<Vec<UserRecord>> {
    let users = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT _id, username, password FROM user ORDER BY _id")?;
        let rows = stmt
          .query_map([], user_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(users)
  }
}

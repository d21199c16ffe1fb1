//! Subcommand bodies, generic over any [`CredentialStore`] where possible.

use std::{io::Write, path::Path};

use passgate_core::{
  store::CredentialStore,
  user::{Credentials, UserRecord},
  version::SchemaVersion,
};
use passgate_store_sqlite::SqliteStore;

pub const LOGIN_OK: &str = "login succeeded";
pub const LOGIN_FAILED: &str = "invalid username or password";

/// Check `credentials` and report the outcome on `out`.
pub async fn login<S: CredentialStore>(
  store:       &S,
  credentials: &Credentials,
  out:         &mut impl Write,
) -> anyhow::Result<bool> {
  let ok = store.authenticate(credentials).await?;
  writeln!(out, "{}", if ok { LOGIN_OK } else { LOGIN_FAILED })?;
  Ok(ok)
}

pub async fn add_user<S: CredentialStore>(
  store:       &S,
  credentials: &Credentials,
  out:         &mut impl Write,
) -> anyhow::Result<UserRecord> {
  let record = store
    .add_user(&credentials.username, &credentials.password)
    .await?;
  writeln!(out, "added user {} with id {}", record.username, record.id)?;
  Ok(record)
}

/// Print `id  username` per row. Passwords are never printed.
pub async fn list_users<S: CredentialStore>(
  store: &S,
  out:   &mut impl Write,
) -> anyhow::Result<usize> {
  let users = store.list_users().await?;
  for user in &users {
    writeln!(out, "{:>6}  {}", user.id, user.username)?;
  }
  Ok(users.len())
}

/// Report where the store lives and the version it was brought to.
pub async fn init(
  store: &SqliteStore,
  path:  &Path,
  out:   &mut impl Write,
) -> anyhow::Result<SchemaVersion> {
  let version = store.schema_version().await?;
  writeln!(
    out,
    "store ready at {} (schema version {version})",
    path.display()
  )?;
  Ok(version)
}

#[cfg(test)]
mod tests {
  use passgate_core::version::StoreOptions;

  use super::*;

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory(StoreOptions::default())
      .await
      .expect("in-memory store")
  }

  #[tokio::test]
  async fn login_reports_success() {
    let s = store().await;
    let mut out = Vec::new();
    let ok = login(&s, &Credentials::new("admin", "123456"), &mut out)
      .await
      .unwrap();
    assert!(ok);
    assert_eq!(String::from_utf8(out).unwrap().trim(), LOGIN_OK);
  }

  #[tokio::test]
  async fn login_reports_failure() {
    let s = store().await;
    let mut out = Vec::new();
    let ok = login(&s, &Credentials::new("admin", "wrongpass"), &mut out)
      .await
      .unwrap();
    assert!(!ok);
    assert_eq!(String::from_utf8(out).unwrap().trim(), LOGIN_FAILED);
  }

  #[tokio::test]
  async fn added_user_is_listed_without_password() {
    let s = store().await;
    let mut sink = Vec::new();
    add_user(&s, &Credentials::new("alice", "wonderland"), &mut sink)
      .await
      .unwrap();

    let mut out = Vec::new();
    let count = list_users(&s, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(count, 2);
    assert!(text.contains("admin"));
    assert!(text.contains("alice"));
    assert!(!text.contains("wonderland"));
    assert!(!text.contains("123456"));
  }

  #[tokio::test]
  async fn init_reports_version_on_out() {
    let s = store().await;
    let mut out = Vec::new();
    let version = init(&s, Path::new("user.db"), &mut out).await.unwrap();

    assert_eq!(version, SchemaVersion::INITIAL);
    assert_eq!(
      String::from_utf8(out).unwrap().trim(),
      "store ready at user.db (schema version 1)"
    );
  }
}

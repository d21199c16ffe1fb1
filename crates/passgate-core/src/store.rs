//! The `CredentialStore` trait.
//!
//! Implemented by storage backends (e.g. `passgate-store-sqlite`). The
//! command-line host depends on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::user::{Credentials, UserRecord};

/// Abstraction over a credential store backend.
///
/// Rows are only ever inserted. Updates and deletes are not part of the
/// contract; the only way rows disappear is a schema upgrade, which is a
/// backend concern.
pub trait CredentialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// `true` iff at least one row has exactly this username and password.
  ///
  /// Comparison is case-sensitive with no normalisation. An absent row is
  /// `Ok(false)`, never an error.
  fn check_login(
    &self,
    username: &str,
    password: &str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

  /// Insert a row and return it with its assigned id.
  fn add_user(
    &self,
    username: &str,
    password: &str,
  ) -> impl Future<Output = Result<UserRecord, Self::Error>> + Send;

  /// All rows, ordered by id.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<UserRecord>, Self::Error>> + Send + '_;

  /// Convenience wrapper over [`check_login`](Self::check_login).
  fn authenticate(
    &self,
    credentials: &Credentials,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
    self.check_login(&credentials.username, &credentials.password)
  }
}

//! User rows and the credential pairs checked against them.
//!
//! Passwords are stored and compared as plain text. Usernames are not unique.

use std::fmt;

use serde::Deserialize;

/// One row of the `user` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
  /// Auto-assigned; never reused while the table exists.
  pub id:       i64,
  pub username: String,
  pub password: String,
}

/// A username/password pair as submitted by a caller.
///
/// Both halves are opaque: no trimming, case folding or length checks.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// The account inserted right after the `user` table is created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedAccount {
  pub username: String,
  pub password: String,
}

impl SeedAccount {
  pub const DEFAULT_USERNAME: &'static str = "admin";
  pub const DEFAULT_PASSWORD: &'static str = "123456";
}

impl Default for SeedAccount {
  fn default() -> Self {
    Self {
      username: Self::DEFAULT_USERNAME.to_owned(),
      password: Self::DEFAULT_PASSWORD.to_owned(),
    }
  }
}

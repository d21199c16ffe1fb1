//! Error types for `passgate-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Version `0` marks a database that has never been initialised and can
  /// not be used as a target. Anything above `i32::MAX` does not fit in
  /// SQLite's `user_version`.
  #[error("invalid schema version: {0} (must be between 1 and 2147483647)")]
  InvalidVersion(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

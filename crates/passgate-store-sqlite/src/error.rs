//! Error type for `passgate-store-sqlite`.

use passgate_core::version::SchemaVersion;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] passgate_core::Error),

  /// Storage could not be opened, or a statement failed. Never retried.
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The file was stamped by a newer build than the one opening it.
  #[error("cannot downgrade database from version {found} to {target}")]
  Downgrade { found: u32, target: SchemaVersion },

  #[error("requested version {requested} is not newer than current version {current}")]
  NotAnUpgrade {
    current:   u32,
    requested: SchemaVersion,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

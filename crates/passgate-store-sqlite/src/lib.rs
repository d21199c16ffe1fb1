//! SQLite backend for the passgate credential store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on one dedicated
//! connection thread without blocking the async runtime. Every call is
//! executed in submission order, which serialises writes for free.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::{DB_NAME, ensure_schema, upgrade_schema};
pub use store::SqliteStore;

//! Core types and trait definitions for the passgate credential store.
//!
//! This crate is free of database and runtime dependencies. The SQLite
//! backend and the command-line host both depend on it.

pub mod error;
pub mod store;
pub mod user;
pub mod version;

pub use error::{Error, Result};

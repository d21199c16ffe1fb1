//! Schema versioning and store open options.

use std::fmt;

use serde::Deserialize;

use crate::{Error, Result, user::SeedAccount};

/// The schema version stamped into the database file.
///
/// A stored value of `0` means the file has never been initialised; valid
/// target versions start at [`SchemaVersion::INITIAL`]. `user_version` is a
/// signed 32-bit integer, so [`SchemaVersion::MAX`] is `i32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
  pub const INITIAL: SchemaVersion = SchemaVersion(1);
  pub const MAX: SchemaVersion = SchemaVersion(i32::MAX as u32);

  pub fn new(version: u32) -> Result<Self> {
    if version == 0 || version > Self::MAX.0 {
      return Err(Error::InvalidVersion(version));
    }
    Ok(Self(version))
  }

  pub fn get(self) -> u32 { self.0 }
}

impl Default for SchemaVersion {
  fn default() -> Self { Self::INITIAL }
}

impl fmt::Display for SchemaVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl TryFrom<u32> for SchemaVersion {
  type Error = Error;

  fn try_from(value: u32) -> Result<Self> { Self::new(value) }
}

impl<'de> Deserialize<'de> for SchemaVersion {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let raw = u32::deserialize(deserializer)?;
    Self::new(raw).map_err(serde::de::Error::custom)
  }
}

/// Parameters for opening a credential store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
  /// Version the database should be at once opened. A lower stored version
  /// triggers the destructive upgrade path.
  pub version: SchemaVersion,
  /// Account inserted whenever the table is (re)created.
  pub seed:    SeedAccount,
}

impl StoreOptions {
  pub fn with_version(mut self, version: SchemaVersion) -> Self {
    self.version = version;
    self
  }

  pub fn with_seed(mut self, seed: SeedAccount) -> Self {
    self.seed = seed;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_is_rejected() {
    assert!(matches!(SchemaVersion::new(0), Err(Error::InvalidVersion(0))));
  }

  #[test]
  fn versions_beyond_i32_are_rejected() {
    assert_eq!(SchemaVersion::new(i32::MAX as u32).unwrap(), SchemaVersion::MAX);
    assert!(matches!(
      SchemaVersion::new(i32::MAX as u32 + 1),
      Err(Error::InvalidVersion(2_147_483_648))
    ));
    assert!(SchemaVersion::new(3_000_000_000).is_err());
  }

  #[test]
  fn default_options() {
    let opts = StoreOptions::default();
    assert_eq!(opts.version, SchemaVersion::INITIAL);
    assert_eq!(opts.seed, SeedAccount::default());
  }

  #[test]
  fn versions_order() {
    let v1 = SchemaVersion::INITIAL;
    let v2 = SchemaVersion::new(2).unwrap();
    assert!(v1 < v2);
    assert_eq!(v2.get(), 2);
    assert_eq!(v2.to_string(), "2");
  }
}

//! Layered configuration: optional TOML file, then `PASSGATE_*` env vars.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, builder::DefaultState, ConfigBuilder};
use passgate_core::{
  user::SeedAccount,
  version::{SchemaVersion, StoreOptions},
};
use passgate_store_sqlite::DB_NAME;
use serde::Deserialize;

/// Runtime configuration, deserialised from `passgate.toml` and the
/// environment. Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
  pub store_path:     PathBuf,
  pub schema_version: SchemaVersion,
  pub seed:           SeedAccount,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path:     PathBuf::from(DB_NAME),
      schema_version: SchemaVersion::INITIAL,
      seed:           SeedAccount::default(),
    }
  }
}

impl Settings {
  /// Load from `path` (if it exists) layered under `PASSGATE_*` variables,
  /// e.g. `PASSGATE_SCHEMA_VERSION=2` or `PASSGATE_SEED__PASSWORD=…`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(environment());
    Self::from_builder(builder)
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// The store path with a leading `~/` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn store_options(&self) -> StoreOptions {
    StoreOptions::default()
      .with_version(self.schema_version)
      .with_seed(self.seed.clone())
  }
}

/// `PASSGATE_*` variables. Values stay strings until serde asks for a
/// number, so seed credentials such as `007` are kept verbatim.
fn environment() -> Environment {
  Environment::with_prefix("PASSGATE")
    .prefix_separator("_")
    .separator("__")
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use config::{FileFormat, Map};

  use super::*;

  fn from_toml(toml: &str) -> anyhow::Result<Settings> {
    Settings::from_builder(
      Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
    )
  }

  #[test]
  fn empty_file_gives_defaults() {
    let settings = from_toml("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.store_path, PathBuf::from("user.db"));
  }

  #[test]
  fn overrides_seed_and_version() {
    let settings = from_toml(
      r#"
      store_path     = "/var/lib/passgate/user.db"
      schema_version = 3

      [seed]
      username = "root"
      "#,
    )
    .unwrap();

    let opts = settings.store_options();
    assert_eq!(opts.version.get(), 3);
    assert_eq!(opts.seed.username, "root");
    // Unset fields fall back to the default seed.
    assert_eq!(opts.seed.password, "123456");
  }

  #[test]
  fn version_zero_is_rejected() {
    assert!(from_toml("schema_version = 0").is_err());
  }

  fn from_env(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let vars: Map<String, String> = vars
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect();
    Settings::from_builder(
      Config::builder().add_source(environment().source(Some(vars))),
    )
  }

  #[test]
  fn oversized_version_is_rejected() {
    assert!(from_toml("schema_version = 3000000000").is_err());
    assert!(from_toml("schema_version = 2147483648").is_err());
    assert!(from_toml("schema_version = 2147483647").is_ok());
  }

  #[test]
  fn env_values_are_kept_verbatim() {
    let settings = from_env(&[
      ("PASSGATE_SEED__USERNAME", "TRUE"),
      ("PASSGATE_SEED__PASSWORD", "007"),
      ("PASSGATE_SCHEMA_VERSION", "2"),
    ])
    .unwrap();

    assert_eq!(settings.seed.username, "TRUE");
    assert_eq!(settings.seed.password, "007");
    assert_eq!(settings.schema_version.get(), 2);
  }

  #[test]
  fn env_overrides_file() {
    let settings = Settings::from_builder(
      Config::builder()
        .add_source(File::from_str("schema_version = 3", FileFormat::Toml))
        .add_source(environment().source(Some(
          [("PASSGATE_SCHEMA_VERSION".to_owned(), "4".to_owned())]
            .into_iter()
            .collect(),
        ))),
    )
    .unwrap();
    assert_eq!(settings.schema_version.get(), 4);
  }

  #[test]
  fn absolute_path_is_untouched() {
    let p = Path::new("/tmp/user.db");
    assert_eq!(expand_tilde(p), p.to_path_buf());
  }
}

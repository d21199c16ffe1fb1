//! `passgate` — command-line host for the local credential store.
//!
//! Reads `passgate.toml` (or the path given with `--config`), opens the
//! SQLite store, running the create/upgrade handshake, and executes one
//! subcommand.
//!
//! # Usage
//!
//! ```
//! passgate login --username admin --password 123456
//! passgate add-user --username alice --password wonderland
//! passgate users
//! PASSGATE_SCHEMA_VERSION=2 passgate init   # drops and reseeds the table
//! ```

mod commands;
mod settings;

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use passgate_core::user::Credentials;
use passgate_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Local credential store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "passgate.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Check a username/password pair; exits non-zero if it does not match.
  Login {
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
  },
  /// Insert a new user row.
  AddUser {
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
  },
  /// List all users (ids and usernames).
  Users,
  /// Open the store, creating or upgrading it, and report its version.
  Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load {:?}", cli.config))?;
  let store_path = settings.store_path();

  let store = SqliteStore::open(&store_path, settings.store_options())
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let mut out = io::stdout();
  let code = match cli.command {
    Command::Login { username, password } => {
      let credentials = Credentials::new(username, password);
      if commands::login(&store, &credentials, &mut out).await? {
        ExitCode::SUCCESS
      } else {
        ExitCode::FAILURE
      }
    }
    Command::AddUser { username, password } => {
      let credentials = Credentials::new(username, password);
      commands::add_user(&store, &credentials, &mut out).await?;
      ExitCode::SUCCESS
    }
    Command::Users => {
      commands::list_users(&store, &mut out).await?;
      ExitCode::SUCCESS
    }
    Command::Init => {
      commands::init(&store, &store_path, &mut out).await?;
      ExitCode::SUCCESS
    }
  };

  store.close().await.context("failed to close store")?;
  Ok(code)
}

//! Arena CLI
//!
//! Command-line client for the Arena backend: account and session
//! management, following other players, and battle statistics.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use arena_cli::admin_cmd::{self, AdminAction};
use arena_cli::auth_cmd::{self, AuthAction};
use arena_cli::battles_cmd::{self, BattlesAction};
use arena_cli::users_cmd::{self, UsersAction};
use arena_cli::Context;
use arena_client::ApiClient;
use arena_core::config::load_settings;
use arena_core::tracing_init::{default_filter, init_tracing};
use arena_core::FileCredentialStore;

#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(version, about = "Arena player client", long_about = None)]
struct Cli {
    /// Base URL of the Arena API (e.g. "http://localhost:8000/api/v1")
    #[arg(long, env = "ARENA_API_URL")]
    api_url: Option<String>,

    /// Where the session credential is stored
    #[arg(long, env = "ARENA_CREDENTIALS_PATH")]
    credentials: Option<PathBuf>,

    /// Emit JSON log lines on stderr
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Account and session management.
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Other players and subscriptions.
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Battle history and statistics.
    Battles {
        #[command(subcommand)]
        action: BattlesAction,
    },
    /// Database dumps (administrators only).
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

// One user drives one session: a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = load_settings()?;
    if let Some(url) = cli.api_url {
        settings.api_url = url;
    }
    if let Some(path) = cli.credentials {
        settings.credentials_path = Some(path);
    }
    settings.log_json |= cli.log_json;

    init_tracing(&default_filter(&settings.log_level), settings.log_json);
    info!(version = env!("CARGO_PKG_VERSION"), api_url = %settings.api_url, "Starting arena CLI");

    let client = ApiClient::new(&settings.api_url)?;
    let store = FileCredentialStore::new(settings.require_credentials_path()?);
    let mut ctx = Context::new(client, store);
    let mut out = io::stdout();

    let outcome = match cli.command {
        Command::Auth { action } => auth_cmd::run(action, &mut ctx, &mut out).await?,
        Command::Users { action } => users_cmd::run(action, &mut ctx, &mut out).await?,
        Command::Battles { action } => battles_cmd::run(action, &mut ctx, &mut out).await?,
        Command::Admin { action } => admin_cmd::run(action, &mut ctx, &mut out).await?,
    };
    Ok(outcome.into())
}

//! `cors` command line client for the classroom backend.
//!
//! Logs in, keeps the session on disk and issues the backend calls the web
//! frontend would make (linking classes and accounts to Discord).

mod commands;
mod config;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cors_client::{ClientError, ClientProvider};
use log::{debug, error};

use crate::commands::{App, Commands};
use crate::session::SessionStore;

// Exit codes from sysexits.h
const EX_DATAERR: u8 = 65;
const EX_SOFTWARE: u8 = 70;
const EX_UNAVAILABLE: u8 = 69;
const EX_NOPERM: u8 = 77;
const EX_CONFIG: u8 = 78;

/// Command line client for the cors classroom backend
#[derive(Parser, Debug)]
#[command(name = "cors", version, about)]
struct Cli {
    /// Config file (default: <config dir>/cors/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Authorization header value to send instead of the stored session
    #[arg(long, global = true, env = "CORS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    debug!("Using origin {}", config.api.origin);

    let app = App {
        provider: ClientProvider::new(&config.api)?,
        sessions: SessionStore::new(config::default_session_path()?),
        token: cli.token,
    };

    cli.command.execute(&app).await
}

/// Map a failure to a sysexits code
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Network(_)) => EX_UNAVAILABLE,
        Some(ClientError::Request { status, .. })
            if status.as_u16() == 401 || status.as_u16() == 403 =>
        {
            EX_NOPERM
        }
        Some(ClientError::Config(_)) | Some(ClientError::InvalidCredential(_)) => EX_CONFIG,
        Some(ClientError::InvalidPathSegment(_)) => EX_DATAERR,
        _ => EX_SOFTWARE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

//! Subcommand implementations
//!
//! Each subcommand is an `Args` struct with an async `execute` taking the
//! shared [`App`].

mod account;
mod discord;

use clap::Subcommand;
use cors_client::{AuthRequests, ClientProvider, Credential};
use log::{debug, warn};

use crate::session::SessionStore;

pub use account::{LoginArgs, LogoutArgs, RefreshArgs, SignupArgs, WhoamiArgs};
pub use discord::{LinkAccountArgs, LinkClassArgs};

/// Everything a command needs, built once in `main`.
#[derive(Debug)]
pub struct App {
    pub provider: ClientProvider,
    pub sessions: SessionStore,
    /// Credential given on the command line, preferred over the stored session
    pub token: Option<String>,
}

impl App {
    /// Point the provider at the credential later requests should carry.
    pub fn authenticate(&self) -> anyhow::Result<()> {
        if let Some(credential) = Credential::from_optional(self.token.as_deref())? {
            debug!("Using credential from the command line");
            self.provider.reconfigure(Some(&credential));
            return Ok(());
        }

        match self.sessions.load()? {
            Some(session) => AuthRequests::new(&self.provider).restore(&session),
            None => warn!("Not logged in, sending request without credentials"),
        }
        Ok(())
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login(LoginArgs),
    /// Create an account and remember the session
    Signup(SignupArgs),
    /// Exchange the stored refresh token for a new access token
    Refresh(RefreshArgs),
    /// Forget the stored session
    Logout(LogoutArgs),
    /// Show the logged in user
    Whoami(WhoamiArgs),
    /// Connect a class to a Discord server
    LinkClass(LinkClassArgs),
    /// Connect your account to your Discord user
    LinkAccount(LinkAccountArgs),
}

impl Commands {
    /// Dispatch to the selected subcommand
    pub async fn execute(&self, app: &App) -> anyhow::Result<()> {
        match self {
            Self::Login(args) => args.execute(app).await,
            Self::Signup(args) => args.execute(app).await,
            Self::Refresh(args) => args.execute(app).await,
            Self::Logout(args) => args.execute(app),
            Self::Whoami(args) => args.execute(app).await,
            Self::LinkClass(args) => args.execute(app).await,
            Self::LinkAccount(args) => args.execute(app).await,
        }
    }
}

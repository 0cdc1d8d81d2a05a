//! Account commands: login, signup, refresh, logout and whoami.

use anyhow::{Context, bail};
use clap::Args;
use cors_client::{AuthRequests, NewAccount};
use log::info;

use super::App;

/// Log in with email and password
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long, env = "CORS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl LoginArgs {
    /// Log in and store the session
    pub async fn execute(&self, app: &App) -> anyhow::Result<()> {
        let session = AuthRequests::new(&app.provider)
            .login(&self.email, &self.password)
            .await
            .context("Login failed")?;
        app.sessions.save(&session)?;

        println!("Logged in as {} ({})", self.email, session.user_id);
        Ok(())
    }
}

/// Create a new account
#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long, env = "CORS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Profile description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

impl SignupArgs {
    /// Create the account and store the session
    pub async fn execute(&self, app: &App) -> anyhow::Result<()> {
        let account = NewAccount {
            email: self.email.clone(),
            password: self.password.clone(),
            description: self.description.clone(),
        };
        let session = AuthRequests::new(&app.provider)
            .create_account(&account)
            .await
            .context("Signup failed")?;
        app.sessions.save(&session)?;

        println!("Created account {} ({})", self.email, session.user_id);
        Ok(())
    }
}

/// Refresh the access token
#[derive(Args, Debug)]
pub struct RefreshArgs {}

impl RefreshArgs {
    /// Exchange the stored refresh credential and store the new session
    pub async fn execute(&self, app: &App) -> anyhow::Result<()> {
        let Some(session) = app.sessions.load()? else {
            bail!("Not logged in, run `cors login` first");
        };

        let refreshed = AuthRequests::new(&app.provider)
            .refresh(&session)
            .await
            .context("Token refresh failed")?;
        app.sessions.save(&refreshed)?;

        info!("Access token valid until {}", refreshed.expires);
        println!("Session refreshed");
        Ok(())
    }
}

/// Log out
#[derive(Args, Debug)]
pub struct LogoutArgs {}

impl LogoutArgs {
    /// Drop the credential and the stored session
    pub fn execute(&self, app: &App) -> anyhow::Result<()> {
        AuthRequests::new(&app.provider).logout();
        app.sessions.clear()?;

        println!("Logged out");
        Ok(())
    }
}

/// Show the current user
#[derive(Args, Debug)]
pub struct WhoamiArgs {}

impl WhoamiArgs {
    /// Fetch and print the own user
    pub async fn execute(&self, app: &App) -> anyhow::Result<()> {
        app.authenticate()?;
        let user = AuthRequests::new(&app.provider).own_user().await?;

        println!("{} ({})", user.email, user.id);
        if !user.description.is_empty() {
            println!("{}", user.description);
        }
        Ok(())
    }
}

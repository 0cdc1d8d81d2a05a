//! Discord linking commands.

use anyhow::Context;
use clap::Args;
use cors_client::DiscordRequests;

use super::App;

/// Connect a class to a Discord server
#[derive(Args, Debug)]
pub struct LinkClassArgs {
    /// Id of the class to link
    pub class_id: String,

    /// Discord server (guild) id
    pub snowflake: String,
}

impl LinkClassArgs {
    /// Issue the link request with the current credential
    pub async fn execute(&self, app: &App) -> anyhow::Result<()> {
        app.authenticate()?;
        DiscordRequests::new(&app.provider)
            .link_class_to_guild(&self.class_id, &self.snowflake)
            .await
            .with_context(|| format!("Failed to link class {}", self.class_id))?;

        println!(
            "Class {} is now linked to Discord server {}",
            self.class_id, self.snowflake
        );
        Ok(())
    }
}

/// Connect your account to your Discord user
#[derive(Args, Debug)]
pub struct LinkAccountArgs {
    /// Discord user id
    pub snowflake: String,
}

impl LinkAccountArgs {
    /// Issue the link request with the current credential
    pub async fn execute(&self, app: &App) -> anyhow::Result<()> {
        app.authenticate()?;
        DiscordRequests::new(&app.provider)
            .link_account_to_discord(&self.snowflake)
            .await
            .context("Failed to link account")?;

        println!("Account is now linked to Discord user {}", self.snowflake);
        Ok(())
    }
}

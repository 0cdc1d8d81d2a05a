use tracing::info;

use crate::error::ClientResult;
use crate::models::LinkRequest;
use crate::provider::ClientProvider;

/// Links classes and accounts to Discord.
#[derive(Debug, Clone, Copy)]
pub struct DiscordRequests<'a> {
    provider: &'a ClientProvider,
}

impl<'a> DiscordRequests<'a> {
    /// Issue requests through `provider`.
    pub fn new(provider: &'a ClientProvider) -> Self {
        Self { provider }
    }

    /// `POST /classes/{class_id}/link`: connect a class to a Discord guild.
    pub async fn link_class_to_guild(&self, class_id: &str, snowflake: &str) -> ClientResult<()> {
        info!("Linking class {} to guild {}", class_id, snowflake);
        self.link(&["classes", class_id, "link"], snowflake).await
    }

    /// `POST /users/me/link`: connect the logged in account to a Discord user.
    pub async fn link_account_to_discord(&self, snowflake: &str) -> ClientResult<()> {
        info!("Linking account to Discord user {}", snowflake);
        self.link(&["users", "me", "link"], snowflake).await
    }

    async fn link(&self, segments: &[&str], snowflake: &str) -> ClientResult<()> {
        let body = LinkRequest {
            snowflake: snowflake.to_string(),
        };
        // Read the transport per call so a fresh login applies immediately
        self.provider.transport().post_json(segments, &body).await?;
        Ok(())
    }
}

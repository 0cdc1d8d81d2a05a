use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ClientConfig, Credential, Transport};

/// Owns the active transport configuration and hands out snapshots of it.
///
/// Constructed once by the application and passed by reference to whatever
/// issues requests. All snapshots share one connection pool.
#[derive(Debug)]
pub struct ClientProvider {
    http: reqwest::Client,
    current: ArcSwap<ClientConfig>,
}

impl ClientProvider {
    /// Build a provider for the configured origin, without credentials.
    pub fn new(api: &ApiConfig) -> ClientResult<Self> {
        let base_address = api.base_address()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = api.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(http, base_address))
    }

    /// Build a provider around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_address: impl Into<String>) -> Self {
        let initial = ClientConfig::new(base_address);
        info!("API base address: {}", initial.base_address());

        Self {
            http,
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// The transport as configured right now.
    pub fn transport(&self) -> Transport {
        Transport::new(self.http.clone(), self.current.load_full())
    }

    /// Replace the configuration wholesale. With a credential, every later
    /// request carries it as `Authorization`; without one, none does. The
    /// base address of the current configuration is kept.
    ///
    /// Transports handed out earlier keep their old configuration.
    pub fn reconfigure(&self, credential: Option<&Credential>) {
        debug!(
            "Reconfiguring transport ({})",
            if credential.is_some() { "authenticated" } else { "anonymous" }
        );
        let base_address = self.current.load().base_address().to_string();
        self.replace_config(ClientConfig::new(base_address).with_credential(credential));
    }

    /// Install a complete configuration, headers and all.
    pub fn replace_config(&self, config: ClientConfig) {
        self.current.store(Arc::new(config));
    }
}

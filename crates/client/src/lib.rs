//! Client for the cors classroom backend.
//!
//! One [`ClientProvider`] owns the transport configuration (base address
//! plus headers). Request wrappers borrow the provider and read its current
//! transport whenever they issue a call, so logging in or out takes effect
//! for the very next request.
//!
//! # Example
//!
//! ```rust,ignore
//! use cors_client::{AuthRequests, ClientProvider, Config, DiscordRequests};
//!
//! let config = Config::from_file(path)?;
//! let provider = ClientProvider::new(&config.api)?;
//!
//! AuthRequests::new(&provider).login("anna@school.ch", "secret1").await?;
//! DiscordRequests::new(&provider)
//!     .link_class_to_guild(&class_id, "813059176123457536")
//!     .await?;
//! ```

mod config;
mod error;
mod models;
mod provider;
mod requests;
mod transport;

#[cfg(test)]
mod test_support;

pub use config::{API_PATH, ApiConfig, Config, DEFAULT_ORIGIN};
pub use error::{ClientError, ClientResult};
pub use models::{
    AccountCreated, LinkRequest, LoginRequest, LoginResponse, NewAccount, RefreshResponse,
    Session, User,
};
pub use provider::ClientProvider;
pub use requests::{AuthRequests, DiscordRequests, REFRESH_TOKEN_HEADER, TOKEN_HEADER};
pub use transport::{ClientConfig, Credential, Transport};

/// Status codes carried by [`ClientError::Request`].
pub use reqwest::StatusCode;

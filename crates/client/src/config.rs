//! Client configuration loaded from TOML.
//!
//! ```toml
//! [api]
//! origin = "https://cors.example.org"
//! timeout = 30
//! ```

use std::fs;
use std::path::Path;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Origin used when the config file does not name one.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8080";

/// Path below the origin under which the backend serves its API.
pub const API_PATH: &str = "/api";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host of the application, e.g. `https://cors.example.org`
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Per-request timeout in seconds. Unset means requests never time out.
    #[serde(default)]
    pub timeout: Option<u64>,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            timeout: None,
        }
    }
}

impl Config {
    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&raw)
    }

    /// Parse config from a TOML string.
    pub fn parse(raw: &str) -> ClientResult<Self> {
        let config: Config =
            toml::from_str(raw).map_err(|e| ClientError::Config(e.to_string()))?;
        // Fail on a bad origin here rather than on the first request
        config.api.base_address()?;
        Ok(config)
    }
}

impl ApiConfig {
    /// The origin with [`API_PATH`] appended, without a trailing slash.
    pub fn base_address(&self) -> ClientResult<String> {
        let url = Url::parse(&self.origin)
            .map_err(|e| ClientError::Config(format!("Invalid origin '{}': {}", self.origin, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "Origin '{}' must use http or https",
                self.origin
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ClientError::Config(format!(
                "Origin '{}' must not carry a query or fragment",
                self.origin
            )));
        }

        Ok(format!("{}{}", self.origin.trim_end_matches('/'), API_PATH))
    }
}

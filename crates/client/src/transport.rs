//! Immutable transport configuration and the request plumbing built on it.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{ClientError, ClientResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Value of an `Authorization` header.
///
/// Never empty. The header value is flagged sensitive and the `Debug`
/// output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    raw: String,
    value: HeaderValue,
}

impl Credential {
    /// Build a credential from the exact header value to send.
    pub fn new(value: impl Into<String>) -> ClientResult<Self> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ClientError::InvalidCredential("credential is empty".into()));
        }

        let mut value = HeaderValue::from_str(&raw)
            .map_err(|e| ClientError::InvalidCredential(e.to_string()))?;
        value.set_sensitive(true);

        Ok(Self { raw, value })
    }

    /// Like [`Credential::new`], but an absent or empty value means "no credential".
    pub fn from_optional(value: Option<&str>) -> ClientResult<Option<Self>> {
        match value {
            None | Some("") => Ok(None),
            Some(value) => Self::new(value).map(Some),
        }
    }

    /// `Bearer <token>`, leaving an already prefixed token untouched.
    pub fn bearer(token: &str) -> ClientResult<Self> {
        if token.starts_with(BEARER_PREFIX) {
            Self::new(token)
        } else {
            Self::new(format!("{BEARER_PREFIX}{token}"))
        }
    }

    /// The header value as sent on the wire.
    pub fn expose(&self) -> &str {
        &self.raw
    }

    fn header_value(&self) -> HeaderValue {
        self.value.clone()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Base address plus the complete set of headers sent with every request.
///
/// Built fresh for each reconfiguration; there is no way to patch a single
/// header on a live configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_address: String,
    headers: HeaderMap,
}

impl ClientConfig {
    /// A configuration with no headers.
    pub fn new(base_address: impl Into<String>) -> Self {
        let base_address: String = base_address.into();
        Self {
            base_address: base_address.trim_end_matches('/').to_string(),
            headers: HeaderMap::new(),
        }
    }

    /// Set or clear the `Authorization` header.
    pub fn with_credential(mut self, credential: Option<&Credential>) -> Self {
        match credential {
            Some(credential) => {
                self.headers.insert(AUTHORIZATION, credential.header_value());
            }
            None => {
                self.headers.remove(AUTHORIZATION);
            }
        }
        self
    }

    /// Add a header, replacing any previous value under the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Address every request path is appended to, e.g. `https://host/api`.
    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    /// Headers attached to every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The `Authorization` header, if one is configured.
    pub fn authorization(&self) -> Option<&HeaderValue> {
        self.headers.get(AUTHORIZATION)
    }

    /// Absolute URL for an API path given as segments, e.g. `["users", "me"]`.
    ///
    /// Each segment is percent-encoded as a whole, so `/`, `?` and `#` inside
    /// a segment never leave it. Empty, `.` and `..` segments are rejected.
    pub fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ClientError::InvalidPathSegment(bad.to_string()));
        }

        let mut url = Url::parse(&self.base_address)
            .map_err(|e| ClientError::Config(format!("Invalid base address: {}", e)))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Config("Base address cannot take a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// A configuration snapshot bound to the shared connection pool.
///
/// Cheap to clone. Requests made through a `Transport` always use the
/// configuration it was created with.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, config: Arc<ClientConfig>) -> Self {
        Self { http, config }
    }

    /// The configuration this transport sends with.
    pub fn config(&self) -> &Arc<ClientConfig> {
        &self.config
    }

    /// A copy of this transport whose `Authorization` header is `credential`.
    pub fn with_credential(&self, credential: &Credential) -> Self {
        let config = ClientConfig::clone(&self.config).with_credential(Some(credential));
        Self::new(self.http.clone(), Arc::new(config))
    }

    /// Start a request against the path `segments` with the configured
    /// headers applied.
    pub fn request(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        let url = self.config.url(segments)?;
        Ok(self
            .http
            .request(method, url)
            .headers(self.config.headers.clone()))
    }

    /// `GET`, failing on non-2xx.
    pub async fn get(&self, segments: &[&str]) -> ClientResult<Response> {
        self.send(self.request(Method::GET, segments)?).await
    }

    /// `POST` with a JSON body, failing on non-2xx.
    pub async fn post_json<B>(&self, segments: &[&str], body: &B) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, segments)?.json(body)).await
    }

    /// Send a prepared request. Transport failures become
    /// [`ClientError::Network`], non-2xx answers [`ClientError::Request`].
    pub async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let request = request
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build request: {}", e)))?;
        debug!("{} {}", request.method(), request.url());

        let response = self
            .http
            .execute(request)
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read error body: {}", e);
                    String::new()
                }
            };
            error!("Backend returned error {}: {}", status, body);
            return Err(ClientError::Request { status, body });
        }

        Ok(response)
    }
}

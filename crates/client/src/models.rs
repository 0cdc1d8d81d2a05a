//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transport::Credential;

/// Body of both Discord link calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequest {
    /// Discord guild or user id, kept as an opaque string
    pub snowflake: String,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Account email
    pub email: &'a str,
    /// Plain text password
    pub password: &'a str,
}

/// JSON answer to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Id of the logged in user
    pub userid: Uuid,
    /// Expiry of the access token, milliseconds since the epoch
    pub expires: i64,
}

/// JSON answer to a successful token refresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    /// Expiry of the new access token, milliseconds since the epoch
    pub expires: i64,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    /// Account email
    pub email: String,
    /// Plain text password
    pub password: String,
    /// Free text shown on the profile
    pub description: String,
}

/// JSON answer to a successful account creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountCreated {
    /// Id of the new user
    pub id: Uuid,
    /// Account email
    pub email: String,
    /// Profile description
    pub description: String,
    /// Expiry of the access token, milliseconds since the epoch
    pub expires: i64,
}

/// A user as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: Uuid,
    /// Account email
    pub email: String,
    /// Profile description
    #[serde(default)]
    pub description: String,
}

/// Credentials obtained from login, signup or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Access credential, sent as `Authorization`
    pub credential: Credential,
    /// Credential accepted by `GET /token` to obtain a fresh access credential
    pub refresh_credential: Option<Credential>,
    /// The authenticated user
    pub user_id: Uuid,
    /// Expiry of `credential`, milliseconds since the epoch
    pub expires: i64,
}

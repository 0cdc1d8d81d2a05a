use reqwest::Response;
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::models::{
    AccountCreated, LoginRequest, LoginResponse, NewAccount, RefreshResponse, Session, User,
};
use crate::provider::ClientProvider;
use crate::transport::Credential;

/// Response header carrying the access token.
pub const TOKEN_HEADER: &str = "token";
/// Response header carrying the refresh token.
pub const REFRESH_TOKEN_HEADER: &str = "refresh-token";

/// Login, signup and token handling. Every call that yields a session
/// reconfigures the provider so later requests are authenticated.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequests<'a> {
    provider: &'a ClientProvider,
}

impl<'a> AuthRequests<'a> {
    /// Issue requests through `provider`.
    pub fn new(provider: &'a ClientProvider) -> Self {
        Self { provider }
    }

    /// `POST /login`. A wrong password comes back as a 403 [`ClientError::Request`].
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        info!("Logging in as {}", email);
        let response = self
            .provider
            .transport()
            .post_json(&["login"], &LoginRequest { email, password })
            .await?;

        let credential = required_credential(&response, TOKEN_HEADER)?;
        let refresh_credential = optional_credential(&response, REFRESH_TOKEN_HEADER)?;
        let body: LoginResponse = response.json().await.map_err(ClientError::Decode)?;

        self.provider.reconfigure(Some(&credential));
        Ok(Session {
            credential,
            refresh_credential,
            user_id: body.userid,
            expires: body.expires,
        })
    }

    /// `POST /users`. The backend logs the new account in right away.
    pub async fn create_account(&self, account: &NewAccount) -> ClientResult<Session> {
        info!("Creating account {}", account.email);
        let response = self
            .provider
            .transport()
            .post_json(&["users"], account)
            .await?;

        let credential = required_credential(&response, TOKEN_HEADER)?;
        let refresh_credential = optional_credential(&response, REFRESH_TOKEN_HEADER)?;
        let body: AccountCreated = response.json().await.map_err(ClientError::Decode)?;

        self.provider.reconfigure(Some(&credential));
        Ok(Session {
            credential,
            refresh_credential,
            user_id: body.id,
            expires: body.expires,
        })
    }

    /// `GET /token` with the session's refresh credential. Only that request
    /// carries the refresh credential; the provider ends up with the new
    /// access credential.
    pub async fn refresh(&self, session: &Session) -> ClientResult<Session> {
        let refresh_credential = session.refresh_credential.as_ref().ok_or_else(|| {
            ClientError::InvalidCredential("session has no refresh credential".into())
        })?;

        let response = self
            .provider
            .transport()
            .with_credential(refresh_credential)
            .get(&["token"])
            .await?;

        let credential = required_credential(&response, TOKEN_HEADER)?;
        let body: RefreshResponse = response.json().await.map_err(ClientError::Decode)?;

        self.provider.reconfigure(Some(&credential));
        Ok(Session {
            credential,
            refresh_credential: session.refresh_credential.clone(),
            user_id: session.user_id,
            expires: body.expires,
        })
    }

    /// `GET /users/me`.
    pub async fn own_user(&self) -> ClientResult<User> {
        self.provider
            .transport()
            .get(&["users", "me"])
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    /// Authenticate later requests with a previously obtained session.
    pub fn restore(&self, session: &Session) {
        self.provider.reconfigure(Some(&session.credential));
    }

    /// Drop the credential. No request is made.
    pub fn logout(&self) {
        info!("Logging out");
        self.provider.reconfigure(None);
    }
}

fn optional_credential(
    response: &Response,
    name: &'static str,
) -> ClientResult<Option<Credential>> {
    match response.headers().get(name) {
        Some(value) => {
            let token = value
                .to_str()
                .map_err(|e| ClientError::InvalidCredential(e.to_string()))?;
            Credential::bearer(token).map(Some)
        }
        None => Ok(None),
    }
}

fn required_credential(response: &Response, name: &'static str) -> ClientResult<Credential> {
    optional_credential(response, name)?.ok_or(ClientError::MissingHeader(name))
}

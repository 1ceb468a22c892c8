//! Token endpoint client
//!
//! Talks to the account service:
//! - Session handle exchange (`grant_type=sso_token`)
//! - Refresh (`grant_type=refresh_token`)
//! - Session handle lookup via the SSO cookie endpoint
//!
//! Every method makes exactly one request. Retries are the caller's concern.

use std::time::Duration;

use async_trait::async_trait;
use psnlink_domain::constants::{
    ACCESS_TYPE_OFFLINE, GRANT_REFRESH, GRANT_SESSION_EXCHANGE, SSO_COOKIE_URL, TOKEN_FORMAT,
    TOKEN_SCOPE, TOKEN_URL,
};
use psnlink_domain::{ClientIdentity, NpssoResponse, SessionHandle, TokenPair};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::traits::TokenExchange;
use super::types::TokenResponse;

/// Error type for token endpoint operations
#[derive(Debug)]
pub enum ExchangeClientError {
    /// No response received (connect error, timeout)
    RequestFailed(reqwest::Error),

    /// Endpoint answered with a non-success status
    Rejected { status: u16, body: String },

    /// Failed to parse response or a required field was missing
    ParseError(String),

    /// Invalid configuration
    ConfigError(String),
}

impl std::fmt::Display for ExchangeClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(e) => write!(f, "HTTP request failed: {e}"),
            Self::Rejected { status, body } => {
                write!(f, "token endpoint returned {status}: {body}")
            }
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ExchangeClientError {}

impl From<reqwest::Error> for ExchangeClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed(err)
    }
}

/// Client for the account service token and SSO cookie endpoints
#[derive(Debug, Clone)]
pub struct TokenExchangeClient {
    client: Client,
    identity: ClientIdentity,
    token_url: String,
    sso_cookie_url: String,
}

impl TokenExchangeClient {
    /// Create a client against the production endpoints
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(identity: ClientIdentity, timeout: Duration) -> Result<Self, ExchangeClientError> {
        Self::with_endpoints(identity, timeout, TOKEN_URL, SSO_COOKIE_URL)
    }

    /// Create a client against explicit endpoints (mock servers in tests)
    ///
    /// # Errors
    /// Returns error if the identity has no client id or the HTTP client
    /// cannot be built
    pub fn with_endpoints(
        identity: ClientIdentity,
        timeout: Duration,
        token_url: impl Into<String>,
        sso_cookie_url: impl Into<String>,
    ) -> Result<Self, ExchangeClientError> {
        if identity.client_id.trim().is_empty() {
            return Err(ExchangeClientError::ConfigError("client id is required".to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            identity,
            token_url: token_url.into(),
            sso_cookie_url: sso_cookie_url.into(),
        })
    }

    #[must_use]
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    async fn post_token_form(
        &self,
        params: &[(&str, &str)],
    ) -> Result<TokenPair, ExchangeClientError> {
        let response = self.client.post(&self.token_url).form(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "token endpoint rejected request");
            return Err(ExchangeClientError::Rejected { status: status.as_u16(), body });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(|e| ExchangeClientError::ParseError(e.to_string()))?;

        debug!(expires_in = token_response.expires_in, "token endpoint issued access token");
        Ok(token_response.into())
    }
}

#[async_trait]
impl TokenExchange for TokenExchangeClient {
    #[instrument(skip(self, session), fields(session = %session.redacted()))]
    async fn exchange_session(
        &self,
        session: &SessionHandle,
    ) -> Result<TokenPair, ExchangeClientError> {
        let params = [
            ("grant_type", GRANT_SESSION_EXCHANGE),
            ("token_format", TOKEN_FORMAT),
            ("access_type", ACCESS_TYPE_OFFLINE),
            ("client_id", self.identity.client_id.as_str()),
            ("client_secret", self.identity.secret_or_empty()),
            ("npsso", session.as_str()),
            ("scope", TOKEN_SCOPE),
        ];
        self.post_token_form(&params).await
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ExchangeClientError> {
        let params = [
            ("refresh_token", refresh_token),
            ("grant_type", GRANT_REFRESH),
            ("token_format", TOKEN_FORMAT),
            ("scope", TOKEN_SCOPE),
        ];
        self.post_token_form(&params).await
    }

    #[instrument(skip(self))]
    async fn fetch_session_handle(&self) -> Result<SessionHandle, ExchangeClientError> {
        let response = self.client.get(&self.sso_cookie_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeClientError::Rejected { status: status.as_u16(), body });
        }

        let payload: NpssoResponse =
            response.json().await.map_err(|e| ExchangeClientError::ParseError(e.to_string()))?;
        if payload.npsso.trim().is_empty() {
            return Err(ExchangeClientError::ParseError("npsso field is empty".to_string()));
        }

        Ok(SessionHandle::new(payload.npsso))
    }
}

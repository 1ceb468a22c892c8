//! Token provider backed by the credential lifecycle manager
//!
//! Wraps [`TokenManager`] so gateway operations can resolve a usable access
//! token through the core [`AccessTokenProvider`] port.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use psnlink_common::auth::{
    FileTokenStore, TokenExchange, TokenExchangeClient, TokenManager, TokenStore,
};
use psnlink_core::AccessTokenProvider;
use psnlink_domain::{
    ApiConfig, AuthConfig, ClientIdentity, PsnError, Result, SessionHandle, TokenPair,
};
use tracing::{debug, info};

use crate::errors::InfraError;

/// Access token service for PSN calls
pub struct PsnAuthService<E = TokenExchangeClient, S = FileTokenStore>
where
    E: TokenExchange + 'static,
    S: TokenStore + 'static,
{
    manager: Arc<TokenManager<E, S>>,
}

impl PsnAuthService {
    /// Build the production service: token endpoint client plus the
    /// file-backed store at the configured path.
    ///
    /// # Errors
    /// Returns `Config` if the client id is missing or the HTTP client
    /// cannot be built
    pub fn from_config(auth: &AuthConfig, api: &ApiConfig) -> Result<Self> {
        let identity = ClientIdentity::new(auth.client_id.clone(), auth.client_secret.clone());
        let exchange = TokenExchangeClient::with_endpoints(
            identity,
            Duration::from_secs(api.request_timeout_secs),
            api.endpoints.token_url.clone(),
            api.endpoints.sso_cookie_url.clone(),
        )
        .map_err(|err| PsnError::Config(err.to_string()))?;

        let store = FileTokenStore::new(auth.token_store_path.clone());
        let session = SessionHandle::new(auth.npsso.clone().unwrap_or_default());

        debug!(
            store = %auth.token_store_path.display(),
            session = %session.redacted(),
            "token service configured"
        );

        Ok(Self::new(Arc::new(TokenManager::new(Arc::new(exchange), Arc::new(store), session))))
    }
}

impl<E, S> PsnAuthService<E, S>
where
    E: TokenExchange + 'static,
    S: TokenStore + 'static,
{
    pub fn new(manager: Arc<TokenManager<E, S>>) -> Self {
        Self { manager }
    }

    #[must_use]
    pub fn manager(&self) -> &Arc<TokenManager<E, S>> {
        &self.manager
    }

    /// Fetch a session handle at startup when none is configured.
    ///
    /// Returns `Ok(false)` when a handle was already present.
    ///
    /// # Errors
    /// Returns the lookup failure; callers decide whether it is fatal
    pub async fn bootstrap_if_missing(&self) -> Result<bool> {
        if !self.manager.session_handle().await.is_empty() {
            return Ok(false);
        }

        info!("no session handle configured; fetching from SSO cookie endpoint");
        self.manager
            .bootstrap_session_handle()
            .await
            .map_err(|err| PsnError::from(InfraError::from(err)))?;
        Ok(true)
    }
}

#[async_trait]
impl<E, S> AccessTokenProvider for PsnAuthService<E, S>
where
    E: TokenExchange + 'static,
    S: TokenStore + 'static,
{
    async fn access_token(&self) -> Result<TokenPair> {
        self.manager.ensure_access_token().await.map_err(|err| InfraError::from(err).into())
    }

    async fn fetch_session_handle(&self) -> Result<SessionHandle> {
        self.manager.bootstrap_session_handle().await.map_err(|err| InfraError::from(err).into())
    }

    async fn replace_session_handle(&self, session: SessionHandle) {
        self.manager.set_session_handle(session).await;
    }
}

//! Token lifecycle manager
//!
//! Decides whether the cached access token is usable and, when it is not,
//! acquires or refreshes it:
//! - No persisted record: acquire from the session handle
//! - Record still valid: return it without any network call
//! - Record stale: exactly one refresh attempt, no fallback to acquisition
//!
//! Expiry is `persisted_at + access.expires_in`, where `persisted_at` is the
//! write time of the whole record. Access and refresh tokens share that one
//! timestamp, and any other writer of the same store resets the window.
//!
//! Nothing refreshes in the background. Failures are not sticky: the next
//! call evaluates the store from scratch.

use std::sync::Arc;

use psnlink_domain::{PersistedTokens, PsnError, SessionHandle, TokenPair};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::client::ExchangeClientError;
use super::store::StoreError;
use super::traits::{TokenExchange, TokenStore};
use crate::time::{Clock, SystemClock};

/// Error type for token lifecycle operations
#[derive(Debug)]
pub enum AuthError {
    /// No usable token and acquisition is not possible
    Unauthenticated(String),

    /// Session handle exchange failed; persisted state untouched
    AcquisitionFailed(ExchangeClientError),

    /// Refresh failed; the session must be treated as unauthenticated
    RefreshFailed(String),

    /// Tokens were issued but could not be persisted
    Store(StoreError),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated(msg) => write!(f, "Not authenticated: {msg}"),
            Self::AcquisitionFailed(e) => write!(f, "Token acquisition failed: {e}"),
            Self::RefreshFailed(msg) => write!(f, "Token refresh failed: {msg}"),
            Self::Store(e) => write!(f, "Token store error: {e}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<AuthError> for PsnError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated(msg) => Self::Unauthenticated(msg),
            AuthError::AcquisitionFailed(e) => Self::AcquisitionFailed(e.to_string()),
            AuthError::RefreshFailed(msg) => Self::RefreshFailed(msg),
            AuthError::Store(e) => e.into(),
        }
    }
}

/// Token lifecycle manager
///
/// Owns the in-memory copy of the token pair. The session handle is
/// immutable unless replaced through [`TokenManager::set_session_handle`].
/// Refreshes are serialized through an internal gate; a caller that waited
/// on the gate re-reads the store before refreshing.
pub struct TokenManager<E: TokenExchange + 'static, S: TokenStore + 'static> {
    exchange: Arc<E>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    session: RwLock<SessionHandle>,
    current: RwLock<TokenPair>,
    refresh_gate: Mutex<()>,
}

impl<E: TokenExchange + 'static, S: TokenStore + 'static> TokenManager<E, S> {
    /// Create a new token manager using the system clock
    ///
    /// # Arguments
    /// * `exchange` - Token endpoint client
    /// * `store` - Persistence for the token pair
    /// * `session` - Session handle used for acquisition (may be empty)
    #[must_use]
    pub fn new(exchange: Arc<E>, store: Arc<S>, session: SessionHandle) -> Self {
        Self::with_clock(exchange, store, session, Arc::new(SystemClock))
    }

    /// Create a new token manager with an explicit clock
    #[must_use]
    pub fn with_clock(
        exchange: Arc<E>,
        store: Arc<S>,
        session: SessionHandle,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            exchange,
            store,
            clock,
            session: RwLock::new(session),
            current: RwLock::new(TokenPair::default()),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Return a usable token pair, acquiring or refreshing as needed
    ///
    /// # Errors
    /// - `Unauthenticated` if there is no record and no session handle
    /// - `AcquisitionFailed` if the session exchange fails
    /// - `RefreshFailed` if the record is stale and refresh fails
    /// - `Store` if new tokens cannot be persisted
    pub async fn ensure_access_token(&self) -> Result<TokenPair, AuthError> {
        let Some(record) = self.store.load().await else {
            debug!("no persisted tokens; acquiring from session handle");
            return self.acquire().await;
        };

        *self.current.write().await = record.pair.clone();

        if record.is_valid_at(self.clock.now()) {
            debug!(
                expires_at = ?record.pair.access_expires_at(record.persisted_at),
                "cached access token is valid"
            );
            return Ok(record.pair);
        }

        let _gate = self.refresh_gate.lock().await;

        if let Some(latest) = self.refreshed_since(&record).await {
            debug!("access token was refreshed by a concurrent caller");
            *self.current.write().await = latest.pair.clone();
            return Ok(latest.pair);
        }

        info!("access token expired; refreshing");
        self.refresh_from(&record.pair).await
    }

    /// Exchange the session handle for a fresh token pair and persist it
    ///
    /// # Errors
    /// - `Unauthenticated` if the session handle is empty (no network call)
    /// - `AcquisitionFailed` on any transport or parse failure
    /// - `Store` if the new pair cannot be persisted
    pub async fn acquire(&self) -> Result<TokenPair, AuthError> {
        let session = self.session.read().await.clone();
        if session.is_empty() {
            return Err(AuthError::Unauthenticated("no session handle configured".to_string()));
        }

        let pair = self.exchange.exchange_session(&session).await.map_err(|err| {
            warn!(error = %err, session = %session.redacted(), "token acquisition failed");
            AuthError::AcquisitionFailed(err)
        })?;

        self.store.save(&pair).await?;
        *self.current.write().await = pair.clone();

        info!("tokens acquired from session handle");
        Ok(pair)
    }

    /// Refresh the in-memory pair and persist the result
    ///
    /// # Errors
    /// - `RefreshFailed` if there is no refresh token or the exchange fails
    /// - `Store` if the new pair cannot be persisted
    pub async fn refresh(&self) -> Result<TokenPair, AuthError> {
        let _gate = self.refresh_gate.lock().await;
        let current = self.current_pair().await;
        self.refresh_from(&current).await
    }

    /// Current in-memory pair, falling back to the store when nothing has
    /// been loaded yet
    pub async fn current_pair(&self) -> TokenPair {
        let in_memory = self.current.read().await.clone();
        if !in_memory.access.is_empty() || !in_memory.refresh.is_empty() {
            return in_memory;
        }
        self.store.load().await.map(|record| record.pair).unwrap_or_default()
    }

    /// Replace the session handle used for future acquisitions
    pub async fn set_session_handle(&self, session: SessionHandle) {
        let mut guard = self.session.write().await;
        if *guard != session {
            info!(session = %session.redacted(), "session handle replaced");
            *guard = session;
        }
    }

    pub async fn session_handle(&self) -> SessionHandle {
        self.session.read().await.clone()
    }

    /// Look up a session handle from the SSO cookie endpoint and install it
    ///
    /// # Errors
    /// Returns `AcquisitionFailed` if the endpoint does not yield a handle
    pub async fn bootstrap_session_handle(&self) -> Result<SessionHandle, AuthError> {
        let session =
            self.exchange.fetch_session_handle().await.map_err(AuthError::AcquisitionFailed)?;
        self.set_session_handle(session.clone()).await;
        Ok(session)
    }

    async fn refreshed_since(&self, stale: &PersistedTokens) -> Option<PersistedTokens> {
        let latest = self.store.load().await?;
        let changed = latest.persisted_at != stale.persisted_at || latest.pair != stale.pair;
        (changed && latest.is_valid_at(self.clock.now())).then_some(latest)
    }

    async fn refresh_from(&self, pair: &TokenPair) -> Result<TokenPair, AuthError> {
        if pair.refresh.is_empty() {
            return Err(AuthError::RefreshFailed("no refresh token available".to_string()));
        }

        let mut refreshed = self.exchange.refresh(&pair.refresh.value).await.map_err(|err| {
            warn!(error = %err, "token refresh failed");
            AuthError::RefreshFailed(err.to_string())
        })?;

        if refreshed.refresh.is_empty() {
            refreshed.refresh = pair.refresh.clone();
        }

        self.store.save(&refreshed).await?;
        *self.current.write().await = refreshed.clone();

        info!("access token refreshed");
        Ok(refreshed)
    }
}

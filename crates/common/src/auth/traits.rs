//! Traits for token exchange and token persistence
//!
//! These traits enable dependency injection and testing by abstracting
//! the account service and stable storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use psnlink_domain::{PersistedTokens, SessionHandle, TokenPair};

use super::client::ExchangeClientError;
use super::store::StoreError;

/// Trait for token endpoint operations
///
/// Each method performs exactly one outbound call.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchange a session handle for a fresh token pair
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a body
    /// without an access token
    async fn exchange_session(
        &self,
        session: &SessionHandle,
    ) -> Result<TokenPair, ExchangeClientError>;

    /// Exchange a refresh token for a new token pair
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a body
    /// without an access token
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ExchangeClientError>;

    /// Fetch a session handle from the SSO cookie endpoint
    ///
    /// # Errors
    /// Returns error if the endpoint is unreachable or returns no handle
    async fn fetch_session_handle(&self) -> Result<SessionHandle, ExchangeClientError>;
}

/// Trait for durable token persistence
///
/// One record per process; the store is keyed by its location only.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted pair together with its last write time
    ///
    /// Returns `None` when the record is absent or malformed. Never fails.
    async fn load(&self) -> Option<PersistedTokens>;

    /// Persist the full pair atomically
    ///
    /// # Errors
    /// Returns error if the record cannot be encoded or written
    async fn save(&self, pair: &TokenPair) -> Result<(), StoreError>;

    /// Modification time of the persisted record, if any
    async fn last_write_time(&self) -> Option<DateTime<Utc>>;
}

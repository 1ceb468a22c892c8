//! Credential lifecycle for the PlayStation Network account service
//!
//! Turns a long-lived session handle (the NPSSO cookie value) into a
//! short-lived bearer token, persists the token pair, and refreshes it on
//! demand when a caller needs a token and the cached one is stale.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  TokenManager    │  Valid / Expired / Refreshing decisions
//! └────────┬─────────┘
//!          │
//!          ├──► TokenExchange      (token endpoint, SSO cookie endpoint)
//!          │         │
//!          │         └──► TokenExchangeClient  (reqwest, form-encoded)
//!          │
//!          └──► TokenStore         (one record per process)
//!                    │
//!                    └──► FileTokenStore       (JSON, temp file + rename)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use psnlink_common::auth::{FileTokenStore, TokenExchangeClient, TokenManager};
//! use psnlink_domain::{ClientIdentity, SessionHandle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exchange = TokenExchangeClient::new(
//!         ClientIdentity::new("your_client_id", None),
//!         Duration::from_secs(30),
//!     )?;
//!     let store = FileTokenStore::new("data/psn_tokens.json");
//!     let manager =
//!         TokenManager::new(Arc::new(exchange), Arc::new(store), SessionHandle::new("npsso"));
//!
//!     // Acquires on first use, refreshes once when stale.
//!     let tokens = manager.ensure_access_token().await?;
//!     println!("access token expires in {}s", tokens.access.expires_in);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: Token endpoint wire types
//! - **[`traits`]**: `TokenExchange` and `TokenStore` seams
//! - **[`client`]**: HTTP client for the account service
//! - **[`store`]**: File-backed token persistence
//! - **[`token_manager`]**: Lifecycle decisions and refresh gate

pub mod client;
pub mod store;
pub mod token_manager;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use client::{ExchangeClientError, TokenExchangeClient};
pub use store::{FileTokenStore, StoreError};
pub use token_manager::{AuthError, TokenManager};
pub use traits::{TokenExchange, TokenStore};
pub use types::TokenResponse;

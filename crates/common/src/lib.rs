//! Modular common utilities shared across PSNLink crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `runtime`: clock abstraction
//! - `platform`: credential lifecycle (token store, token exchange, manager)
//! - `test-utils`: mock store, mock exchange, controllable clock

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod time;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", all(test, feature = "platform")))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{
    AuthError, ExchangeClientError, FileTokenStore, StoreError, TokenExchange,
    TokenExchangeClient, TokenManager, TokenStore,
};
#[cfg(feature = "runtime")]
pub use time::{Clock, SystemClock};

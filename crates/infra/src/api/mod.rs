//! PSN API client
//!
//! Typed gateway operations over the profile, search and messaging services.
//!
//! # Architecture
//!
//! - Every operation resolves an access token through [`AccessTokenProvider`]
//!   before building its request; no token means no network call
//! - Requests go through [`crate::http::HttpClient`] (one call, no retries)
//! - Binary uploads and downloads go through [`ResourceTransferManager`]
//!
//! [`AccessTokenProvider`]: psnlink_core::AccessTokenProvider

use std::borrow::Cow;

pub mod auth;
pub mod client;
pub mod resources;

pub use auth::PsnAuthService;
pub use client::PsnApiClient;
pub use resources::ResourceTransferManager;

/// Percent-encode a value used as a single URL path segment.
pub(crate) fn path_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

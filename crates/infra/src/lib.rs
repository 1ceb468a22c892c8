//! # PSNLink Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The authenticated HTTP client (bearer auth, normalized results)
//! - Resource upload/download through that client
//! - The PSN gateway client implementing `psnlink_core::PsnGateway`
//! - Configuration loading (environment, TOML, JSON)
//!
//! ## Architecture
//! - Implements traits defined in `psnlink-core`
//! - Depends on `psnlink-common` for the credential lifecycle
//! - Contains all "impure" code (network, filesystem)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{PsnApiClient, PsnAuthService, ResourceTransferManager};
pub use errors::InfraError;
pub use http::{
    CallFailure, CallResult, HttpClient, RequestBody, RequestDescriptor, ResponsePayload,
};

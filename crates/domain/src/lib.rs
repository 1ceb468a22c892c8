//! # PSNLink Domain
//!
//! Domain types and models for the PSNLink facade.
//!
//! This crate contains:
//! - Credential types (Token, TokenPair, PersistedTokens, session handle)
//! - Messaging types (MessagingTarget, ResourceKind, ResourceSource)
//! - Remote payload models (profiles, search results, groups)
//! - Domain error types and Result definitions
//! - Configuration structures and protocol constants
//!
//! ## Architecture
//! - No dependencies on other PSNLink crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

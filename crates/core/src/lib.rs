//! # PSNLink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for token access and the PSN gateway
//! - Message payload construction and resource-kind dispatch
//! - Resource source classification for uploads
//!
//! ## Architecture Principles
//! - Only depends on `psnlink-domain`
//! - No HTTP, filesystem, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod messaging;
pub mod ports;
pub mod resources;

// Re-export specific items to avoid ambiguity
pub use messaging::payload::{
    resource_message, text_message, MessageDetail, MessagePayload, OutboundMessage,
};
pub use ports::{AccessTokenProvider, PsnGateway};
pub use resources::source::classify_source;

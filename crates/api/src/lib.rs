//! # PSNLink API
//!
//! HTTP surface over the PSN gateway.
//!
//! This crate contains:
//! - Route handlers (`commands`), one module per resource area
//! - Application context (dependency injection)
//! - Router assembly with CORS, request tracing and session-header handling
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Handlers only see `psnlink_core::PsnGateway`; wiring happens in
//!   [`AppContext::new`]

pub mod commands;
pub mod context;
pub mod error;
pub mod router;
pub mod utils;

pub use context::AppContext;
pub use error::{ApiError, ApiResult};
pub use router::build_router;

//! Testing utilities and helpers
//!
//! - **[`mocks`]**: In-memory token store and scripted token exchange
//! - **[`temp`]**: File-backed token store rooted in a temporary directory
//! - **[`time`]**: Controllable wall clock
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "test-utils")]
//! # {
//! use std::sync::Arc;
//!
//! use chrono::Duration;
//! use psnlink_common::auth::TokenManager;
//! use psnlink_common::testing::{MockClock, MockTokenExchange, MockTokenStore};
//! use psnlink_domain::SessionHandle;
//!
//! let clock = MockClock::new();
//! let store = Arc::new(MockTokenStore::with_clock(clock.clone()));
//! let exchange = Arc::new(MockTokenExchange::new());
//! let manager = TokenManager::with_clock(
//!     exchange,
//!     store,
//!     SessionHandle::new("npsso"),
//!     Arc::new(clock.clone()),
//! );
//! clock.advance(Duration::seconds(30));
//! # drop(manager);
//! # }
//! ```

pub mod mocks;
pub mod temp;
pub mod time;

pub use mocks::{MockTokenExchange, MockTokenStore};
pub use temp::TempTokenStore;
pub use time::MockClock;

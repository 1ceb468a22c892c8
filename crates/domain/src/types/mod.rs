//! Domain types and models

pub mod messaging;
pub mod psn;
pub mod token;

pub use messaging::{MessagingTarget, ResourceKind, ResourceSource};
pub use psn::*;
pub use token::{redact, ClientIdentity, PersistedTokens, SessionHandle, Token, TokenPair};

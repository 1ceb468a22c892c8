//! Messaging rules
//!
//! Builds the JSON bodies posted to a group thread. Dispatch over
//! [`psnlink_domain::ResourceKind`] lives here so it can be tested without
//! any transport.

pub mod payload;

//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PSNLink
///
/// Every component returns this (or a local error that converts into it);
/// nothing is thrown across component boundaries.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PsnError {
    /// No usable token, and acquisition was never attempted or not possible.
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Token acquisition failed: {0}")]
    AcquisitionFailed(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// No response was received (network error or timeout).
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The remote answered with a non-success status. The raw body is kept
    /// for diagnostics.
    #[error("Remote rejected request (status {status}): {body}")]
    RemoteRejected { status: u16, body: String },

    /// A response arrived but lacked the fields the operation requires.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// Persistence or local file access failed.
    #[error("I/O failure: {0}")]
    IoFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse grouping used by the outward-facing layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Auth,
    Upstream,
    Transport,
    Unsupported,
    Input,
    Local,
}

impl PsnError {
    /// Stable, low-cardinality label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::AcquisitionFailed(_) => "acquisition_failed",
            Self::RefreshFailed(_) => "refresh_failed",
            Self::TransportFailure(_) => "transport_failure",
            Self::RemoteRejected { .. } => "remote_rejected",
            Self::MalformedResponse(_) => "malformed_response",
            Self::UnsupportedVariant(_) => "unsupported_variant",
            Self::IoFailure(_) => "io_failure",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthenticated(_) | Self::RefreshFailed(_) => ErrorCategory::Auth,
            Self::AcquisitionFailed(_)
            | Self::RemoteRejected { .. }
            | Self::MalformedResponse(_) => ErrorCategory::Upstream,
            Self::TransportFailure(_) => ErrorCategory::Transport,
            Self::UnsupportedVariant(_) => ErrorCategory::Unsupported,
            Self::InvalidInput(_) => ErrorCategory::Input,
            Self::IoFailure(_) | Self::Config(_) => ErrorCategory::Local,
        }
    }

    /// Convenience constructor for [`PsnError::RemoteRejected`].
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteRejected { status, body: body.into() }
    }
}

impl From<std::io::Error> for PsnError {
    fn from(err: std::io::Error) -> Self {
        Self::IoFailure(err.to_string())
    }
}

/// Result type alias for PSNLink operations
pub type Result<T> = std::result::Result<T, PsnError>;

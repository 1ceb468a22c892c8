//! Conversions from external infrastructure errors into domain errors.

use psnlink_common::auth::{AuthError, ExchangeClientError};
use psnlink_domain::PsnError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PsnError);

impl From<InfraError> for PsnError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PsnError> for InfraError {
    fn from(value: PsnError) -> Self {
        InfraError(value)
    }
}

trait IntoPsnError {
    fn into_psn(self) -> PsnError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PsnError */
/* -------------------------------------------------------------------------- */

impl IntoPsnError for HttpError {
    fn into_psn(self) -> PsnError {
        if self.is_timeout() {
            return PsnError::TransportFailure("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PsnError::TransportFailure(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return PsnError::rejected(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            );
        }

        if self.is_decode() {
            return PsnError::MalformedResponse(self.to_string());
        }

        PsnError::TransportFailure(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_psn())
    }
}

/* -------------------------------------------------------------------------- */
/* Exchange client errors → PsnError */
/* -------------------------------------------------------------------------- */

impl IntoPsnError for ExchangeClientError {
    fn into_psn(self) -> PsnError {
        match self {
            ExchangeClientError::RequestFailed(err) => err.into_psn(),
            ExchangeClientError::Rejected { status, body } => PsnError::rejected(status, body),
            ExchangeClientError::ParseError(msg) => PsnError::MalformedResponse(msg),
            ExchangeClientError::ConfigError(msg) => PsnError::Config(msg),
        }
    }
}

impl From<ExchangeClientError> for InfraError {
    fn from(value: ExchangeClientError) -> Self {
        InfraError(value.into_psn())
    }
}

impl From<AuthError> for InfraError {
    fn from(value: AuthError) -> Self {
        InfraError(value.into())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

//! Request descriptors and call results

use psnlink_domain::{PsnError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Body of an outbound call. Passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Text(String),
    Binary(Vec<u8>),
}

/// Full description of one outbound call
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: Method,
    pub content_type: Option<String>,
    pub extra_headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            content_type: None,
            extra_headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Text(body.into());
        self
    }

    #[must_use]
    pub fn binary(mut self, body: Vec<u8>) -> Self {
        self.body = RequestBody::Binary(body);
        self
    }
}

/// Successful response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePayload {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ResponsePayload {
    /// Decode the body as JSON.
    ///
    /// # Errors
    /// Returns `MalformedResponse` when the body does not have the expected
    /// shape (including missing required fields)
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            PsnError::MalformedResponse(format!("{e}; body: {}", self.text_lossy()))
        })
    }

    #[must_use]
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Why a call produced no successful response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    /// Rejected before any request was built: the token was empty.
    MissingToken,
    /// The server answered with a non-success status.
    Rejected { status: u16, body: String },
    /// No response was received (connect error, timeout).
    NoResponse(String),
    /// The request could not be constructed.
    Construction(String),
}

impl CallFailure {
    /// Raw response body, when the server sent one.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<CallFailure> for PsnError {
    fn from(failure: CallFailure) -> Self {
        match failure {
            CallFailure::MissingToken => Self::Unauthenticated("access token is empty".to_string()),
            CallFailure::Rejected { status, body } => Self::RemoteRejected { status, body },
            CallFailure::NoResponse(reason) => Self::TransportFailure(reason),
            CallFailure::Construction(reason) => {
                Self::TransportFailure(format!("request could not be built: {reason}"))
            }
        }
    }
}

/// Outcome of [`crate::http::HttpClient::call`]
pub type CallResult = std::result::Result<ResponsePayload, CallFailure>;

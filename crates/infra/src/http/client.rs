use std::time::Duration;

use psnlink_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use psnlink_domain::{PsnError, Token};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Response};
use tracing::{debug, instrument};

use super::request::{CallFailure, CallResult, RequestBody, RequestDescriptor, ResponsePayload};
use crate::errors::InfraError;

/// HTTP client that performs exactly one authenticated call per request.
///
/// Non-success statuses are returned as [`CallFailure::Rejected`] with the
/// raw body, never retried.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, PsnError> {
        Self::builder().build()
    }

    /// Perform one bearer-authenticated call.
    ///
    /// An empty access token is rejected before any request is built.
    /// `Authorization` always carries the supplied token; an
    /// `Authorization` entry in `extra_headers` is ignored.
    #[instrument(
        skip(self, descriptor, token),
        fields(method = %descriptor.method, url = %descriptor.url)
    )]
    pub async fn call(&self, descriptor: &RequestDescriptor, token: &Token) -> CallResult {
        if token.is_empty() {
            debug!("refusing call without an access token");
            return Err(CallFailure::MissingToken);
        }

        let headers = build_headers(descriptor, token)?;
        let mut builder =
            self.client.request(descriptor.method.clone(), &descriptor.url).headers(headers);
        builder = match &descriptor.body {
            RequestBody::Empty => builder,
            RequestBody::Text(text) => builder.body(text.clone()),
            RequestBody::Binary(bytes) => builder.body(bytes.clone()),
        };

        let request = builder.build().map_err(|err| CallFailure::Construction(err.to_string()))?;

        debug!("sending HTTP request");
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "HTTP request failed");
                if err.is_builder() {
                    return Err(CallFailure::Construction(err.to_string()));
                }
                let err = PsnError::from(InfraError::from(err));
                return Err(CallFailure::NoResponse(err.to_string()));
            }
        };

        read_response(response).await
    }

    /// Unauthenticated GET, used to pull remote images before upload.
    #[instrument(skip(self))]
    pub async fn fetch_public(&self, url: &str) -> CallResult {
        let response = self.client.get(url).send().await.map_err(|err| {
            debug!(error = %err, "public fetch failed");
            if err.is_builder() {
                CallFailure::Construction(err.to_string())
            } else {
                CallFailure::NoResponse(PsnError::from(InfraError::from(err)).to_string())
            }
        })?;

        read_response(response).await
    }
}

async fn read_response(response: Response) -> CallResult {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    let body = response
        .bytes()
        .await
        .map_err(|err| CallFailure::NoResponse(format!("failed to read response body: {err}")))?;

    debug!(%status, bytes = body.len(), "received HTTP response");

    if !status.is_success() {
        return Err(CallFailure::Rejected {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    Ok(ResponsePayload { status: status.as_u16(), content_type, body: body.to_vec() })
}

fn build_headers(descriptor: &RequestDescriptor, token: &Token) -> Result<HeaderMap, CallFailure> {
    let mut headers = HeaderMap::new();

    if let Some(content_type) = &descriptor.content_type {
        headers.insert(CONTENT_TYPE, header_value(content_type)?);
    }

    for (name, value) in &descriptor.extra_headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            CallFailure::Construction(format!("invalid header name {name:?}: {err}"))
        })?;
        if name == AUTHORIZATION {
            continue;
        }
        headers.insert(name, header_value(value)?);
    }

    headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token.value))?);

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, CallFailure> {
    HeaderValue::from_str(value)
        .map_err(|err| CallFailure::Construction(format!("invalid header value: {err}")))
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, PsnError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            PsnError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}

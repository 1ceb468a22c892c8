//! Authenticated HTTP dispatch
//!
//! One outbound call per invocation, bearer authorization, and a
//! normalized result. No retries happen at this layer.

pub mod client;
pub mod request;

pub use client::{HttpClient, HttpClientBuilder};
pub use request::{CallFailure, CallResult, RequestBody, RequestDescriptor, ResponsePayload};

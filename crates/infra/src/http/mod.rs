//! HTTP plumbing for the portal backend
//!
//! [`HttpClient`] owns the reqwest client and its cookie jar. [`ApiTransport`]
//! sits on top of it and turns every response into an
//! [`ApiEnvelope`](talentfolio_domain::ApiEnvelope).

pub mod client;
pub mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::{ApiTransport, RawResponse, RequestBody, RequestOptions};

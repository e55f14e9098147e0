//! # Talentfolio Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP client and envelope-normalizing transport
//! - HTTP implementations of `UserGateway` and `AuthGateway`
//! - The configuration loader
//!
//! ## Architecture
//! - Implements traits defined in `talentfolio-core`
//! - Depends on `talentfolio-domain` and `talentfolio-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{HttpAuthGateway, HttpUserGateway};
pub use errors::InfraError;
pub use http::{ApiTransport, HttpClient, HttpClientBuilder, RawResponse, RequestBody, RequestOptions};

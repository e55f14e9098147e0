//! HTTP implementations of the core gateway ports
//!
//! Both gateways share one [`ApiTransport`](crate::http::ApiTransport), so they
//! share the cookie jar and the unauthorized registry.

pub mod auth;
pub mod user;

pub use auth::HttpAuthGateway;
pub use user::HttpUserGateway;

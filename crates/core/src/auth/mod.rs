//! Authentication endpoints

pub mod ports;

pub use ports::AuthGateway;

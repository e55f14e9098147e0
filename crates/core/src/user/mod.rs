//! User profile sub-resources

pub mod ports;

pub use ports::UserGateway;

//! # Talentfolio App
//!
//! Application layer for the candidate portal client.
//!
//! This crate contains:
//! - Commands (UI shell → client bridge)
//! - Application context (dependency injection)
//! - Tracing setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;

use talentfolio_domain::Result;
use tracing::info;

/// Load configuration, install the subscriber and build the context.
///
/// # Errors
/// Returns `PortalError::Config` when the configuration cannot be read or
/// names an unusable backend.
pub fn bootstrap() -> Result<AppContext> {
    let config = talentfolio_infra::config::load()?;
    utils::logging::init_tracing(&config.logging);
    info!(api = %config.api.base_url, "starting talentfolio client");
    AppContext::new(config)
}

//! # Talentfolio Domain
//!
//! Business domain types and models for the Talentfolio candidate portal.
//!
//! This crate contains:
//! - Wire types for the backend contract (User, WorkItem, EducationItem, ...)
//! - The `{success, data}` response envelope and its error payload
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and pure helpers (countries, display names)
//!
//! ## Architecture
//! - No dependencies on other Talentfolio crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod envelope;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use envelope::{ApiEnvelope, ErrorPayload, FieldErrorMap};
pub use errors::*;
pub use types::*;

//! Modular common utilities shared across Talentfolio crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: field validation (OTP, password, phone, country, URL)
//! - `runtime`: timers on the tokio clock (form cooldowns)
//! - `observability`: optional tracing (not included by default)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod validation;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod time;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use time::Cooldown;
#[cfg(feature = "foundation")]
pub use validation::{
    FieldValidator, OtpValidator, PasswordValidator, PhoneValidator, RangeValidator,
    StringValidator, UrlValidator, ValidationError, ValidationResult, Validator,
};

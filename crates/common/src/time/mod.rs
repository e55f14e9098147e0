//! Time utilities
//!
//! - **[`cooldown`]**: per-form countdowns (rate limits, OTP resend)
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "runtime")]
//! # {
//! use talentfolio_common::time::Cooldown;
//!
//! let cooldown = Cooldown::new();
//! assert!(!cooldown.is_active());
//! # }
//! ```

pub mod cooldown;

pub use cooldown::Cooldown;

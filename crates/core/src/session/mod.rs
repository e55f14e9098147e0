//! Session lifecycle: 401 fan-out, teardown and navigation

pub mod expiry;
pub mod navigator;
pub mod referral;
pub mod registry;

pub use expiry::{expired_signin_target, session_expiry_handler};
pub use navigator::{Navigator, RecordingNavigator};
pub use referral::ReferralTracker;
pub use registry::{Registration, UnauthorizedHandler, UnauthorizedRegistry};

//! # Talentfolio Core
//!
//! Client-side business logic for the candidate portal.
//!
//! This crate contains:
//! - Port interfaces for the backend (`UserGateway`, `AuthGateway`) and the
//!   router (`Navigator`)
//! - The profile store and the editor that writes it
//! - The unauthorized-handler registry and session teardown
//! - Signup, sign-in, password reset, onboarding and settings flows
//! - The route guard
//!
//! ## Architecture Principles
//! - Only depends on `talentfolio-common` and `talentfolio-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod auth;
pub mod flows;
pub mod profile;
pub mod routing;
pub mod session;
pub mod user;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::AuthGateway;
pub use flows::{
    ChangeEmailFlow, ChangePasswordFlow, ChangePhoneFlow, DeleteAccountFlow, ForgotPasswordFlow,
    OnboardingWizard, RateLimitGate, SigninFlow, SignupFlow,
};
pub use profile::{ProfileEditor, ProfileEvent, ProfileState, ProfileStore};
pub use routing::{evaluate, has_session_cookie, GuardDecision};
pub use session::{
    session_expiry_handler, Navigator, RecordingNavigator, ReferralTracker, UnauthorizedRegistry,
};
pub use user::UserGateway;

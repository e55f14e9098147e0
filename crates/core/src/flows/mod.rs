//! Multi-step user journeys
//!
//! Each flow owns its step and cooldown state and drives the gateways, the
//! profile store and the navigator. Local checks always run before any
//! request and fail with [`PortalError::Validation`].

pub mod forgot_password;
pub mod onboarding;
pub mod settings;
pub mod signin;
pub mod signup;

use talentfolio_common::{Cooldown, Validator};
use talentfolio_domain::{PortalError, Result};
use tracing::warn;

pub use forgot_password::{ForgotPasswordFlow, ForgotPasswordStep};
pub use onboarding::{EducationDraft, ExperienceDraft, OnboardingStep, OnboardingWizard};
pub use settings::{
    ChangeEmailFlow, ChangePasswordFlow, ChangePhoneFlow, DeleteAccountFlow, DeleteStep, OtpStep,
};
pub use signin::SigninFlow;
pub use signup::{SignupFlow, SignupForm, SignupStep};

/// Turn the first failed check into a user-facing validation error.
pub(crate) fn validated(validator: Validator) -> Result<()> {
    validator.finalize().map_err(|errors| {
        PortalError::Validation(
            errors.first_message().map_or_else(|| errors.to_string(), str::to_string),
        )
    })
}

/// Blocks a form while the backend's rate limit is in force
#[derive(Debug, Clone, Default)]
pub struct RateLimitGate {
    cooldown: Cooldown,
}

impl RateLimitGate {
    pub const fn new() -> Self {
        Self { cooldown: Cooldown::new() }
    }

    /// Fail with [`PortalError::CoolingDown`] while the timer runs.
    pub fn check(&self) -> Result<()> {
        match self.cooldown.remaining_secs() {
            0 => Ok(()),
            remaining_secs => Err(PortalError::CoolingDown { remaining_secs }),
        }
    }

    /// Start the timer when `result` is a 429; pass `result` through.
    pub fn observe<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if let Some(secs) = err.retry_after_secs() {
                warn!(retry_after_secs = secs, "rate limited; starting cooldown");
                self.cooldown.start(secs);
            }
        }
        result
    }

    pub const fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }
}

#[cfg(test)]
mod tests {
    use talentfolio_domain::constants::RATE_LIMIT_MESSAGE;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn gate_blocks_until_retry_after_elapses() {
        let mut gate = RateLimitGate::new();
        let limited: Result<()> = Err(PortalError::RateLimited {
            message: RATE_LIMIT_MESSAGE.into(),
            retry_after_secs: 5,
        });

        assert!(gate.observe(limited).is_err());
        assert_eq!(gate.check(), Err(PortalError::CoolingDown { remaining_secs: 5 }));

        tokio::time::advance(std::time::Duration::from_secs(5)).await;
        assert!(gate.check().is_ok());
    }

    #[test]
    fn other_errors_do_not_start_cooldown() {
        let mut gate = RateLimitGate::new();
        let _ = gate.observe::<()>(Err(PortalError::api("Invalid OTP")));
        assert!(gate.check().is_ok());
    }

    #[test]
    fn validated_reports_first_message() {
        let mut v = Validator::new();
        v.ensure(false, "otp", "OTP must be 6 digits.").ensure(false, "password", "short");
        assert_eq!(validated(v), Err(PortalError::Validation("OTP must be 6 digits.".into())));
    }
}

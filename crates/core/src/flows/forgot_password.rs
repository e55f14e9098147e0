//! Password reset by email OTP

use std::sync::Arc;

use talentfolio_common::{Cooldown, PasswordValidator, Validator};
use talentfolio_domain::constants::{MIN_PASSWORD_LENGTH, RESEND_COOLDOWN_SECS, ROUTE_SIGNIN};
use talentfolio_domain::{ForgotPasswordRequest, OtpReason, PortalError, Result};
use tracing::{info, instrument};

use super::{validated, RateLimitGate};
use crate::auth::AuthGateway;
use crate::session::Navigator;

const EMAIL_REQUIRED: &str = "Please enter your email.";
const FILL_ALL_FIELDS: &str = "Please fill all fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotPasswordStep {
    Request,
    Reset,
    Done,
}

pub struct ForgotPasswordFlow {
    auth: Arc<dyn AuthGateway>,
    navigator: Arc<dyn Navigator>,
    step: ForgotPasswordStep,
    email: String,
    resend: Cooldown,
    gate: RateLimitGate,
}

impl ForgotPasswordFlow {
    pub fn new(auth: Arc<dyn AuthGateway>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            step: ForgotPasswordStep::Request,
            email: String::new(),
            resend: Cooldown::new(),
            gate: RateLimitGate::new(),
        }
    }

    pub const fn step(&self) -> ForgotPasswordStep {
        self.step
    }

    /// Timer gating [`Self::resend`]
    pub const fn resend_cooldown(&self) -> &Cooldown {
        &self.resend
    }

    async fn send_otp(&mut self) -> Result<()> {
        self.gate.check()?;
        let sent = self.auth.request_email_otp(&self.email, OtpReason::ForgetPassword).await;
        self.gate.observe(sent)?;
        self.resend.start(RESEND_COOLDOWN_SECS);
        Ok(())
    }

    /// Email a reset OTP and move to the reset step.
    #[instrument(skip(self))]
    pub async fn request_otp(&mut self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(PortalError::Validation(EMAIL_REQUIRED.to_string()));
        }
        email.clone_into(&mut self.email);
        self.send_otp().await?;
        self.step = ForgotPasswordStep::Reset;
        Ok(())
    }

    /// Send the OTP again once the resend timer has run out.
    #[instrument(skip(self))]
    pub async fn resend(&mut self) -> Result<()> {
        if self.step != ForgotPasswordStep::Reset {
            return Err(PortalError::InvalidState("no reset in progress".to_string()));
        }
        match self.resend.remaining_secs() {
            0 => self.send_otp().await,
            remaining_secs => Err(PortalError::CoolingDown { remaining_secs }),
        }
    }

    /// Go back and enter a different email.
    pub fn back_to_request(&mut self) {
        self.step = ForgotPasswordStep::Request;
        self.resend.clear();
    }

    /// Set the new password and return to sign-in.
    #[instrument(skip(self, otp, new_password))]
    pub async fn reset(&mut self, otp: &str, new_password: &str) -> Result<()> {
        if self.step != ForgotPasswordStep::Reset {
            return Err(PortalError::InvalidState("request an OTP first".to_string()));
        }
        let otp = otp.trim();

        let mut v = Validator::new().stop_on_first_error();
        v.ensure(!otp.is_empty() && !new_password.trim().is_empty(), "form", FILL_ALL_FIELDS)
            .validate_field("new_password", new_password, &PasswordValidator::new(MIN_PASSWORD_LENGTH));
        validated(v)?;
        self.gate.check()?;

        let request = ForgotPasswordRequest {
            email: self.email.clone(),
            otp: otp.to_string(),
            new_password: new_password.to_string(),
        };
        let reset = self.auth.forgot_password(&request).await;
        self.gate.observe(reset)?;

        self.step = ForgotPasswordStep::Done;
        info!("password reset");
        self.navigator.navigate(ROUTE_SIGNIN);
        Ok(())
    }
}

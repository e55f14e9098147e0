//! Account settings changes gated by an OTP
//!
//! Every flow is request → confirm. Email and password changes end the
//! session; deleting the account additionally asks for an explicit final
//! confirmation before the destructive call.

use std::sync::Arc;

use futures::future::join;
use talentfolio_common::validation::digits_only;
use talentfolio_common::{OtpValidator, PasswordValidator, Validator};
use talentfolio_domain::constants::{
    MIN_PASSWORD_LENGTH, MIN_PHONE_DIGITS, OTP_LENGTH, ROUTE_HOME, ROUTE_SIGNIN,
};
use talentfolio_domain::{
    ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest, DeleteAccountRequest,
    ErrorPayload, OtpReason, PortalError, Result,
};
use tracing::{info, instrument, warn};

use super::{validated, RateLimitGate};
use crate::auth::AuthGateway;
use crate::profile::ProfileStore;
use crate::session::Navigator;

/// Progress of an OTP-gated change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStep {
    Request,
    Confirm,
    Done,
}

fn check_otp(field: &str, otp: &str) -> Result<()> {
    let mut v = Validator::new();
    v.validate_field(field, otp, &OtpValidator::new(OTP_LENGTH));
    validated(v)
}

fn check_password(field: &str, password: &str) -> Result<()> {
    let mut v = Validator::new();
    v.validate_field(field, password, &PasswordValidator::new(MIN_PASSWORD_LENGTH));
    validated(v)
}

fn expect(step: OtpStep, expected: OtpStep) -> Result<()> {
    if step == expected {
        Ok(())
    } else {
        Err(PortalError::InvalidState(format!("expected {expected:?}, at {step:?}")))
    }
}

fn signed_in_email(store: &ProfileStore) -> Result<String> {
    store
        .user()
        .map(|user| user.email)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| PortalError::InvalidState("no signed-in user".to_string()))
}

/// Ends the session locally once the backend has invalidated it.
fn end_session(store: &ProfileStore, navigator: &dyn Navigator, target: &str) {
    store.clear_profile();
    navigator.navigate(target);
}

/// Change the login email; OTPs go to both addresses.
pub struct ChangeEmailFlow {
    auth: Arc<dyn AuthGateway>,
    store: Arc<ProfileStore>,
    navigator: Arc<dyn Navigator>,
    step: OtpStep,
    old_email: String,
    new_email: String,
    gate: RateLimitGate,
}

impl ChangeEmailFlow {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        store: Arc<ProfileStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            store,
            navigator,
            step: OtpStep::Request,
            old_email: String::new(),
            new_email: String::new(),
            gate: RateLimitGate::new(),
        }
    }

    pub const fn step(&self) -> OtpStep {
        self.step
    }

    #[instrument(skip(self))]
    pub async fn request(&mut self, old_email: &str, new_email: &str) -> Result<()> {
        self.gate.check()?;
        let old_email = old_email.trim();
        let new_email = new_email.trim();

        let mut v = Validator::new().stop_on_first_error();
        v.ensure(
            !old_email.is_empty() && !new_email.is_empty(),
            "email",
            "Please enter both current and new email.",
        )
        .ensure(
            !old_email.eq_ignore_ascii_case(new_email),
            "new_email",
            "New email must be different from current email.",
        );
        validated(v)?;

        let (old_sent, new_sent) = join(
            self.auth.request_email_otp(old_email, OtpReason::ChangeEmail),
            self.auth.request_email_otp(new_email, OtpReason::ChangeEmail),
        )
        .await;
        self.gate.observe(old_sent.and(new_sent))?;

        old_email.clone_into(&mut self.old_email);
        new_email.clone_into(&mut self.new_email);
        self.step = OtpStep::Confirm;
        Ok(())
    }

    /// Apply the change and sign out.
    #[instrument(skip(self, otp_old_email, otp_new_email))]
    pub async fn confirm(&mut self, otp_old_email: &str, otp_new_email: &str) -> Result<()> {
        expect(self.step, OtpStep::Confirm)?;
        self.gate.check()?;
        check_otp("otp_old_email", otp_old_email.trim())?;
        check_otp("otp_new_email", otp_new_email.trim())?;

        let request = ChangeEmailRequest {
            old_email: self.old_email.clone(),
            new_email: self.new_email.clone(),
            otp_old_email: otp_old_email.trim().to_string(),
            otp_new_email: otp_new_email.trim().to_string(),
        };
        let changed = self.auth.change_email(&request).await;
        self.gate.observe(changed)?;

        info!("email changed; signing out");
        self.step = OtpStep::Done;
        end_session(&self.store, self.navigator.as_ref(), ROUTE_SIGNIN);
        Ok(())
    }
}

/// Change the password; the OTP goes to the account email.
pub struct ChangePasswordFlow {
    auth: Arc<dyn AuthGateway>,
    store: Arc<ProfileStore>,
    navigator: Arc<dyn Navigator>,
    step: OtpStep,
    old_password: String,
    new_password: String,
    gate: RateLimitGate,
}

impl ChangePasswordFlow {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        store: Arc<ProfileStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            store,
            navigator,
            step: OtpStep::Request,
            old_password: String::new(),
            new_password: String::new(),
            gate: RateLimitGate::new(),
        }
    }

    pub const fn step(&self) -> OtpStep {
        self.step
    }

    #[instrument(skip_all)]
    pub async fn request(&mut self, old_password: &str, new_password: &str) -> Result<()> {
        self.gate.check()?;
        if old_password.is_empty() {
            return Err(PortalError::Validation("Please enter your current password.".to_string()));
        }
        check_password("new_password", new_password)?;
        let email = signed_in_email(&self.store)?;

        let sent = self.auth.request_email_otp(&email, OtpReason::ChangePassword).await;
        self.gate.observe(sent)?;

        old_password.clone_into(&mut self.old_password);
        new_password.clone_into(&mut self.new_password);
        self.step = OtpStep::Confirm;
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn confirm(&mut self, otp: &str) -> Result<()> {
        expect(self.step, OtpStep::Confirm)?;
        self.gate.check()?;
        let otp = otp.trim();
        check_otp("otp", otp)?;

        let request = ChangePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
            otp: otp.to_string(),
        };
        let changed = self.auth.change_password(&request).await;
        self.gate.observe(changed)?;

        info!("password changed; signing out");
        self.step = OtpStep::Done;
        self.old_password.clear();
        self.new_password.clear();
        end_session(&self.store, self.navigator.as_ref(), ROUTE_SIGNIN);
        Ok(())
    }

    /// Backend message for one of `old_password`, `new_password` or `otp`.
    pub fn field_error(err: &PortalError, field: &str) -> Option<String> {
        match err {
            PortalError::Api(payload @ ErrorPayload::FieldErrors(_)) => payload.field(field),
            _ => None,
        }
    }
}

/// Change the phone number; the OTP goes to the new number.
pub struct ChangePhoneFlow {
    auth: Arc<dyn AuthGateway>,
    store: Arc<ProfileStore>,
    step: OtpStep,
    phone: String,
    gate: RateLimitGate,
}

impl ChangePhoneFlow {
    pub fn new(auth: Arc<dyn AuthGateway>, store: Arc<ProfileStore>) -> Self {
        Self { auth, store, step: OtpStep::Request, phone: String::new(), gate: RateLimitGate::new() }
    }

    pub const fn step(&self) -> OtpStep {
        self.step
    }

    #[instrument(skip(self))]
    pub async fn request(&mut self, phone: &str) -> Result<()> {
        self.gate.check()?;
        let phone = phone.trim();
        if digits_only(phone).len() < MIN_PHONE_DIGITS {
            return Err(PortalError::Validation(format!(
                "Please enter a valid phone number (at least {MIN_PHONE_DIGITS} digits)."
            )));
        }

        let sent = self.auth.request_phone_otp(phone).await;
        self.gate.observe(sent)?;

        phone.clone_into(&mut self.phone);
        self.step = OtpStep::Confirm;
        Ok(())
    }

    /// Verify the OTP and merge the new number into the profile.
    #[instrument(skip_all)]
    pub async fn confirm(&mut self, otp: &str) -> Result<()> {
        expect(self.step, OtpStep::Confirm)?;
        self.gate.check()?;
        let otp = otp.trim();
        check_otp("otp", otp)?;
        let numeric = otp.parse::<u32>().map_err(|e| PortalError::Validation(e.to_string()))?;

        let request = ChangePhoneRequest { phone: self.phone.clone(), otp: numeric };
        let changed = self.auth.change_phone(&request).await;
        self.gate.observe(changed)?;

        self.store.set_user_phone(self.phone.clone());
        self.step = OtpStep::Done;
        Ok(())
    }

    /// Start over with a different number.
    pub fn edit_number(&mut self) {
        self.step = OtpStep::Request;
    }
}

/// Progress of account deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStep {
    Password,
    Otp,
    /// OTP accepted locally; waiting for the final "delete" click
    Confirm,
    Deleted,
}

pub struct DeleteAccountFlow {
    auth: Arc<dyn AuthGateway>,
    store: Arc<ProfileStore>,
    navigator: Arc<dyn Navigator>,
    step: DeleteStep,
    email: String,
    password: String,
    otp: String,
    gate: RateLimitGate,
}

impl DeleteAccountFlow {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        store: Arc<ProfileStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            store,
            navigator,
            step: DeleteStep::Password,
            email: String::new(),
            password: String::new(),
            otp: String::new(),
            gate: RateLimitGate::new(),
        }
    }

    pub const fn step(&self) -> DeleteStep {
        self.step
    }

    #[instrument(skip_all)]
    pub async fn request(&mut self, password: &str) -> Result<()> {
        self.gate.check()?;
        check_password("password", password)?;
        let email = signed_in_email(&self.store)?;

        let sent = self.auth.request_email_otp(&email, OtpReason::DeleteAccount).await;
        self.gate.observe(sent)?;

        self.email = email;
        password.clone_into(&mut self.password);
        self.step = DeleteStep::Otp;
        Ok(())
    }

    /// Accept the OTP locally and ask for final confirmation.
    pub fn confirm(&mut self, otp: &str) -> Result<()> {
        if self.step != DeleteStep::Otp {
            return Err(PortalError::InvalidState(format!("expected Otp, at {:?}", self.step)));
        }
        let otp = otp.trim();
        check_otp("otp", otp)?;
        otp.clone_into(&mut self.otp);
        self.step = DeleteStep::Confirm;
        Ok(())
    }

    /// Back out of the final confirmation.
    pub fn cancel(&mut self) {
        if self.step == DeleteStep::Confirm {
            self.step = DeleteStep::Otp;
        }
    }

    /// Delete the account, clear local state and leave for the landing page.
    #[instrument(skip_all)]
    pub async fn execute(&mut self) -> Result<()> {
        if self.step != DeleteStep::Confirm {
            return Err(PortalError::InvalidState(format!("expected Confirm, at {:?}", self.step)));
        }
        self.gate.check()?;

        let request = DeleteAccountRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            otp: self.otp.clone(),
        };
        let deleted = self.auth.delete_account(&request).await;
        let response = self.gate.observe(deleted).inspect_err(|err| {
            warn!(error = %err, "account deletion failed");
        })?;

        info!(message = %response.message, "account deleted");
        self.step = DeleteStep::Deleted;
        self.password.clear();
        end_session(&self.store, self.navigator.as_ref(), ROUTE_HOME);
        Ok(())
    }
}

//! Email + OTP signup

use std::sync::Arc;

use talentfolio_common::{OtpValidator, PasswordValidator, Validator};
use talentfolio_domain::constants::{MIN_PASSWORD_LENGTH, OTP_LENGTH, ROUTE_ONBOARDING};
use talentfolio_domain::{OtpReason, PortalError, Result, SignupRequest};
use tracing::{info, instrument};

use super::{validated, RateLimitGate};
use crate::auth::AuthGateway;
use crate::profile::{AuthIdentity, ProfileStore};
use crate::session::{Navigator, ReferralTracker};

const FILL_ALL_FIELDS: &str = "Please fill all fields. OTP must be 6 digits.";
const EMAIL_REQUIRED: &str = "Please enter your email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    AwaitingEmail,
    AwaitingOtp,
    Complete,
}

/// Second-step form, submitted with the OTP from the email
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub otp: String,
    pub referred_by: Option<String>,
}

pub struct SignupFlow {
    auth: Arc<dyn AuthGateway>,
    store: Arc<ProfileStore>,
    navigator: Arc<dyn Navigator>,
    step: SignupStep,
    email: String,
    gate: RateLimitGate,
    referrals: Arc<ReferralTracker>,
}

impl SignupFlow {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        store: Arc<ProfileStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            store,
            navigator,
            step: SignupStep::AwaitingEmail,
            email: String::new(),
            gate: RateLimitGate::new(),
            referrals: Arc::new(ReferralTracker::new()),
        }
    }

    /// Share the tracker that records `?ref=` codes.
    #[must_use]
    pub fn with_referrals(mut self, referrals: Arc<ReferralTracker>) -> Self {
        self.referrals = referrals;
        self
    }

    pub const fn step(&self) -> SignupStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub const fn gate(&self) -> &RateLimitGate {
        &self.gate
    }

    /// Send the signup OTP to `email` and move to the OTP step.
    #[instrument(skip(self))]
    pub async fn request_otp(&mut self, email: &str) -> Result<()> {
        self.gate.check()?;
        let email = email.trim();
        if email.is_empty() {
            return Err(PortalError::Validation(EMAIL_REQUIRED.to_string()));
        }

        let sent = self.auth.request_email_otp(email, OtpReason::Signup).await;
        self.gate.observe(sent)?;

        email.clone_into(&mut self.email);
        self.step = SignupStep::AwaitingOtp;
        Ok(())
    }

    /// Return to the email step, e.g. to fix a typo.
    pub fn change_email(&mut self) {
        if self.step == SignupStep::AwaitingOtp {
            self.step = SignupStep::AwaitingEmail;
        }
    }

    /// Create the account, seed the profile and continue to onboarding.
    ///
    /// A blank `referred_by` falls back to the captured referral code.
    #[instrument(skip(self, form))]
    pub async fn complete(&mut self, form: SignupForm) -> Result<()> {
        if self.step != SignupStep::AwaitingOtp {
            return Err(PortalError::InvalidState("request an OTP first".to_string()));
        }
        self.gate.check()?;

        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        let otp = form.otp.trim();

        let mut v = Validator::new().stop_on_first_error();
        v.ensure(
            !first_name.is_empty() && !last_name.is_empty() && !form.password.is_empty(),
            "form",
            FILL_ALL_FIELDS,
        )
        .check("otp", otp, &OtpValidator::new(OTP_LENGTH), FILL_ALL_FIELDS)
        .validate_field("password", form.password.as_str(), &PasswordValidator::new(MIN_PASSWORD_LENGTH));
        validated(v)?;

        let request = SignupRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: self.email.clone(),
            password: form.password,
            otp: otp.to_string(),
            referred_by: form
                .referred_by
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .or_else(|| self.referrals.pending()),
        };
        let created = self.auth.signup(&request).await;
        self.gate.observe(created)?;
        self.referrals.clear();

        self.store.set_user_from_auth(AuthIdentity {
            name: format!("{first_name} {last_name}"),
            email: self.email.clone(),
        });
        self.step = SignupStep::Complete;
        info!("account created");
        self.navigator.navigate(ROUTE_ONBOARDING);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::RecordingNavigator;
    use crate::testing::{FakeAuthGateway, FakeUserGateway};

    struct Harness {
        auth: Arc<FakeAuthGateway>,
        store: Arc<ProfileStore>,
        nav: Arc<RecordingNavigator>,
        flow: SignupFlow,
    }

    fn harness() -> Harness {
        let auth = Arc::new(FakeAuthGateway::new());
        let store = Arc::new(ProfileStore::new(Arc::new(FakeUserGateway::new())));
        let nav = Arc::new(RecordingNavigator::at("/signup"));
        let flow = SignupFlow::new(auth.clone(), Arc::clone(&store), nav.clone());
        Harness { auth, store, nav, flow }
    }

    fn form(otp: &str, password: &str) -> SignupForm {
        SignupForm {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            password: password.into(),
            otp: otp.into(),
            referred_by: None,
        }
    }

    #[tokio::test]
    async fn happy_path_seeds_store_and_goes_to_onboarding() {
        let mut h = harness();
        h.flow.request_otp(" ada@b.com ").await.unwrap();
        assert_eq!(h.flow.step(), SignupStep::AwaitingOtp);

        h.flow.complete(form("123456", "longpassword")).await.unwrap();

        let user = h.store.user().unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@b.com");
        assert_eq!(h.nav.last().as_deref(), Some("/onboarding"));
        let body = &h.auth.calls_to("signup")[0].body;
        assert_eq!(body["email"], "ada@b.com");
        assert!(body.get("referred_by").is_none());
    }

    #[tokio::test]
    async fn short_otp_is_rejected_before_any_request() {
        let mut h = harness();
        h.flow.request_otp("ada@b.com").await.unwrap();

        let err = h.flow.complete(form("123", "longpassword")).await.unwrap_err();

        assert_eq!(err, PortalError::Validation(FILL_ALL_FIELDS.into()));
        assert!(h.auth.calls_to("signup").is_empty());
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let mut h = harness();
        h.flow.request_otp("ada@b.com").await.unwrap();

        let err = h.flow.complete(form("123456", "short")).await.unwrap_err();

        assert_eq!(err.to_string(), "Password must be at least 8 characters.");
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_keeps_step_and_blocks_resubmission() {
        let mut h = harness();
        h.flow.request_otp("ada@b.com").await.unwrap();
        h.auth.rate_limit("signup", 60);

        let err = h.flow.complete(form("123456", "longpassword")).await.unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(h.flow.step(), SignupStep::AwaitingOtp);
        assert_eq!(h.flow.gate().cooldown().remaining_secs(), 60);

        let blocked = h.flow.complete(form("123456", "longpassword")).await.unwrap_err();
        assert!(matches!(blocked, PortalError::CoolingDown { .. }));
        assert_eq!(h.auth.calls_to("signup").len(), 1);

        tokio::time::advance(Duration::from_secs(60)).await;
        h.flow.complete(form("123456", "longpassword")).await.unwrap();
        assert_eq!(h.flow.step(), SignupStep::Complete);
    }

    #[tokio::test]
    async fn captured_referral_is_sent_once() {
        let tracker = Arc::new(ReferralTracker::new());
        tracker.capture("ref=65f1a2");
        let mut h = harness();
        h.flow = SignupFlow::new(h.auth.clone(), Arc::clone(&h.store), h.nav.clone())
            .with_referrals(Arc::clone(&tracker));
        h.flow.request_otp("ada@b.com").await.unwrap();

        h.flow.complete(form("123456", "longpassword")).await.unwrap();

        assert_eq!(h.auth.calls_to("signup")[0].body["referred_by"], "65f1a2");
        assert_eq!(tracker.pending(), None);
    }

    #[tokio::test]
    async fn typed_referral_wins_over_captured_one() {
        let tracker = Arc::new(ReferralTracker::new());
        tracker.capture("ref=from-link");
        let mut h = harness();
        h.flow = SignupFlow::new(h.auth.clone(), Arc::clone(&h.store), h.nav.clone())
            .with_referrals(tracker);
        h.flow.request_otp("ada@b.com").await.unwrap();

        let mut typed = form("123456", "longpassword");
        typed.referred_by = Some(" typed ".into());
        h.flow.complete(typed).await.unwrap();

        assert_eq!(h.auth.calls_to("signup")[0].body["referred_by"], "typed");
    }

    #[tokio::test]
    async fn complete_requires_otp_step() {
        let mut h = harness();
        let err = h.flow.complete(form("123456", "longpassword")).await.unwrap_err();
        assert!(matches!(err, PortalError::InvalidState(_)));
    }
}

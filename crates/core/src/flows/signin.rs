//! Password sign-in and social login redirects

use std::sync::Arc;

use talentfolio_domain::constants::{DEFAULT_DISPLAY_NAME, ROUTE_PROFILE};
use talentfolio_domain::{LoginRequest, OAuthProvider, PortalError, Result};
use tracing::{info, instrument};

use super::RateLimitGate;
use crate::auth::AuthGateway;
use crate::profile::{AuthIdentity, ProfileStore};
use crate::session::Navigator;

const CREDENTIALS_REQUIRED: &str = "Please enter your email and password.";

pub struct SigninFlow {
    auth: Arc<dyn AuthGateway>,
    store: Arc<ProfileStore>,
    navigator: Arc<dyn Navigator>,
    gate: RateLimitGate,
}

impl SigninFlow {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        store: Arc<ProfileStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { auth, store, navigator, gate: RateLimitGate::new() }
    }

    pub const fn gate(&self) -> &RateLimitGate {
        &self.gate
    }

    /// Log in, seed the store with a provisional name and open the profile.
    #[instrument(skip(self, password))]
    pub async fn submit(&mut self, email: &str, password: &str) -> Result<()> {
        self.gate.check()?;
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(PortalError::Validation(CREDENTIALS_REQUIRED.to_string()));
        }

        let request = LoginRequest { email: email.to_string(), password: password.to_string() };
        let logged_in = self.auth.login(&request).await;
        self.gate.observe(logged_in)?;

        self.store.set_user_from_auth(AuthIdentity {
            name: provisional_name(email),
            email: email.to_string(),
        });
        info!("signed in");
        self.navigator.navigate(ROUTE_PROFILE);
        Ok(())
    }

    /// URL of the provider's consent page.
    pub async fn social_redirect(&self, provider: OAuthProvider) -> Result<String> {
        self.auth.oauth_url(provider).await
    }
}

/// Local part of the email until the real profile is fetched.
fn provisional_name(email: &str) -> String {
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => DEFAULT_DISPLAY_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::session::RecordingNavigator;
    use crate::testing::{FakeAuthGateway, FakeUserGateway};

    fn flow() -> (Arc<FakeAuthGateway>, Arc<ProfileStore>, Arc<RecordingNavigator>, SigninFlow) {
        let auth = Arc::new(FakeAuthGateway::new());
        let store = Arc::new(ProfileStore::new(Arc::new(FakeUserGateway::new())));
        let nav = Arc::new(RecordingNavigator::at("/signin"));
        let flow = SigninFlow::new(auth.clone(), Arc::clone(&store), nav.clone());
        (auth, store, nav, flow)
    }

    #[tokio::test]
    async fn success_seeds_store_and_opens_profile() {
        let (auth, store, nav, mut flow) = flow();
        flow.submit(" ada@b.com ", "secret123").await.unwrap();

        assert_eq!(store.user().unwrap().name, "ada");
        assert_eq!(nav.last().as_deref(), Some("/profile"));
        assert_eq!(auth.calls_to("login")[0].body["email"], "ada@b.com");
    }

    #[tokio::test]
    async fn backend_error_is_surfaced() {
        let (auth, store, nav, mut flow) = flow();
        auth.fail("login", PortalError::api("Invalid credentials"));

        let err = flow.submit("ada@b.com", "secret123").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(store.user().is_none());
        assert!(nav.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_starts_cooldown() {
        let (auth, _, _, mut flow) = flow();
        auth.rate_limit("login", 30);

        let err = flow.submit("ada@b.com", "secret123").await.unwrap_err();
        assert_eq!(err.retry_after_secs(), Some(30));
        assert_eq!(flow.gate().cooldown().label().as_deref(), Some("Try again in 30s…"));
    }

    #[test]
    fn provisional_name_falls_back() {
        assert_eq!(provisional_name("@b.com"), "User");
        assert_eq!(provisional_name("ada@b.com"), "ada");
    }

    #[tokio::test]
    async fn social_redirect_returns_url() {
        let (auth, _, _, flow) = flow();
        auth.respond("oauth_url", json!({"url": "https://accounts.google.com/o"}));
        assert_eq!(flow.social_redirect(OAuthProvider::Google).await.unwrap(), "https://accounts.google.com/o");
    }
}

//! Application context - dependency injection container
//!
//! Owns one of everything: the transport (and with it the cookie jar), the
//! gateways, the profile store, the unauthorized registry and the
//! navigator. Multi-step flows keep their step between calls, so each lives
//! behind its own async mutex.

use std::sync::Arc;

use parking_lot::Mutex as SyncMutex;
use talentfolio_core::session::Registration;
use talentfolio_core::{
    session_expiry_handler, AuthGateway, ChangeEmailFlow, ChangePasswordFlow, ChangePhoneFlow,
    DeleteAccountFlow, ForgotPasswordFlow, Navigator, OnboardingWizard, ProfileEditor,
    ProfileStore, RecordingNavigator, ReferralTracker, SigninFlow, SignupFlow, UnauthorizedRegistry,
    UserGateway,
};
use talentfolio_domain::constants::ROUTE_HOME;
use talentfolio_domain::{Config, Result};
use talentfolio_infra::{ApiTransport, HttpAuthGateway, HttpUserGateway};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub registry: UnauthorizedRegistry,
    pub users: Arc<dyn UserGateway>,
    pub auth: Arc<dyn AuthGateway>,
    pub store: Arc<ProfileStore>,
    pub navigator: Arc<dyn Navigator>,
    pub editor: ProfileEditor,
    pub referrals: Arc<ReferralTracker>,

    // Stateful flows
    pub signin: Mutex<SigninFlow>,
    pub signup: Mutex<SignupFlow>,
    pub forgot_password: Mutex<ForgotPasswordFlow>,
    pub onboarding: Mutex<OnboardingWizard>,
    pub change_email: Mutex<ChangeEmailFlow>,
    pub change_password: Mutex<ChangePasswordFlow>,
    pub change_phone: Mutex<ChangePhoneFlow>,
    pub delete_account: Mutex<DeleteAccountFlow>,

    // Keeps the session-expiry handler subscribed until shutdown
    session_registration: SyncMutex<Option<Registration>>,
}

impl AppContext {
    /// Build the context against the configured backend with an in-memory
    /// navigator starting at `/`.
    ///
    /// # Errors
    /// Returns `PortalError::Config` if the API URL is unusable or the HTTP
    /// client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_navigator(config, Arc::new(RecordingNavigator::at(ROUTE_HOME)))
    }

    /// Build the context with a caller-supplied router.
    ///
    /// # Errors
    /// Same as [`AppContext::new`].
    pub fn with_navigator(config: Config, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let registry = UnauthorizedRegistry::new();
        let transport = ApiTransport::from_config(&config.api, registry.clone())?;
        info!(base_url = transport.base_url(), "API transport ready");

        let users: Arc<dyn UserGateway> = Arc::new(HttpUserGateway::new(transport.clone()));
        let auth: Arc<dyn AuthGateway> = Arc::new(HttpAuthGateway::new(transport));

        Ok(Self::from_parts(config, registry, users, auth, navigator))
    }

    /// Wire the context from already-built ports.
    ///
    /// `registry` must be the one the ports' transport fires on 401.
    pub fn from_parts(
        config: Config,
        registry: UnauthorizedRegistry,
        users: Arc<dyn UserGateway>,
        auth: Arc<dyn AuthGateway>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let store = Arc::new(ProfileStore::new(Arc::clone(&users)));

        let registration = registry.register(session_expiry_handler(
            Arc::clone(&store),
            Arc::clone(&auth),
            Arc::clone(&navigator),
        ));
        debug!("session expiry handler registered");

        let editor = ProfileEditor::new(Arc::clone(&users), Arc::clone(&store));
        let signin = SigninFlow::new(Arc::clone(&auth), Arc::clone(&store), Arc::clone(&navigator));
        let referrals = Arc::new(ReferralTracker::new());
        let signup = SignupFlow::new(Arc::clone(&auth), Arc::clone(&store), Arc::clone(&navigator))
            .with_referrals(Arc::clone(&referrals));
        let forgot_password = ForgotPasswordFlow::new(Arc::clone(&auth), Arc::clone(&navigator));
        let onboarding =
            OnboardingWizard::new(Arc::clone(&users), Arc::clone(&store), Arc::clone(&navigator));
        let change_email =
            ChangeEmailFlow::new(Arc::clone(&auth), Arc::clone(&store), Arc::clone(&navigator));
        let change_password =
            ChangePasswordFlow::new(Arc::clone(&auth), Arc::clone(&store), Arc::clone(&navigator));
        let change_phone = ChangePhoneFlow::new(Arc::clone(&auth), Arc::clone(&store));
        let delete_account =
            DeleteAccountFlow::new(Arc::clone(&auth), Arc::clone(&store), Arc::clone(&navigator));

        Self {
            config,
            registry,
            users,
            auth,
            store,
            navigator,
            editor,
            referrals,
            signin: Mutex::new(signin),
            signup: Mutex::new(signup),
            forgot_password: Mutex::new(forgot_password),
            onboarding: Mutex::new(onboarding),
            change_email: Mutex::new(change_email),
            change_password: Mutex::new(change_password),
            change_phone: Mutex::new(change_phone),
            delete_account: Mutex::new(delete_account),
            session_registration: SyncMutex::new(Some(registration)),
        }
    }

    /// Start the onboarding wizard over from its first step.
    pub async fn restart_onboarding(&self) {
        *self.onboarding.lock().await = OnboardingWizard::new(
            Arc::clone(&self.users),
            Arc::clone(&self.store),
            Arc::clone(&self.navigator),
        );
    }

    /// Unsubscribe the session-expiry handler. Later 401s no longer clear
    /// the store or redirect.
    pub fn shutdown(&self) {
        if let Some(registration) = self.session_registration.lock().take() {
            registration.unregister();
            info!("application context shut down");
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

//! End-to-end journeys across flows, the profile store and the session
//! registry, driven by the scripted gateways.

#![cfg(feature = "test-utils")]

use std::sync::Arc;

use serde_json::json;
use talentfolio_core::flows::{OnboardingStep, SignupForm};
use talentfolio_core::profile::ProfileChange;
use talentfolio_core::testing::{FakeAuthGateway, FakeUserGateway};
use talentfolio_core::{
    session_expiry_handler, AuthGateway, Navigator, OnboardingWizard, ProfileEvent, ProfileStore,
    RecordingNavigator, SignupFlow, UnauthorizedRegistry, UserGateway,
};

struct World {
    auth: Arc<FakeAuthGateway>,
    users: Arc<FakeUserGateway>,
    store: Arc<ProfileStore>,
    navigator: Arc<RecordingNavigator>,
    registry: UnauthorizedRegistry,
}

impl World {
    fn new() -> Self {
        let auth = Arc::new(FakeAuthGateway::new());
        let users = Arc::new(FakeUserGateway::new());
        let users_port: Arc<dyn UserGateway> = users.clone();
        let store = Arc::new(ProfileStore::new(users_port));
        let navigator = Arc::new(RecordingNavigator::at("/signup"));
        let registry = UnauthorizedRegistry::new();
        Self { auth, users, store, navigator, registry }
    }

    fn auth_port(&self) -> Arc<dyn AuthGateway> {
        self.auth.clone()
    }

    fn users_port(&self) -> Arc<dyn UserGateway> {
        self.users.clone()
    }

    fn navigator_port(&self) -> Arc<dyn Navigator> {
        self.navigator.clone()
    }
}

#[tokio::test]
async fn signup_onboarding_then_session_expiry() {
    let world = World::new();
    let _registration = world.registry.register(session_expiry_handler(
        Arc::clone(&world.store),
        world.auth_port(),
        world.navigator_port(),
    ));
    let mut events = world.store.subscribe();

    let mut signup =
        SignupFlow::new(world.auth_port(), Arc::clone(&world.store), world.navigator_port());
    signup.request_otp("grace@example.com").await.unwrap();
    signup
        .complete(SignupForm {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            password: "cobol1959".into(),
            otp: "123456".into(),
            referred_by: None,
        })
        .await
        .unwrap();
    assert_eq!(world.navigator.current_path(), "/onboarding");

    let mut wizard = OnboardingWizard::new(
        world.users_port(),
        Arc::clone(&world.store),
        world.navigator_port(),
    );
    wizard.skip_resume().unwrap();
    if let Some(row) = wizard.education_mut(0) {
        row.college = "Yale".into();
        row.degree = "PhD".into();
        row.graduation_date = talentfolio_domain::YearMonth::new(1934, 6);
    }
    world.users.respond("create_education", json!({"_id": "e1", "college": "Yale", "degree": "PhD"}));
    wizard.submit().await.unwrap();
    wizard.finish().unwrap();
    assert_eq!(wizard.step(), OnboardingStep::Done);

    let user = world.store.user().unwrap();
    assert_eq!(user.name, "Grace Hopper");
    assert_eq!(user.education[0].id.as_deref(), Some("e1"));
    assert!(user.is_onboarded);

    world.registry.fire().await;

    assert!(world.store.user().is_none());
    assert_eq!(
        world.navigator.last().as_deref(),
        Some("/signin?session_expired=1&from=%2Fprofile")
    );

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(seen.contains(&ProfileEvent::Updated(ProfileChange::Education)));
    assert!(seen.contains(&ProfileEvent::Updated(ProfileChange::Onboarding)));
    assert_eq!(seen.last(), Some(&ProfileEvent::Cleared));
}

#[tokio::test]
async fn expiry_while_signed_out_still_lands_on_signin() {
    let world = World::new();
    let _registration = world.registry.register(session_expiry_handler(
        Arc::clone(&world.store),
        world.auth_port(),
        world.navigator_port(),
    ));
    world.navigator.navigate("/signin");

    world.registry.fire().await;

    assert_eq!(world.navigator.last().as_deref(), Some("/signin?session_expired=1"));
    assert_eq!(world.auth.calls_to("logout").len(), 1);
}

//! Integration tests for AppContext lifecycle

mod support;

use std::sync::Arc;

use talentfolio_core::RecordingNavigator;
use talentfolio_domain::{ApiConfig, Config, PortalError};
use talentfolio_lib::context::AppContext;

use support::{harness_at, user_json};

#[tokio::test]
async fn default_config_builds_a_context() {
    let ctx = AppContext::new(Config::default()).expect("default config is usable");

    assert_eq!(ctx.registry.len(), 1, "session-expiry handler is registered at startup");
    assert!(ctx.store.user().is_none());
}

#[tokio::test]
async fn unusable_backend_url_is_a_config_error() {
    let config = Config {
        api: ApiConfig { base_url: "nowhere".into(), origin: "::".into(), ..ApiConfig::default() },
        ..Config::default()
    };

    let err = AppContext::with_navigator(config, Arc::new(RecordingNavigator::at("/")))
        .expect_err("origin is not a URL");
    assert!(matches!(err, PortalError::Config(_)), "got {err:?}");
}

#[tokio::test]
async fn unauthorized_fire_tears_the_session_down() {
    let h = harness_at("/settings");
    h.users.respond("get_user", user_json());
    talentfolio_lib::fetch_profile(&h.ctx).await.unwrap();

    h.ctx.registry.fire().await;

    assert!(h.ctx.store.user().is_none());
    assert_eq!(h.auth.calls_to("logout").len(), 1);
    assert_eq!(
        h.navigator.last().as_deref(),
        Some("/signin?session_expired=1&from=%2Fsettings")
    );
}

#[tokio::test]
async fn shutdown_unsubscribes_the_expiry_handler() {
    let h = harness_at("/profile");

    h.ctx.shutdown();
    h.ctx.shutdown();
    h.ctx.registry.fire().await;

    assert!(h.ctx.registry.is_empty());
    assert!(h.navigator.history().is_empty());
    assert!(h.auth.calls_to("logout").is_empty());
}

#[tokio::test]
async fn restart_onboarding_returns_to_first_step() {
    let h = harness_at("/onboarding");
    talentfolio_lib::skip_onboarding_resume(&h.ctx).await.unwrap();

    h.ctx.restart_onboarding().await;

    assert_eq!(
        talentfolio_lib::onboarding_step(&h.ctx).await,
        talentfolio_core::flows::OnboardingStep::Resume
    );
}

//! End-to-end session handling against a mock backend
//!
//! Wires the real transport, gateways, profile store and session-expiry
//! handler together the way the app does, then drives them through
//! `wiremock`.

use std::sync::Arc;

use serde_json::json;
use talentfolio_core::profile::AuthIdentity;
use talentfolio_core::session::Registration;
use talentfolio_core::{
    session_expiry_handler, Navigator, ProfileEditor, ProfileStore, RecordingNavigator,
    SigninFlow, UnauthorizedRegistry,
};
use talentfolio_domain::{Location, PortalError};
use talentfolio_infra::{ApiTransport, HttpAuthGateway, HttpClient, HttpUserGateway};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    store: Arc<ProfileStore>,
    users: Arc<HttpUserGateway>,
    auth: Arc<HttpAuthGateway>,
    navigator: Arc<RecordingNavigator>,
    _registration: Registration,
}

fn harness(server: &MockServer, current_path: &str) -> Harness {
    let registry = UnauthorizedRegistry::new();
    let transport = ApiTransport::new(
        HttpClient::new().expect("http client"),
        format!("{}/api/v1", server.uri()),
        registry.clone(),
    );
    let users = Arc::new(HttpUserGateway::new(transport.clone()));
    let auth = Arc::new(HttpAuthGateway::new(transport));
    let store = Arc::new(ProfileStore::new(users.clone()));
    let navigator = Arc::new(RecordingNavigator::at(current_path));
    let registration = registry.register(session_expiry_handler(
        Arc::clone(&store),
        auth.clone(),
        navigator.clone(),
    ));
    Harness { store, users, auth, navigator, _registration: registration }
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401)
        .set_body_json(json!({"success": false, "data": {"error": "Unauthorized"}}))
}

#[tokio::test]
async fn expired_session_clears_store_logs_out_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(unauthorized())
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, "/profile");
    h.store.set_user_from_auth(AuthIdentity {
        name: "Ada".into(),
        email: "ada@example.com".into(),
    });

    let err = h.store.fetch_user().await.unwrap_err();

    assert_eq!(err, PortalError::api("Unauthorized"));
    assert!(h.store.user().is_none());
    assert_eq!(
        h.navigator.last().as_deref(),
        Some("/signin?session_expired=1&from=%2Fprofile")
    );
}

#[tokio::test]
async fn sign_in_cookie_is_sent_on_later_profile_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ok(json!({"message": "ok"}))
                .insert_header("set-cookie", "session_token=s3cr3t; Path=/; HttpOnly"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/user/location"))
        .and(header("cookie", "session_token=s3cr3t"))
        .respond_with(ok(json!({"location": {"country_residence": "IN", "city_residence": "Pune"}})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, "/signin");
    let mut signin = SigninFlow::new(h.auth.clone(), Arc::clone(&h.store), h.navigator.clone());
    signin.submit("ada@example.com", "password1").await.expect("sign in");
    assert_eq!(h.navigator.current_path(), "/profile");

    let editor = ProfileEditor::new(h.users.clone(), Arc::clone(&h.store));
    let saved = editor
        .save_location(Location {
            country_residence: Some("IN".into()),
            city_residence: Some("Pune".into()),
            ..Location::default()
        })
        .await
        .expect("location saved");

    assert_eq!(saved.city_residence, Some(Some("Pune".to_string())));
    assert_eq!(h.store.user().and_then(|u| u.city_residence), Some("Pune".to_string()));
}

#[tokio::test]
async fn wrong_password_does_not_tear_down_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "data": {"error": "Invalid credentials"}})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, "/signin");
    let mut signin = SigninFlow::new(h.auth.clone(), Arc::clone(&h.store), h.navigator.clone());

    let err = signin.submit("ada@example.com", "nope").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(h.navigator.history().is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

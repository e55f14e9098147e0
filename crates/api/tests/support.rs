//! Shared harness for command tests
//!
//! Builds an [`AppContext`] over scripted gateways and a recording navigator.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use talentfolio_core::testing::{FakeAuthGateway, FakeUserGateway};
use talentfolio_core::{
    AuthGateway, Navigator, RecordingNavigator, UnauthorizedRegistry, UserGateway,
};
use talentfolio_domain::Config;
use talentfolio_lib::context::AppContext;

pub struct Harness {
    pub ctx: AppContext,
    pub auth: Arc<FakeAuthGateway>,
    pub users: Arc<FakeUserGateway>,
    pub navigator: Arc<RecordingNavigator>,
}

/// Context whose navigator starts at `path`.
pub fn harness_at(path: &str) -> Harness {
    let auth = Arc::new(FakeAuthGateway::new());
    let users = Arc::new(FakeUserGateway::new());
    let navigator = Arc::new(RecordingNavigator::at(path));
    let auth_port: Arc<dyn AuthGateway> = auth.clone();
    let users_port: Arc<dyn UserGateway> = users.clone();
    let navigator_port: Arc<dyn Navigator> = navigator.clone();
    let ctx = AppContext::from_parts(
        Config::default(),
        UnauthorizedRegistry::new(),
        users_port,
        auth_port,
        navigator_port,
    );
    Harness { ctx, auth, users, navigator }
}

pub fn harness() -> Harness {
    harness_at("/")
}

/// `GET /user` data for a signed-in candidate.
pub fn user_json() -> Value {
    json!({"user": {
        "_id": "u1",
        "email": "ada@example.com",
        "name": "Ada Lovelace",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "experience": [],
        "education": []
    }})
}

/// Harness with the profile already loaded.
pub async fn signed_in() -> Harness {
    let h = harness_at("/profile");
    h.users.respond("get_user", user_json());
    talentfolio_lib::fetch_profile(&h.ctx).await.expect("profile loads");
    h
}

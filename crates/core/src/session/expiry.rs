//! Session-expiry teardown registered with the unauthorized registry

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use talentfolio_domain::constants::ROUTE_SIGNIN;
use tracing::{debug, info};
use url::form_urlencoded;

use super::navigator::Navigator;
use crate::auth::AuthGateway;
use crate::profile::ProfileStore;

/// Sign-in URL shown after the backend rejected the session.
///
/// `from` is omitted when the user was nowhere or already on the sign-in
/// page.
pub fn expired_signin_target(current_path: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("session_expired", "1");
    if !current_path.is_empty() && current_path != ROUTE_SIGNIN {
        query.append_pair("from", current_path);
    }
    format!("{ROUTE_SIGNIN}?{}", query.finish())
}

/// Build the handler that tears a rejected session down.
///
/// In order: clear the profile, ask the backend to log out (ignoring the
/// outcome, which is usually another 401), then send the user to sign-in.
pub fn session_expiry_handler(
    store: Arc<ProfileStore>,
    auth: Arc<dyn AuthGateway>,
    navigator: Arc<dyn Navigator>,
) -> impl Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static {
    move || {
        let store = Arc::clone(&store);
        let auth = Arc::clone(&auth);
        let navigator = Arc::clone(&navigator);
        async move {
            store.clear_profile();
            if let Err(err) = auth.logout().await {
                debug!(error = %err, "logout after session expiry failed");
            }
            let target = expired_signin_target(&navigator.current_path());
            info!(%target, "session expired; redirecting to sign-in");
            navigator.navigate(&target);
        }
        .boxed()
    }
}

//! Pre-render route guard
//!
//! Decides, from the request path and cookies alone, whether a page may render
//! or the visitor must be redirected. The cookie is never validated here; a
//! stale cookie is caught later by the first 401.

use talentfolio_domain::constants::{AUTH_ROUTES, PROTECTED_ROUTES, ROUTE_PROFILE, ROUTE_SIGNIN, SESSION_COOKIE};
use tracing::debug;
use url::form_urlencoded;

/// Outcome of [`evaluate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

/// Whether `path` needs a session
pub fn is_protected(path: &str) -> bool {
    PROTECTED_ROUTES.iter().any(|prefix| matches_prefix(path, prefix))
}

/// Whether `path` is a sign-in/sign-up page
pub fn is_auth_route(path: &str) -> bool {
    AUTH_ROUTES.iter().any(|prefix| matches_prefix(path, prefix))
}

/// Whether the raw `Cookie` header carries the session cookie
pub fn has_session_cookie(cookie_header: &str) -> bool {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .any(|(name, value)| name.trim() == SESSION_COOKIE && !value.trim().is_empty())
}

/// Decide whether `path` renders.
///
/// `query` is the raw query string without the leading `?`.
pub fn evaluate(path: &str, has_cookie: bool, query: &str) -> GuardDecision {
    if is_protected(path) && !has_cookie {
        let from: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("from", path)
            .finish();
        debug!(path, "protected route without session");
        return GuardDecision::Redirect(format!("{ROUTE_SIGNIN}?{from}"));
    }

    if is_auth_route(path) && has_cookie {
        let session_expired =
            form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "session_expired");
        if !session_expired {
            debug!(path, "auth route with session");
            return GuardDecision::Redirect(ROUTE_PROFILE.to_string());
        }
    }

    GuardDecision::Allow
}

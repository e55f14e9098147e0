//! Route guard command

use talentfolio_core::{evaluate, has_session_cookie, GuardDecision};
use talentfolio_domain::Result as DomainResult;

use crate::utils::command_helpers::execute_command_sync;

/// Decide whether `path` may render for a request carrying `cookie_header`.
///
/// `query` is the raw query string without the leading `?`.
pub fn guard_route(path: &str, cookie_header: &str, query: &str) -> DomainResult<GuardDecision> {
    execute_command_sync("routing::guard_route", || {
        Ok(evaluate(path, has_session_cookie(cookie_header), query))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_page_without_cookie_redirects() {
        let decision = guard_route("/profile", "theme=dark", "").unwrap();
        assert_eq!(decision, GuardDecision::Redirect("/signin?from=%2Fprofile".to_string()));
    }

    #[test]
    fn signin_with_cookie_goes_to_profile() {
        let decision = guard_route("/signin", "session_token=abc", "").unwrap();
        assert_eq!(decision, GuardDecision::Redirect("/profile".to_string()));
    }

    #[test]
    fn expired_session_may_see_signin() {
        let decision = guard_route("/signin", "session_token=abc", "session_expired=1").unwrap();
        assert_eq!(decision, GuardDecision::Allow);
    }
}

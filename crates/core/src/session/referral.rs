//! Pending referral code
//!
//! Any page opened with `?ref=<user id>` records the referrer. The code is
//! attached to the next signup and forgotten once that signup succeeds.

use parking_lot::Mutex;
use talentfolio_domain::constants::REFERRAL_QUERY_PARAM;
use tracing::debug;
use url::form_urlencoded;

#[derive(Debug, Default)]
pub struct ReferralTracker {
    pending: Mutex<Option<String>>,
}

impl ReferralTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the `ref` value of a raw query string, if it has a non-blank one.
    ///
    /// A later code replaces an earlier one. Returns the recorded code.
    pub fn capture(&self, query: &str) -> Option<String> {
        let code = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == REFERRAL_QUERY_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())?;
        debug!(referred_by = %code, "referral code captured");
        *self.pending.lock() = Some(code.clone());
        Some(code)
    }

    pub fn pending(&self) -> Option<String> {
        self.pending.lock().clone()
    }

    pub fn clear(&self) {
        self.pending.lock().take();
    }
}

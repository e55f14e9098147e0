//! Referral commands

use talentfolio_domain::constants::PLACEHOLDER_USER_ID;
use talentfolio_domain::utils::{invite_link, referral_status, ReferralStatus};
use talentfolio_domain::{PortalError, Result as DomainResult, User};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command_sync;

/// Remember the `ref` code of a page's query string for the next signup.
pub fn capture_referral(ctx: &AppContext, query: &str) -> Option<String> {
    ctx.referrals.capture(query)
}

fn loaded_user(ctx: &AppContext) -> DomainResult<User> {
    ctx.store
        .user()
        .filter(|user| user.id != PLACEHOLDER_USER_ID)
        .ok_or_else(|| PortalError::InvalidState("profile has not been loaded".into()))
}

/// Tier and progress for the loaded profile.
pub fn referral_status_for_profile(ctx: &AppContext) -> DomainResult<ReferralStatus> {
    execute_command_sync("referrals::status", || {
        loaded_user(ctx).map(|user| referral_status(user.referral_count))
    })
}

/// Signup link crediting the loaded profile.
pub fn referral_invite_link(ctx: &AppContext) -> DomainResult<String> {
    execute_command_sync("referrals::invite_link", || {
        let user = loaded_user(ctx)?;
        let id = user.backend_id.as_deref().unwrap_or(&user.id);
        Ok(invite_link(&ctx.config.api.origin, id))
    })
}

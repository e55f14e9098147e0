//! Referral tiers and invite links

use serde::Serialize;
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{REFERRAL_QUERY_PARAM, ROUTE_SIGNUP};

/// Status earned by inviting other candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum ReferralTier {
    Member,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Apex,
}

impl ReferralTier {
    /// Every tier, lowest first
    pub const ALL: [Self; 6] =
        [Self::Member, Self::Silver, Self::Gold, Self::Platinum, Self::Diamond, Self::Apex];

    /// Referrals needed to reach this tier
    pub const fn threshold(self) -> u32 {
        match self {
            Self::Member => 0,
            Self::Silver => 5,
            Self::Gold => 50,
            Self::Platinum => 250,
            Self::Diamond => 1000,
            Self::Apex => 5000,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Diamond => "Diamond",
            Self::Apex => "Apex",
        }
    }

    /// Highest tier whose threshold `count` meets
    pub fn for_count(count: u32) -> Self {
        Self::ALL.into_iter().rev().find(|tier| count >= tier.threshold()).unwrap_or(Self::Member)
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| *tier > self)
    }
}

/// Progress towards the next tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ReferralStatus {
    pub count: u32,
    pub tier: ReferralTier,
    /// `None` once the top tier is reached
    pub next_tier: Option<ReferralTier>,
    /// `count / next threshold` as a percentage, capped at 100
    pub progress_percent: f64,
}

/// Tier, next tier and progress for `count` referrals.
///
/// ```
/// use talentfolio_domain::utils::{referral_status, ReferralTier};
///
/// let status = referral_status(25);
/// assert_eq!(status.tier, ReferralTier::Silver);
/// assert_eq!(status.next_tier, Some(ReferralTier::Gold));
/// assert_eq!(status.progress_percent, 50.0);
/// ```
pub fn referral_status(count: u32) -> ReferralStatus {
    let tier = ReferralTier::for_count(count);
    let next_tier = tier.next();
    let progress_percent = next_tier.map_or(100.0, |next| {
        (f64::from(count) / f64::from(next.threshold()) * 100.0).min(100.0)
    });
    ReferralStatus { count, tier, next_tier, progress_percent }
}

/// Signup link that credits `user_id` with the referral.
pub fn invite_link(origin: &str, user_id: &str) -> String {
    format!(
        "{}{ROUTE_SIGNUP}?{REFERRAL_QUERY_PARAM}={}",
        origin.trim_end_matches('/'),
        urlencoding::encode(user_id)
    )
}

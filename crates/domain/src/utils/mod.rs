//! Pure helpers over domain types

pub mod countries;
pub mod names;
pub mod referrals;

pub use countries::{country_code, country_label, normalize_country, Country, COUNTRIES};
pub use names::{display_name, normalize_user, split_full_name};
pub use referrals::{invite_link, referral_status, ReferralStatus, ReferralTier};

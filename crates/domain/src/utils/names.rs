//! Display names and normalization of freshly fetched users

use crate::constants::{DEFAULT_DISPLAY_NAME, UNKNOWN_USER_ID};
use crate::types::User;

/// `"first last"` trimmed, or the backend-supplied `name`.
pub fn display_name(user: &User) -> String {
    let full = full_name(user.first_name.as_deref(), user.last_name.as_deref());
    if full.is_empty() {
        user.name.trim().to_string()
    } else {
        full
    }
}

fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default()).trim().to_string()
}

/// Split a full name at the first space.
///
/// ```
/// use talentfolio_domain::utils::split_full_name;
///
/// assert_eq!(split_full_name("Ada Lovelace King"), ("Ada".to_string(), "Lovelace King".to_string()));
/// assert_eq!(split_full_name("Plato"), ("Plato".to_string(), String::new()));
/// ```
pub fn split_full_name(full: &str) -> (String, String) {
    let full = full.trim();
    match full.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (full.to_string(), String::new()),
    }
}

/// Normalize a user as returned by `GET /user`.
///
/// - `id` falls back to `_id`, then to `"unknown"`
/// - `name` is rebuilt from first/last name, then the stored name, then `"User"`
/// - `is_onboarded` is inferred from the legacy flag or any education entry
/// - experience and education items without an id get one from `fresh_id`
pub fn normalize_user(mut user: User, mut fresh_id: impl FnMut() -> String) -> User {
    if user.id.is_empty() {
        user.id = user.backend_id.clone().unwrap_or_else(|| UNKNOWN_USER_ID.to_string());
    }

    let name = display_name(&user);
    user.name = if name.is_empty() { DEFAULT_DISPLAY_NAME.to_string() } else { name };

    user.is_onboarded = user.is_onboarded
        || user.is_onboarding_completed.unwrap_or(false)
        || !user.education.is_empty();

    for work in &mut user.experience {
        if work.id.is_none() {
            work.id = Some(work.backend_id.clone().unwrap_or_else(&mut fresh_id));
        }
    }
    for education in &mut user.education {
        if education.id.is_none() {
            education.id = Some(education.backend_id.clone().unwrap_or_else(&mut fresh_id));
        }
    }

    user
}

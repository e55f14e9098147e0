//! User aggregate and the field groups the profile forms write
//!
//! `GET /user` returns the whole aggregate. Each settings form then writes
//! one field group (`/user/info`, `/user/location`, `/user/preference`) and
//! the echoed group is merged into the local copy.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::{null_as_default, EducationItem, WorkItem};
use crate::impl_wire_str_conversions;

/// Candidate profile as held by the profile store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct User {
    #[serde(default)]
    pub id: String,
    /// Raw MongoDB identifier, only read
    #[serde(rename = "_id", default, skip_serializing)]
    pub backend_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile_img: Option<String>,
    /// E.164
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<String>,
    #[serde(default)]
    pub resume: Option<String>,

    // Location
    #[serde(default)]
    pub country_residence: Option<String>,
    #[serde(default)]
    pub state_residence: Option<String>,
    #[serde(default)]
    pub city_residence: Option<String>,
    #[serde(default)]
    pub work_country: Option<String>,
    #[serde(default)]
    pub work_state: Option<String>,
    #[serde(default)]
    pub work_city: Option<String>,
    #[serde(default)]
    pub legally_authorised_to_work: Option<bool>,
    #[serde(default)]
    pub timezone: Option<String>,

    // Preferences
    #[serde(default)]
    pub time_commitment_per_week: Option<f64>,
    #[serde(default)]
    pub min_compensation_full_time: Option<f64>,
    #[serde(default)]
    pub min_compensation_part_time: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<WorkItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationItem>,

    #[serde(default)]
    pub is_onboarded: bool,
    /// Older backends report onboarding under this name
    #[serde(default, skip_serializing)]
    pub is_onboarding_completed: Option<bool>,
    /// Candidates who signed up with this user's invite link
    #[serde(default, deserialize_with = "null_as_default")]
    pub referral_count: u32,
}

impl User {
    /// Merge an echoed `/user/info` group. Keys the backend sent as `null`
    /// clear the local value; absent keys leave it alone.
    pub fn apply_info(&mut self, info: &InfoPatch) {
        overwrite(&mut self.first_name, &info.first_name);
        overwrite(&mut self.last_name, &info.last_name);
        overwrite(&mut self.phone, &info.phone);
        overwrite(&mut self.linkedin, &info.linkedin);
        if let Some(links) = &info.links {
            self.links = links.clone().unwrap_or_default();
        }
    }

    /// Merge an echoed `/user/location` group.
    pub fn apply_location(&mut self, location: &LocationPatch) {
        overwrite(&mut self.country_residence, &location.country_residence);
        overwrite(&mut self.state_residence, &location.state_residence);
        overwrite(&mut self.city_residence, &location.city_residence);
        overwrite(&mut self.work_country, &location.work_country);
        overwrite(&mut self.work_state, &location.work_state);
        overwrite(&mut self.work_city, &location.work_city);
        overwrite(&mut self.legally_authorised_to_work, &location.legally_authorised_to_work);
        overwrite(&mut self.timezone, &location.timezone);
    }

    /// Merge an echoed `/user/preference` group.
    pub fn apply_preferences(&mut self, preference: &PreferencePatch) {
        overwrite(&mut self.time_commitment_per_week, &preference.time_commitment_per_week);
        overwrite(&mut self.timezone, &preference.timezone);
        overwrite(&mut self.min_compensation_full_time, &preference.min_compensation_full_time);
        overwrite(&mut self.min_compensation_part_time, &preference.min_compensation_part_time);
        if let Some(skills) = &preference.skills {
            self.skills = skills.clone().unwrap_or_default();
        }
        if let Some(languages) = &preference.languages {
            self.languages = languages.clone().unwrap_or_default();
        }
    }
}

fn overwrite<T: Clone>(slot: &mut Option<T>, value: &Patch<T>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

/// Echoed field: `None` when the key is absent, `Some(None)` for an explicit
/// `null`.
pub type Patch<T> = Option<Option<T>>;

/// `info` group as echoed by `POST /user/info`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct InfoPatch {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub first_name: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub last_name: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub phone: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub linkedin: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub links: Patch<Vec<String>>,
}

/// `location` group as echoed by `POST /user/location`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LocationPatch {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub country_residence: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub state_residence: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub city_residence: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub work_country: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub work_state: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub work_city: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub legally_authorised_to_work: Patch<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub timezone: Patch<String>,
}

/// `preferences` group as echoed by `POST /user/preference`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PreferencePatch {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub time_commitment_per_week: Patch<f64>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub timezone: Patch<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub min_compensation_full_time: Patch<f64>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub min_compensation_part_time: Patch<f64>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub skills: Patch<Vec<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub languages: Patch<Vec<String>>,
}

/// Body of `POST /user/info`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Info {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

/// Body of `POST /user/location`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_residence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_residence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_residence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legally_authorised_to_work: Option<bool>,
    /// IANA-style zone name, e.g. `ASIA/KOLKATA`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Body of `POST /user/preference`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Preference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_commitment_per_week: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Per year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_compensation_full_time: Option<f64>,
    /// Per hour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_compensation_part_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

/// Tab the profile editor opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum EditingSection {
    #[default]
    Profile,
    Skills,
    WorkPreferences,
}

impl_wire_str_conversions!(EditingSection {
    Profile => "profile",
    Skills => "skills",
    WorkPreferences => "work-preferences",
});

/// `GET /user` data
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// `POST /user/info` data
#[derive(Debug, Clone, Deserialize)]
pub struct InfoResponse {
    pub info: InfoPatch,
}

/// `POST /user/location` data
#[derive(Debug, Clone, Deserialize)]
pub struct LocationResponse {
    pub location: LocationPatch,
}

/// `POST /user/preference` data
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesResponse {
    pub preferences: PreferencePatch,
}

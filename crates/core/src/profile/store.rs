//! Client-side profile store
//!
//! Holds the signed-in user plus UI flags. `fetch_user` replaces the whole
//! aggregate; the `set_*`/`*_local` mutators apply data the backend just
//! echoed after a successful write, without refetching. Each mutator touches
//! one field group, so concurrent writes from different forms do not clobber
//! each other.

use std::sync::Arc;

use parking_lot::RwLock;
use talentfolio_domain::constants::{LOCAL_ID_PREFIX, PLACEHOLDER_USER_ID, PROFILE_EVENT_CAPACITY};
use talentfolio_domain::utils::normalize_user;
use talentfolio_domain::{
    ApiEnvelope, EditingSection, EducationItem, InfoPatch, LocationPatch, PortalError,
    PreferencePatch, Result, User, WorkItem,
};
use tokio::sync::broadcast;
use tracing::{debug, instrument, warn};

use crate::user::UserGateway;

/// Snapshot of everything the store holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    pub user: Option<User>,
    pub is_fetching: bool,
    pub error: Option<String>,
    pub is_editing: bool,
    pub editing_section: Option<EditingSection>,
}

/// Field group touched by a local mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileChange {
    Info,
    Location,
    Preferences,
    ProfileImage,
    Resume,
    Experience,
    Education,
    Onboarding,
    Identity,
}

/// Notification sent to subscribers after every state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    FetchStarted,
    Loaded,
    FetchFailed(String),
    Updated(ProfileChange),
    EditingChanged { open: bool, section: Option<EditingSection> },
    Cleared,
}

/// Name and email known right after signup or sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub name: String,
    pub email: String,
}

/// Injectable profile state container
pub struct ProfileStore {
    state: RwLock<ProfileState>,
    events: broadcast::Sender<ProfileEvent>,
    users: Arc<dyn UserGateway>,
}

impl ProfileStore {
    /// Create an empty store backed by `users` for refreshes
    pub fn new(users: Arc<dyn UserGateway>) -> Self {
        let (events, _) = broadcast::channel(PROFILE_EVENT_CAPACITY);
        Self { state: RwLock::new(ProfileState::default()), events, users }
    }

    /// Receive every subsequent [`ProfileEvent`]
    pub fn subscribe(&self) -> broadcast::Receiver<ProfileEvent> {
        self.events.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> ProfileState {
        self.state.read().clone()
    }

    /// Clone of the current user
    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    fn publish(&self, event: ProfileEvent) {
        // Zero receivers is not an error for a store.
        let _ = self.events.send(event);
    }

    /// Reload the user from `GET /user`.
    ///
    /// Nested items get a stable id from `id`, then `_id`, then a fresh local
    /// id. `is_fetching` is cleared whatever the outcome.
    ///
    /// # Errors
    /// Returns [`PortalError::Api`] with the backend's error; the store then
    /// holds that message in `error` and no user.
    #[instrument(skip(self))]
    pub async fn fetch_user(&self) -> Result<()> {
        {
            let mut state = self.state.write();
            state.is_fetching = true;
            state.error = None;
        }
        self.publish(ProfileEvent::FetchStarted);

        match self.users.get_user().await {
            ApiEnvelope::Success(response) => {
                let user = normalize_user(response.user, fresh_local_id);
                debug!(user_id = %user.id, "profile loaded");
                {
                    let mut state = self.state.write();
                    state.user = Some(user);
                    state.is_fetching = false;
                }
                self.publish(ProfileEvent::Loaded);
                Ok(())
            }
            ApiEnvelope::Failure(payload) => {
                let message = payload.message();
                warn!(error = %message, "failed to load profile");
                {
                    let mut state = self.state.write();
                    state.error = Some(message.clone());
                    state.user = None;
                    state.is_fetching = false;
                }
                self.publish(ProfileEvent::FetchFailed(message));
                Err(PortalError::Api(payload))
            }
        }
    }

    /// Open or close the profile editor. Opening defaults to the profile tab;
    /// closing always resets the tab.
    pub fn set_editing(&self, open: bool, section: Option<EditingSection>) {
        let section = if open { Some(section.unwrap_or_default()) } else { None };
        {
            let mut state = self.state.write();
            state.is_editing = open;
            state.editing_section = section;
        }
        self.publish(ProfileEvent::EditingChanged { open, section });
    }

    fn mutate_user(&self, change: ProfileChange, f: impl FnOnce(&mut User) -> bool) -> bool {
        let changed = {
            let mut state = self.state.write();
            state.user.as_mut().is_some_and(f)
        };
        if changed {
            self.publish(ProfileEvent::Updated(change));
        }
        changed
    }

    /// Merge an echoed info group. No-op without a user.
    pub fn set_user_info(&self, info: &InfoPatch) -> bool {
        self.mutate_user(ProfileChange::Info, |user| {
            user.apply_info(info);
            true
        })
    }

    /// Merge an echoed location group. No-op without a user.
    pub fn set_user_location(&self, location: &LocationPatch) -> bool {
        self.mutate_user(ProfileChange::Location, |user| {
            user.apply_location(location);
            true
        })
    }

    /// Merge an echoed preference group. No-op without a user.
    pub fn set_user_preferences(&self, preference: &PreferencePatch) -> bool {
        self.mutate_user(ProfileChange::Preferences, |user| {
            user.apply_preferences(preference);
            true
        })
    }

    /// Set or clear the avatar URL. No-op without a user.
    pub fn set_user_profile_image(&self, url: Option<String>) -> bool {
        self.mutate_user(ProfileChange::ProfileImage, |user| {
            user.profile_img = url;
            true
        })
    }

    /// Set or clear the resume URL. No-op without a user.
    pub fn set_user_resume(&self, url: Option<String>) -> bool {
        self.mutate_user(ProfileChange::Resume, |user| {
            user.resume = url;
            true
        })
    }

    /// Merge the phone number confirmed by `change_phone`.
    pub fn set_user_phone(&self, phone: String) -> bool {
        self.mutate_user(ProfileChange::Info, |user| {
            user.phone = Some(phone);
            true
        })
    }

    /// Append an experience entry created on the server.
    pub fn add_work_local(&self, mut item: WorkItem) -> bool {
        if item.id.is_none() {
            item.id.clone_from(&item.backend_id);
        }
        self.mutate_user(ProfileChange::Experience, |user| {
            user.experience.push(item);
            true
        })
    }

    /// Replace the experience entry with the same id. No-op without an id or
    /// a matching entry.
    pub fn update_work_local(&self, item: WorkItem) -> bool {
        let Some(id) = item.server_id().map(str::to_string) else {
            return false;
        };
        self.mutate_user(ProfileChange::Experience, |user| {
            replace_by_id(&mut user.experience, &id, item, WorkItem::server_id)
        })
    }

    /// Drop the experience entry with `id`. No-op when absent.
    pub fn remove_work_local(&self, id: &str) -> bool {
        self.mutate_user(ProfileChange::Experience, |user| {
            remove_by_id(&mut user.experience, id, WorkItem::server_id)
        })
    }

    /// Append an education entry created on the server.
    pub fn add_education_local(&self, mut item: EducationItem) -> bool {
        if item.id.is_none() {
            item.id.clone_from(&item.backend_id);
        }
        self.mutate_user(ProfileChange::Education, |user| {
            user.education.push(item);
            true
        })
    }

    /// Replace the education entry with the same id.
    pub fn update_education_local(&self, item: EducationItem) -> bool {
        let Some(id) = item.server_id().map(str::to_string) else {
            return false;
        };
        self.mutate_user(ProfileChange::Education, |user| {
            replace_by_id(&mut user.education, &id, item, EducationItem::server_id)
        })
    }

    /// Drop the education entry with `id`.
    pub fn remove_education_local(&self, id: &str) -> bool {
        self.mutate_user(ProfileChange::Education, |user| {
            remove_by_id(&mut user.education, id, EducationItem::server_id)
        })
    }

    /// Mark onboarding as finished.
    pub fn set_onboarding_complete(&self) -> bool {
        self.mutate_user(ProfileChange::Onboarding, |user| {
            user.is_onboarded = true;
            true
        })
    }

    /// Reset to the initial empty state (logout, session expiry, deletion).
    pub fn clear_profile(&self) {
        *self.state.write() = ProfileState::default();
        self.publish(ProfileEvent::Cleared);
    }

    /// Seed a minimal user right after signup or sign-in.
    ///
    /// Merges name and email into the current user, or creates a placeholder
    /// user until the first full fetch.
    pub fn set_user_from_auth(&self, identity: AuthIdentity) {
        {
            let mut state = self.state.write();
            match state.user.as_mut() {
                Some(user) => {
                    user.name = identity.name;
                    user.email = identity.email;
                }
                None => {
                    state.user = Some(User {
                        id: PLACEHOLDER_USER_ID.to_string(),
                        name: identity.name,
                        email: identity.email,
                        ..User::default()
                    });
                }
            }
        }
        self.publish(ProfileEvent::Updated(ProfileChange::Identity));
    }
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore").field("state", &*self.state.read()).finish_non_exhaustive()
    }
}

fn fresh_local_id() -> String {
    format!("{LOCAL_ID_PREFIX}{}", uuid::Uuid::new_v4())
}

fn replace_by_id<T>(items: &mut [T], id: &str, item: T, key: fn(&T) -> Option<&str>) -> bool {
    match items.iter_mut().find(|existing| key(existing) == Some(id)) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, key: fn(&T) -> Option<&str>) -> bool {
    let before = items.len();
    items.retain(|existing| key(existing) != Some(id));
    items.len() != before
}

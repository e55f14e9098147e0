//! Profile editor actions
//!
//! Each action validates locally, writes one sub-resource, and on success
//! merges the backend's echo into the store. Failures leave the store as it
//! was.

use std::collections::HashSet;
use std::sync::Arc;

use talentfolio_common::validation::IsoCountryValidator;
use talentfolio_common::{PhoneValidator, UrlValidator, Validator};
use talentfolio_domain::constants::{ACCEPTED_IMAGE_TYPES, MAX_IMAGE_BYTES};
use talentfolio_domain::utils::normalize_country;
use talentfolio_domain::{
    CreateEducationPayload, CreateWorkPayload, EditingSection, EducationItem, Info, InfoPatch,
    Location, LocationPatch, Notification, PortalError, Preference, PreferencePatch, Result, UpdateEducationPayload, UpdateWorkPayload,
    Upload, WorkItem,
};
use tracing::{debug, instrument};

use super::store::ProfileStore;
use crate::flows::validated;
use crate::user::UserGateway;

fn missing_id() -> PortalError {
    PortalError::InvalidState("entry has not been saved yet".to_string())
}

/// Trim, drop blanks and keep the first of case-insensitive duplicates.
pub fn dedupe_tags(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && seen.insert(v.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn normalize_work(mut item: WorkItem) -> WorkItem {
    item.country = normalize_country(item.country.as_deref());
    item
}

/// Orchestrates the profile page's sub-forms
pub struct ProfileEditor {
    users: Arc<dyn UserGateway>,
    store: Arc<ProfileStore>,
}

impl ProfileEditor {
    pub fn new(users: Arc<dyn UserGateway>, store: Arc<ProfileStore>) -> Self {
        Self { users, store }
    }

    pub fn open(&self, section: Option<EditingSection>) {
        self.store.set_editing(true, section);
    }

    pub fn close(&self) {
        self.store.set_editing(false, None);
    }

    /// Reload the whole profile.
    pub async fn refresh(&self) -> Result<()> {
        self.store.fetch_user().await
    }

    #[instrument(skip(self, info))]
    pub async fn save_info(&self, info: Info) -> Result<InfoPatch> {
        let mut v = Validator::new().stop_on_first_error();
        v.ensure(!info.first_name.trim().is_empty(), "first_name", "First name must not be empty")
            .ensure(!info.last_name.trim().is_empty(), "last_name", "Last name must not be empty");
        if let Some(phone) = info.phone.as_deref().filter(|p| !p.is_empty()) {
            v.validate_field("phone", phone, &PhoneValidator);
        }
        if let Some(linkedin) = info.linkedin.as_deref().filter(|l| !l.is_empty()) {
            v.validate_field("linkedin", linkedin, &UrlValidator);
        }
        for link in info.links.iter().flatten() {
            v.validate_field("links", link.as_str(), &UrlValidator);
        }
        validated(v)?;

        let saved = self.users.update_info(&info).await.into_result()?.info;
        self.store.set_user_info(&saved);
        Ok(saved)
    }

    /// Countries may be typed as names; they are sent as ISO codes.
    #[instrument(skip(self, location))]
    pub async fn save_location(&self, mut location: Location) -> Result<LocationPatch> {
        location.country_residence = normalize_country(location.country_residence.as_deref());
        location.work_country = normalize_country(location.work_country.as_deref());

        let mut v = Validator::new().stop_on_first_error();
        for (field, value) in [
            ("country_residence", &location.country_residence),
            ("work_country", &location.work_country),
        ] {
            if let Some(code) = value {
                v.validate_field(field, code.as_str(), &IsoCountryValidator);
            }
        }
        validated(v)?;

        let saved = self.users.update_location(&location).await.into_result()?.location;
        self.store.set_user_location(&saved);
        Ok(saved)
    }

    /// Skills and languages are de-duplicated, keeping the first spelling.
    #[instrument(skip(self, preference))]
    pub async fn save_preferences(&self, mut preference: Preference) -> Result<PreferencePatch> {
        preference.skills = preference.skills.as_deref().map(dedupe_tags);
        preference.languages = preference.languages.as_deref().map(dedupe_tags);

        let saved = self.users.update_preferences(&preference).await.into_result()?.preferences;
        self.store.set_user_preferences(&saved);
        Ok(saved)
    }

    #[instrument(skip(self, item))]
    pub async fn add_work(&self, item: WorkItem) -> Result<WorkItem> {
        let payload = CreateWorkPayload::new(normalize_work(item));
        let created = self.users.create_work(&payload).await.into_result()?;
        self.store.add_work_local(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, item))]
    pub async fn update_work(&self, item: WorkItem) -> Result<WorkItem> {
        let payload = UpdateWorkPayload::new(normalize_work(item)).ok_or_else(missing_id)?;
        let mut updated = self.users.update_work(&payload).await.into_result()?;
        if updated.server_id().is_none() {
            updated.id.clone_from(&payload.work.id);
        }
        self.store.update_work_local(updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_work(&self, id: &str) -> Result<()> {
        self.users.delete_work(id).await.into_result()?;
        self.store.remove_work_local(id);
        Ok(())
    }

    #[instrument(skip(self, item))]
    pub async fn add_education(&self, item: EducationItem) -> Result<EducationItem> {
        let created =
            self.users.create_education(&CreateEducationPayload::new(item)).await.into_result()?;
        self.store.add_education_local(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, item))]
    pub async fn update_education(&self, item: EducationItem) -> Result<EducationItem> {
        let payload = UpdateEducationPayload::new(item).ok_or_else(missing_id)?;
        let mut updated = self.users.update_education(&payload).await.into_result()?;
        if updated.server_id().is_none() {
            updated.id.clone_from(&payload.educations.id);
        }
        self.store.update_education_local(updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_education(&self, id: &str) -> Result<()> {
        self.users.delete_education(id).await.into_result()?;
        self.store.remove_education_local(id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn upload_resume(&self, file: Upload) -> Result<String> {
        if !file.is_pdf() {
            return Err(PortalError::Validation("Please upload a PDF file.".to_string()));
        }
        let url = self.users.upload_resume(file).await.into_result()?.url;
        self.store.set_user_resume(Some(url.clone()));
        Ok(url)
    }

    pub async fn delete_resume(&self) -> Result<()> {
        self.users.delete_resume().await.into_result()?;
        self.store.set_user_resume(None);
        Ok(())
    }

    /// PNG or JPEG under 5 MB.
    #[instrument(skip(self))]
    pub async fn upload_profile_image(&self, file: Upload) -> Result<String> {
        let content_type = file.content_type.to_ascii_lowercase();
        if !ACCEPTED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(PortalError::Validation(
                "Please upload a PNG or JPEG image. GIFs are not supported.".to_string(),
            ));
        }
        if file.bytes.len() > MAX_IMAGE_BYTES {
            return Err(PortalError::Validation("Image must be under 5MB.".to_string()));
        }
        let url = self.users.upload_profile_image(file).await.into_result()?.profile_img;
        self.store.set_user_profile_image(Some(url.clone()));
        Ok(url)
    }

    pub async fn delete_profile_image(&self) -> Result<()> {
        self.users.delete_profile_image().await.into_result()?;
        self.store.set_user_profile_image(None);
        Ok(())
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        let notifications = self.users.notifications().await.into_result()?.notifications;
        debug!(count = notifications.len(), "notifications loaded");
        Ok(notifications)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::profile::AuthIdentity;
    use crate::testing::FakeUserGateway;

    fn editor() -> (Arc<FakeUserGateway>, Arc<ProfileStore>, ProfileEditor) {
        let users = Arc::new(FakeUserGateway::new());
        let store = Arc::new(ProfileStore::new(users.clone()));
        store.set_user_from_auth(AuthIdentity { name: "Ada".into(), email: "a@b.com".into() });
        let editor = ProfileEditor::new(users.clone(), Arc::clone(&store));
        (users, store, editor)
    }

    fn work_json(id: &str, role: &str) -> serde_json::Value {
        json!({"id": id, "category": "WORK", "name": "Acme", "role": role,
               "start_date": "2022-01", "end_date": "2023-01"})
    }

    #[test]
    fn tags_are_deduplicated_in_order() {
        let tags = vec![" Rust".to_string(), "go".into(), "rust".into(), String::new(), "Go ".into()];
        assert_eq!(dedupe_tags(&tags), vec!["Rust".to_string(), "go".to_string()]);
    }

    #[tokio::test]
    async fn location_countries_are_sent_as_codes() {
        let (users, store, editor) = editor();
        users.respond("update_location", json!({"location": {"work_country": "IN"}}));

        editor
            .save_location(Location { work_country: Some("India".into()), ..Location::default() })
            .await
            .unwrap();

        assert_eq!(users.calls_to("update_location")[0].body["work_country"], "IN");
        assert_eq!(store.user().unwrap().work_country.as_deref(), Some("IN"));
    }

    #[tokio::test]
    async fn failed_save_leaves_store_untouched() {
        let (users, store, editor) = editor();
        let before = store.user();
        users.fail("update_info", "first_name is required");

        let info = Info { first_name: "Ada".into(), last_name: "L".into(), ..Info::default() };
        let err = editor.save_info(info).await.unwrap_err();

        assert_eq!(err.to_string(), "first_name is required");
        assert_eq!(store.user(), before);
    }

    #[tokio::test]
    async fn info_is_validated_locally() {
        let (users, _, editor) = editor();
        let info = Info {
            first_name: "Ada".into(),
            last_name: "L".into(),
            phone: Some("98765".into()),
            ..Info::default()
        };
        let err = editor.save_info(info).await.unwrap_err();
        assert_eq!(err.to_string(), "Phone must be E.164 format");
        assert!(users.calls().is_empty());
    }

    #[tokio::test]
    async fn work_crud_round_trip() {
        let (users, store, editor) = editor();
        users.respond("create_work", work_json("w1", "Dev"));
        users.respond("update_work", work_json("w1", "Lead"));
        users.respond("delete_work", json!({"message": "deleted"}));

        let draft: WorkItem = serde_json::from_value(work_json("ignored", "Dev")).unwrap();
        let created = editor.add_work(draft).await.unwrap();
        assert!(users.calls_to("create_work")[0].body["work"].get("id").is_none());

        let mut edited = created;
        edited.role = Some("Lead".into());
        editor.update_work(edited).await.unwrap();
        assert_eq!(users.calls_to("update_work")[0].body["work"]["id"], "w1");
        assert_eq!(store.user().unwrap().experience[0].role.as_deref(), Some("Lead"));

        editor.delete_work("w1").await.unwrap();
        assert!(store.user().unwrap().experience.is_empty());
    }

    #[tokio::test]
    async fn update_without_id_is_rejected() {
        let (users, _, editor) = editor();
        let err = editor.update_education(EducationItem::default()).await.unwrap_err();
        assert!(matches!(err, PortalError::InvalidState(_)));
        assert!(users.calls().is_empty());
    }

    #[tokio::test]
    async fn avatar_rules_and_delete() {
        let (users, store, editor) = editor();
        let gif = Upload::new("a.gif", "image/gif", vec![0]);
        assert!(matches!(editor.upload_profile_image(gif).await, Err(PortalError::Validation(_))));

        let huge = Upload::new("a.png", "image/png", vec![0; MAX_IMAGE_BYTES + 1]);
        let err = editor.upload_profile_image(huge).await.unwrap_err();
        assert_eq!(err.to_string(), "Image must be under 5MB.");

        users.respond("upload_profile_image", json!({"profile_img": "https://cdn/a.png"}));
        editor.upload_profile_image(Upload::new("a.png", "image/png", vec![0])).await.unwrap();
        assert_eq!(store.user().unwrap().profile_img.as_deref(), Some("https://cdn/a.png"));

        users.respond("delete_profile_image", json!({"message": "ok"}));
        editor.delete_profile_image().await.unwrap();
        assert_eq!(store.user().unwrap().profile_img, None);
    }

    #[tokio::test]
    async fn notifications_are_listed() {
        let (users, _, editor) = editor();
        users.respond(
            "notifications",
            json!({"notifications": [{"_id": "n1", "user_id": "u1", "title": "Hi", "date": "2025-01-01"}]}),
        );
        let list = editor.notifications().await.unwrap();
        assert_eq!(list[0].title, "Hi");
    }

    #[test]
    fn open_and_close_drive_editing_state() {
        let (_, store, editor) = editor();
        editor.open(Some(EditingSection::WorkPreferences));
        assert_eq!(store.snapshot().editing_section, Some(EditingSection::WorkPreferences));
        editor.close();
        assert!(!store.snapshot().is_editing);
    }
}

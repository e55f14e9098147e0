//! Port interfaces for the `/user/*` endpoints
//!
//! Every method returns the backend envelope untouched. Callers check
//! `is_success()` and only then apply the echoed data to the profile store.

use async_trait::async_trait;
use talentfolio_domain::{
    ApiEnvelope, CreateEducationPayload, CreateWorkPayload, EducationItem, Info, InfoResponse,
    Location, LocationResponse, MessageResponse, NotificationsResponse, Preference,
    PreferencesResponse, ProfileImageResponse, ResumeResponse, UpdateEducationPayload,
    UpdateWorkPayload, Upload, UserResponse, WorkItem,
};

/// Profile sub-resources of the signed-in user
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// `GET /user`: full aggregate with experience and education
    async fn get_user(&self) -> ApiEnvelope<UserResponse>;

    /// `POST /user/info`
    async fn update_info(&self, info: &Info) -> ApiEnvelope<InfoResponse>;

    /// `POST /user/location`
    async fn update_location(&self, location: &Location) -> ApiEnvelope<LocationResponse>;

    /// `POST /user/preference`
    async fn update_preferences(&self, preference: &Preference)
        -> ApiEnvelope<PreferencesResponse>;

    /// `POST /user/work/`
    async fn create_work(&self, payload: &CreateWorkPayload) -> ApiEnvelope<WorkItem>;

    /// `PUT /user/work`
    async fn update_work(&self, payload: &UpdateWorkPayload) -> ApiEnvelope<WorkItem>;

    /// `DELETE /user/work/:id`
    async fn delete_work(&self, id: &str) -> ApiEnvelope<MessageResponse>;

    /// `POST /user/education`
    async fn create_education(&self, payload: &CreateEducationPayload)
        -> ApiEnvelope<EducationItem>;

    /// `PUT /user/education`
    async fn update_education(&self, payload: &UpdateEducationPayload)
        -> ApiEnvelope<EducationItem>;

    /// `DELETE /user/educations/:id`
    async fn delete_education(&self, id: &str) -> ApiEnvelope<MessageResponse>;

    /// `POST /user/resume`, multipart field `resume`
    async fn upload_resume(&self, file: Upload) -> ApiEnvelope<ResumeResponse>;

    /// `DELETE /user/resume`
    async fn delete_resume(&self) -> ApiEnvelope<MessageResponse>;

    /// `POST /user/profile`, multipart field `profile`
    async fn upload_profile_image(&self, file: Upload) -> ApiEnvelope<ProfileImageResponse>;

    /// `DELETE /user/profile`
    async fn delete_profile_image(&self) -> ApiEnvelope<MessageResponse>;

    /// `GET /user/notifications`
    async fn notifications(&self) -> ApiEnvelope<NotificationsResponse>;
}

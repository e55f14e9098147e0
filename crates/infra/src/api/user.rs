//! `/user/*` endpoints

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use talentfolio_core::UserGateway;
use talentfolio_domain::{
    ApiEnvelope, CreateEducationPayload, CreateWorkPayload, EducationItem, Info, InfoResponse,
    Location, LocationResponse, MessageResponse, NotificationsResponse, Preference,
    PreferencesResponse, ProfileImageResponse, ResumeResponse, UpdateEducationPayload,
    UpdateWorkPayload, Upload, UserResponse, WorkItem,
};
use tracing::instrument;

use crate::http::{ApiTransport, RequestBody, RequestOptions};

/// [`UserGateway`] backed by the portal REST API
#[derive(Debug, Clone)]
pub struct HttpUserGateway {
    transport: ApiTransport,
}

impl HttpUserGateway {
    pub const fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiEnvelope<T> {
        self.transport.request(endpoint, options).await.decode()
    }

    async fn send_json<B, T>(&self, endpoint: &str, method: Method, body: &B) -> ApiEnvelope<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        match serde_json::to_value(body) {
            Ok(body) => {
                let options = RequestOptions {
                    method,
                    body: Some(RequestBody::Json(body)),
                    ..RequestOptions::default()
                };
                self.send(endpoint, options).await
            }
            Err(err) => ApiEnvelope::failure(format!("Failed to encode request body: {err}")),
        }
    }
}

#[async_trait]
impl UserGateway for HttpUserGateway {
    #[instrument(skip(self))]
    async fn get_user(&self) -> ApiEnvelope<UserResponse> {
        self.send("/user", RequestOptions::get()).await
    }

    #[instrument(skip_all)]
    async fn update_info(&self, info: &Info) -> ApiEnvelope<InfoResponse> {
        self.send_json("/user/info", Method::POST, info).await
    }

    #[instrument(skip_all)]
    async fn update_location(&self, location: &Location) -> ApiEnvelope<LocationResponse> {
        self.send_json("/user/location", Method::POST, location).await
    }

    #[instrument(skip_all)]
    async fn update_preferences(
        &self,
        preference: &Preference,
    ) -> ApiEnvelope<PreferencesResponse> {
        self.send_json("/user/preference", Method::POST, preference).await
    }

    #[instrument(skip_all)]
    async fn create_work(&self, payload: &CreateWorkPayload) -> ApiEnvelope<WorkItem> {
        self.send_json("/user/work/", Method::POST, payload).await
    }

    #[instrument(skip_all)]
    async fn update_work(&self, payload: &UpdateWorkPayload) -> ApiEnvelope<WorkItem> {
        self.send_json("/user/work", Method::PUT, payload).await
    }

    #[instrument(skip(self))]
    async fn delete_work(&self, id: &str) -> ApiEnvelope<MessageResponse> {
        let endpoint = format!("/user/work/{}", urlencoding::encode(id));
        self.send(&endpoint, RequestOptions::delete()).await
    }

    #[instrument(skip_all)]
    async fn create_education(
        &self,
        payload: &CreateEducationPayload,
    ) -> ApiEnvelope<EducationItem> {
        self.send_json("/user/education", Method::POST, payload).await
    }

    #[instrument(skip_all)]
    async fn update_education(
        &self,
        payload: &UpdateEducationPayload,
    ) -> ApiEnvelope<EducationItem> {
        self.send_json("/user/education", Method::PUT, payload).await
    }

    /// The delete path is plural, unlike create and update.
    #[instrument(skip(self))]
    async fn delete_education(&self, id: &str) -> ApiEnvelope<MessageResponse> {
        let endpoint = format!("/user/educations/{}", urlencoding::encode(id));
        self.send(&endpoint, RequestOptions::delete()).await
    }

    #[instrument(skip(self))]
    async fn upload_resume(&self, file: Upload) -> ApiEnvelope<ResumeResponse> {
        self.send("/user/resume", RequestOptions::multipart("resume", file)).await
    }

    #[instrument(skip(self))]
    async fn delete_resume(&self) -> ApiEnvelope<MessageResponse> {
        self.send("/user/resume", RequestOptions::delete()).await
    }

    #[instrument(skip(self))]
    async fn upload_profile_image(&self, file: Upload) -> ApiEnvelope<ProfileImageResponse> {
        self.send("/user/profile", RequestOptions::multipart("profile", file)).await
    }

    #[instrument(skip(self))]
    async fn delete_profile_image(&self) -> ApiEnvelope<MessageResponse> {
        self.send("/user/profile", RequestOptions::delete()).await
    }

    #[instrument(skip(self))]
    async fn notifications(&self) -> ApiEnvelope<NotificationsResponse> {
        self.send("/user/notifications", RequestOptions::get()).await
    }
}

//! Scripted in-memory gateways for tests
//!
//! Responses are queued per operation name (the port method name, e.g.
//! `"create_work"`) and consumed in order. Every call is recorded with its
//! JSON body so tests can assert on what would have been sent.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use talentfolio_domain::{
    ApiEnvelope, ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest,
    CreateEducationPayload, CreateWorkPayload, DeleteAccountRequest, EducationItem,
    ErrorPayload, ForgotPasswordRequest, Info, InfoResponse, Location, LocationResponse,
    LoginRequest, MessageResponse, NotificationsResponse, OAuthProvider, OtpReason, PortalError,
    Preference, PreferencesResponse, ProfileImageResponse, RedirectUrl, Result, ResumeResponse,
    SignupRequest, UpdateEducationPayload, UpdateWorkPayload, Upload, UserResponse, WorkItem,
};

use crate::auth::AuthGateway;
use crate::user::UserGateway;

/// A call captured by a fake gateway
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub body: Value,
}

struct Scripted {
    delay: Duration,
    outcome: Result<Value>,
}

#[derive(Default)]
struct Script {
    queue: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Script {
    fn push(&self, operation: &'static str, delay: Duration, outcome: Result<Value>) {
        self.queue.lock().entry(operation).or_default().push_back(Scripted { delay, outcome });
    }

    async fn next(&self, operation: &'static str, body: Value) -> Option<Result<Value>> {
        self.calls.lock().push(RecordedCall { operation, body });
        let scripted = self.queue.lock().get_mut(operation).and_then(VecDeque::pop_front)?;
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        Some(scripted.outcome)
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

fn body_of<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn upload_body(file: &Upload) -> Value {
    json!({"file_name": file.file_name, "content_type": file.content_type, "len": file.bytes.len()})
}

/// Scripted [`UserGateway`]
#[derive(Default)]
pub struct FakeUserGateway {
    script: Script,
}

impl FakeUserGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful envelope carrying `data`.
    pub fn respond(&self, operation: &'static str, data: Value) {
        self.script.push(operation, Duration::ZERO, Ok(data));
    }

    /// Queue a successful envelope delivered after `delay`.
    pub fn respond_after(&self, operation: &'static str, delay: Duration, data: Value) {
        self.script.push(operation, delay, Ok(data));
    }

    /// Queue a failed envelope with a single message.
    pub fn fail(&self, operation: &'static str, message: &str) {
        self.fail_after(operation, Duration::ZERO, message);
    }

    /// Queue a failed envelope delivered after `delay`.
    pub fn fail_after(&self, operation: &'static str, delay: Duration, message: &str) {
        self.script.push(operation, delay, Err(PortalError::api(message)));
    }

    /// Queue a failed envelope with an arbitrary payload.
    pub fn fail_with(&self, operation: &'static str, payload: ErrorPayload) {
        self.script.push(operation, Duration::ZERO, Err(PortalError::Api(payload)));
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.calls()
    }

    /// Calls to one operation.
    pub fn calls_to(&self, operation: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.operation == operation).collect()
    }

    async fn envelope<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        body: Value,
    ) -> ApiEnvelope<T> {
        match self.script.next(operation, body).await {
            Some(Ok(data)) => ApiEnvelope::Success(data).decode(),
            Some(Err(PortalError::Api(payload))) => ApiEnvelope::Failure(payload),
            Some(Err(other)) => ApiEnvelope::failure(other.to_string()),
            None => ApiEnvelope::failure(format!("no scripted response for {operation}")),
        }
    }
}

#[async_trait]
impl UserGateway for FakeUserGateway {
    async fn get_user(&self) -> ApiEnvelope<UserResponse> {
        self.envelope("get_user", Value::Null).await
    }

    async fn update_info(&self, info: &Info) -> ApiEnvelope<InfoResponse> {
        self.envelope("update_info", body_of(info)).await
    }

    async fn update_location(&self, location: &Location) -> ApiEnvelope<LocationResponse> {
        self.envelope("update_location", body_of(location)).await
    }

    async fn update_preferences(
        &self,
        preference: &Preference,
    ) -> ApiEnvelope<PreferencesResponse> {
        self.envelope("update_preferences", body_of(preference)).await
    }

    async fn create_work(&self, payload: &CreateWorkPayload) -> ApiEnvelope<WorkItem> {
        self.envelope("create_work", body_of(payload)).await
    }

    async fn update_work(&self, payload: &UpdateWorkPayload) -> ApiEnvelope<WorkItem> {
        self.envelope("update_work", body_of(payload)).await
    }

    async fn delete_work(&self, id: &str) -> ApiEnvelope<MessageResponse> {
        self.envelope("delete_work", json!({ "id": id })).await
    }

    async fn create_education(
        &self,
        payload: &CreateEducationPayload,
    ) -> ApiEnvelope<EducationItem> {
        self.envelope("create_education", body_of(payload)).await
    }

    async fn update_education(
        &self,
        payload: &UpdateEducationPayload,
    ) -> ApiEnvelope<EducationItem> {
        self.envelope("update_education", body_of(payload)).await
    }

    async fn delete_education(&self, id: &str) -> ApiEnvelope<MessageResponse> {
        self.envelope("delete_education", json!({ "id": id })).await
    }

    async fn upload_resume(&self, file: Upload) -> ApiEnvelope<ResumeResponse> {
        self.envelope("upload_resume", upload_body(&file)).await
    }

    async fn delete_resume(&self) -> ApiEnvelope<MessageResponse> {
        self.envelope("delete_resume", Value::Null).await
    }

    async fn upload_profile_image(&self, file: Upload) -> ApiEnvelope<ProfileImageResponse> {
        self.envelope("upload_profile_image", upload_body(&file)).await
    }

    async fn delete_profile_image(&self) -> ApiEnvelope<MessageResponse> {
        self.envelope("delete_profile_image", Value::Null).await
    }

    async fn notifications(&self) -> ApiEnvelope<NotificationsResponse> {
        self.envelope("notifications", Value::Null).await
    }
}

/// Scripted [`AuthGateway`]
///
/// Unscripted calls succeed with an empty object.
#[derive(Default)]
pub struct FakeAuthGateway {
    script: Script,
}

impl FakeAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a success carrying `data`.
    pub fn respond(&self, operation: &'static str, data: Value) {
        self.script.push(operation, Duration::ZERO, Ok(data));
    }

    /// Queue a failure.
    pub fn fail(&self, operation: &'static str, error: PortalError) {
        self.script.push(operation, Duration::ZERO, Err(error));
    }

    /// Queue a 429 with the given retry-after.
    pub fn rate_limit(&self, operation: &'static str, retry_after_secs: u64) {
        self.fail(
            operation,
            PortalError::RateLimited {
                message: talentfolio_domain::constants::RATE_LIMIT_MESSAGE.to_string(),
                retry_after_secs,
            },
        );
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.calls()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.operation == operation).collect()
    }

    async fn call(&self, operation: &'static str, body: Value) -> Result<Value> {
        self.script.next(operation, body).await.unwrap_or_else(|| Ok(json!({})))
    }

    async fn call_as<T: DeserializeOwned>(&self, operation: &'static str, body: Value) -> Result<T> {
        let data = self.call(operation, body).await?;
        serde_json::from_value(data).map_err(|e| PortalError::Internal(e.to_string()))
    }
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn request_email_otp(&self, email: &str, reason: OtpReason) -> Result<()> {
        self.call("request_email_otp", json!({ "email": email, "reason": reason })).await.map(drop)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<Value> {
        self.call("signup", body_of(request)).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Value> {
        self.call("login", body_of(request)).await
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<()> {
        self.call("forgot_password", body_of(request)).await.map(drop)
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.call("change_password", body_of(request)).await.map(drop)
    }

    async fn logout(&self) -> Result<MessageResponse> {
        self.call_as("logout", Value::Null).await
    }

    async fn change_email(&self, request: &ChangeEmailRequest) -> Result<()> {
        self.call("change_email", body_of(request)).await.map(drop)
    }

    async fn delete_account(&self, request: &DeleteAccountRequest) -> Result<MessageResponse> {
        self.call_as("delete_account", body_of(request)).await
    }

    async fn request_phone_otp(&self, phone: &str) -> Result<()> {
        self.call("request_phone_otp", json!({ "phone": phone })).await.map(drop)
    }

    async fn change_phone(&self, request: &ChangePhoneRequest) -> Result<()> {
        self.call("change_phone", body_of(request)).await.map(drop)
    }

    async fn oauth_url(&self, provider: OAuthProvider) -> Result<String> {
        self.call_as::<RedirectUrl>("oauth_url", json!({ "provider": provider }))
            .await
            .map(|redirect| redirect.url)
    }
}

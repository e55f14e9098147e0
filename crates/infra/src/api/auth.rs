//! `/auth/*` endpoints
//!
//! A 429 from any of these becomes [`PortalError::RateLimited`] carrying the
//! `Retry-After` seconds (60 when the header is missing or unreadable).
//! Endpoints where the user is typing credentials do not fire the
//! unauthorized registry, so a wrong password stays an inline error.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use talentfolio_core::AuthGateway;
use talentfolio_domain::constants::{
    DEFAULT_RATE_LIMIT_SECS, INVALID_JSON_MESSAGE, RATE_LIMIT_MESSAGE,
};
use talentfolio_domain::{
    ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest, DeleteAccountRequest,
    EmailOtpRequest, ForgotPasswordRequest, LoginRequest, MessageResponse, OAuthProvider,
    OtpReason, PhoneOtpRequest, PortalError, RedirectUrl, Result, SignupRequest,
};
use tracing::{debug, instrument};

use crate::http::{ApiTransport, RawResponse, RequestOptions};

/// [`AuthGateway`] backed by the portal REST API
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    transport: ApiTransport,
}

impl HttpAuthGateway {
    pub const fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    async fn call(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let raw = self.transport.request_raw(endpoint, options).await;
        into_result(raw)
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let data = self.call(endpoint, options).await?;
        serde_json::from_value(data)
            .map_err(|_| PortalError::Transport(INVALID_JSON_MESSAGE.to_string()))
    }
}

fn body_of<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| PortalError::Internal(format!("Failed to encode request body: {e}")))
}

fn into_result(raw: RawResponse) -> Result<Value> {
    let RawResponse { status, retry_after_secs, envelope } = raw;
    match status {
        Some(StatusCode::TOO_MANY_REQUESTS) => {
            let retry_after_secs = retry_after_secs.unwrap_or(DEFAULT_RATE_LIMIT_SECS);
            debug!(retry_after_secs, "rate limited");
            Err(PortalError::RateLimited {
                message: RATE_LIMIT_MESSAGE.to_string(),
                retry_after_secs,
            })
        }
        // No response at all: keep the network text but mark it as transport.
        None => Err(PortalError::Transport(envelope.error_message().unwrap_or_default())),
        Some(_) => envelope.into_result(),
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    #[instrument(skip(self, email))]
    async fn request_email_otp(&self, email: &str, reason: OtpReason) -> Result<()> {
        let body = body_of(&EmailOtpRequest { email: email.to_string(), reason })?;
        let options = RequestOptions::post(body).without_unauthorized_notice();
        self.call("/auth/req_email_otp", options).await.map(drop)
    }

    #[instrument(skip_all)]
    async fn signup(&self, request: &SignupRequest) -> Result<Value> {
        let options = RequestOptions::post(body_of(request)?).without_unauthorized_notice();
        self.call("/auth/signup", options).await
    }

    #[instrument(skip_all)]
    async fn login(&self, request: &LoginRequest) -> Result<Value> {
        let options = RequestOptions::post(body_of(request)?).without_unauthorized_notice();
        self.call("/auth/login", options).await
    }

    #[instrument(skip_all)]
    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<()> {
        let options = RequestOptions::post(body_of(request)?).without_unauthorized_notice();
        self.call("/auth/forgot_password", options).await.map(drop)
    }

    #[instrument(skip_all)]
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        self.call("/auth/change_password", RequestOptions::post(body_of(request)?)).await.map(drop)
    }

    /// Runs during session teardown, so a 401 here must not re-enter it.
    #[instrument(skip(self))]
    async fn logout(&self) -> Result<MessageResponse> {
        let options = RequestOptions::post_empty().without_unauthorized_notice();
        self.call_as("/auth/logout", options).await
    }

    #[instrument(skip_all)]
    async fn change_email(&self, request: &ChangeEmailRequest) -> Result<()> {
        self.call("/auth/change_email", RequestOptions::post(body_of(request)?)).await.map(drop)
    }

    #[instrument(skip_all)]
    async fn delete_account(&self, request: &DeleteAccountRequest) -> Result<MessageResponse> {
        self.call_as("/auth/delete_account", RequestOptions::delete_with(body_of(request)?)).await
    }

    #[instrument(skip_all)]
    async fn request_phone_otp(&self, phone: &str) -> Result<()> {
        let body = body_of(&PhoneOtpRequest { phone: phone.to_string() })?;
        self.call("/auth/req_phone_otp", RequestOptions::post(body)).await.map(drop)
    }

    #[instrument(skip_all)]
    async fn change_phone(&self, request: &ChangePhoneRequest) -> Result<()> {
        self.call("/auth/change_phone", RequestOptions::post(body_of(request)?)).await.map(drop)
    }

    #[instrument(skip(self))]
    async fn oauth_url(&self, provider: OAuthProvider) -> Result<String> {
        let options = RequestOptions::get().without_unauthorized_notice();
        let redirect: RedirectUrl = self.call_as(provider.endpoint(), options).await?;
        Ok(redirect.url)
    }
}

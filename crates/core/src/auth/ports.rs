//! Port interfaces for the `/auth/*` endpoints
//!
//! Unlike the user gateway these calls resolve to `Result`: a failed envelope
//! becomes [`PortalError::Api`](talentfolio_domain::PortalError::Api) and a
//! 429 becomes `PortalError::RateLimited` so flows can start a cooldown.

use async_trait::async_trait;
use serde_json::Value;
use talentfolio_domain::{
    ChangeEmailRequest, ChangePasswordRequest, ChangePhoneRequest, DeleteAccountRequest,
    ForgotPasswordRequest, LoginRequest, MessageResponse, OAuthProvider, OtpReason, Result,
    SignupRequest,
};

/// Account and session operations
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /auth/req_email_otp`
    async fn request_email_otp(&self, email: &str, reason: OtpReason) -> Result<()>;

    /// `POST /auth/signup`; the backend sets the session cookie
    async fn signup(&self, request: &SignupRequest) -> Result<Value>;

    /// `POST /auth/login`; the backend sets the session cookie
    async fn login(&self, request: &LoginRequest) -> Result<Value>;

    /// `POST /auth/forgot_password`
    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<()>;

    /// `POST /auth/change_password`; destroys the session on success
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<MessageResponse>;

    /// `POST /auth/change_email`; destroys the session on success
    async fn change_email(&self, request: &ChangeEmailRequest) -> Result<()>;

    /// `DELETE /auth/delete_account`
    async fn delete_account(&self, request: &DeleteAccountRequest) -> Result<MessageResponse>;

    /// `POST /auth/req_phone_otp`
    async fn request_phone_otp(&self, phone: &str) -> Result<()>;

    /// `POST /auth/change_phone`
    async fn change_phone(&self, request: &ChangePhoneRequest) -> Result<()>;

    /// `GET /auth/google` or `GET /auth/linkedin`: provider redirect URL
    async fn oauth_url(&self, provider: OAuthProvider) -> Result<String>;
}

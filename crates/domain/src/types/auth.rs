//! Request bodies for the `/auth/*` endpoints

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_wire_str_conversions;

/// Why an email OTP is being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum OtpReason {
    Signup,
    ForgetPassword,
    ChangeEmail,
    DeleteAccount,
    ChangePassword,
}

impl_wire_str_conversions!(OtpReason {
    Signup => "signup",
    ForgetPassword => "forget password",
    ChangeEmail => "change email",
    DeleteAccount => "delete account",
    ChangePassword => "change password",
});

/// Social login provider handled by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Linkedin,
}

impl_wire_str_conversions!(OAuthProvider {
    Google => "google",
    Linkedin => "linkedin",
});

impl OAuthProvider {
    /// Endpoint returning the provider redirect URL.
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Google => "/auth/google",
            Self::Linkedin => "/auth/linkedin",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailOtpRequest {
    pub email: String,
    pub reason: OtpReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub otp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeEmailRequest {
    pub old_email: String,
    pub new_email: String,
    pub otp_old_email: String,
    pub otp_new_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteAccountRequest {
    pub email: String,
    pub password: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhoneOtpRequest {
    pub phone: String,
}

/// Body of `POST /auth/change_phone`; this endpoint takes the OTP as a number
#[derive(Debug, Clone, Serialize)]
pub struct ChangePhoneRequest {
    pub phone: String,
    pub otp: u32,
}

/// `GET /auth/google|linkedin` data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedirectUrl {
    pub url: String,
}

//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Backend contract
pub const DEFAULT_API_BASE: &str = "/api/v1";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const SESSION_COOKIE: &str = "session_token";

// Transport messages
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";
pub const NON_JSON_MESSAGE: &str = "Server returned non-JSON response";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response from server";
pub const NETWORK_FAILURE_MESSAGE: &str = "Network request failed";
pub const RAW_SNIPPET_CHARS: usize = 80;
pub const RATE_LIMIT_MESSAGE: &str = "Too many attempts. Please try again in a few minutes.";

// Form rules
pub const OTP_LENGTH: usize = 6;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_PHONE_DIGITS: usize = 6;
pub const CGPA_MIN: f64 = 0.0;
pub const CGPA_MAX: f64 = 10.0;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];

// Cooldowns (seconds)
pub const DEFAULT_RATE_LIMIT_SECS: u64 = 60;
pub const RESEND_COOLDOWN_SECS: u64 = 30;

// Profile store
pub const PLACEHOLDER_USER_ID: &str = "temp";
pub const UNKNOWN_USER_ID: &str = "unknown";
pub const DEFAULT_DISPLAY_NAME: &str = "User";
pub const LOCAL_ID_PREFIX: &str = "local-";
pub const PROFILE_EVENT_CAPACITY: usize = 64;

// Onboarding community invites
pub const IIT_WHATSAPP_LINK: &str = "https://chat.whatsapp.com/L7ZEuoTB1k51v5kDWgvZwS";
pub const DEFAULT_WHATSAPP_LINK: &str = "https://chat.whatsapp.com/KsqJj2X3Ogy7trjj5TyLSR";
pub const IIT_PATTERN: &str = r"(?i)iit|indian\s*institute\s*of\s*technology";

// Routes
pub const ROUTE_SIGNIN: &str = "/signin";
pub const ROUTE_PROFILE: &str = "/profile";
pub const ROUTE_ONBOARDING: &str = "/onboarding";
pub const ROUTE_HOME: &str = "/";
pub const ROUTE_SIGNUP: &str = "/signup";
/// Query key carrying a referrer's user id
pub const REFERRAL_QUERY_PARAM: &str = "ref";
pub const PROTECTED_ROUTES: &[&str] =
    &["/profile", "/jobs", "/settings", "/agent", "/alerts", "/onboarding"];
pub const AUTH_ROUTES: &[&str] = &["/signin", "/signup", "/forgot-password"];

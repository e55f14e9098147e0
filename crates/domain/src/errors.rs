//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::envelope::{ErrorPayload, FieldErrorMap};

/// Main error type for Talentfolio
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PortalError {
    /// The backend answered with `success: false`
    #[error("{}", .0.message())]
    Api(ErrorPayload),

    /// Network failure or a response that could not be decoded
    #[error("{0}")]
    Transport(String),

    /// HTTP 429 from a credential endpoint
    #[error("{message}")]
    RateLimited {
        /// User-facing message
        message: String,
        /// Seconds the backend asked us to wait
        retry_after_secs: u64,
    },

    /// A local check failed before any request was sent
    #[error("{0}")]
    Validation(String),

    /// A cooldown timer is still running
    #[error("Try again in {remaining_secs}s…")]
    CoolingDown {
        /// Whole seconds left on the timer
        remaining_secs: u64,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    /// Build an API error carrying a single message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(ErrorPayload::Message(message.into()))
    }

    /// Message shown inline next to the form that triggered the error.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Seconds to wait before retrying, when the backend rate-limited us.
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs, .. } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Whether this error came from a 429 response.
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Field-keyed errors, when the backend sent any.
    pub const fn field_errors(&self) -> Option<&FieldErrorMap> {
        match self {
            Self::Api(ErrorPayload::FieldErrors(fields)) => Some(fields),
            _ => None,
        }
    }
}

/// Result type alias for Talentfolio operations
pub type Result<T> = std::result::Result<T, PortalError>;

//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use reqwest::Error as HttpError;
use talentfolio_domain::constants::NETWORK_FAILURE_MESSAGE;
use talentfolio_domain::PortalError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PortalError);

impl From<InfraError> for PortalError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PortalError> for InfraError {
    fn from(value: PortalError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPortalError {
    fn into_portal(self) -> PortalError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PortalError */
/* -------------------------------------------------------------------------- */

impl IntoPortalError for HttpError {
    fn into_portal(self) -> PortalError {
        if self.is_builder() {
            return PortalError::Config(format!("invalid HTTP client setup: {self}"));
        }

        let message = self.to_string();
        if message.trim().is_empty() {
            PortalError::Transport(NETWORK_FAILURE_MESSAGE.to_string())
        } else {
            PortalError::Transport(message)
        }
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_portal())
    }
}

/* -------------------------------------------------------------------------- */
/* config file errors → PortalError */
/* -------------------------------------------------------------------------- */

impl IntoPortalError for IoError {
    fn into_portal(self) -> PortalError {
        PortalError::Config(format!("Failed to read config file: {self}"))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_portal())
    }
}

impl IntoPortalError for toml::de::Error {
    fn into_portal(self) -> PortalError {
        PortalError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(value.into_portal())
    }
}

impl IntoPortalError for serde_json::Error {
    fn into_portal(self) -> PortalError {
        PortalError::Config(format!("Invalid JSON format: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(value.into_portal())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

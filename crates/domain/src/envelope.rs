//! Response envelope shared by every backend endpoint
//!
//! The backend always answers with `{ "success": bool, "data": ... }`. On
//! failure `data.error` is either a plain string or an object keyed by field
//! name whose values are a string or a list of strings.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::errors::PortalError;

/// Error body carried by a failed envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// A single global error
    Message(String),
    /// Per-field validation errors, in the order the backend sent them
    FieldErrors(FieldErrorMap),
}

/// Field name to messages, keeping the backend's key order
pub type FieldErrorMap = IndexMap<String, Vec<String>>;

impl ErrorPayload {
    /// Build a payload from the raw `data.error` value.
    ///
    /// Anything that is neither a string nor an object collapses to an empty
    /// field map, which formats as the generic message.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(message) => Self::Message(message),
            Value::Object(map) => Self::FieldErrors(
                map.into_iter().map(|(field, messages)| (field, flatten_messages(messages))).collect(),
            ),
            _ => Self::FieldErrors(FieldErrorMap::new()),
        }
    }

    /// Human-readable message for display.
    ///
    /// Field errors are rendered as `"field: m1, m2"` fragments joined with
    /// `". "`. An empty map yields the generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Message(message) => message.clone(),
            Self::FieldErrors(fields) if fields.is_empty() => GENERIC_ERROR_MESSAGE.to_string(),
            Self::FieldErrors(fields) => fields
                .iter()
                .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
                .collect::<Vec<_>>()
                .join(". "),
        }
    }

    /// Messages reported for one field, if any.
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            Self::FieldErrors(fields) => fields.get(name).map(|messages| messages.join(", ")),
            Self::Message(_) => None,
        }
    }
}

fn flatten_messages(value: Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(message) => message,
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

impl<'de> Deserialize<'de> for ErrorPayload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

/// Normalized `{success, data}` response
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEnvelope<T> {
    /// `success: true` with the decoded `data`
    Success(T),
    /// `success: false` with `data.error`
    Failure(ErrorPayload),
}

impl<T> ApiEnvelope<T> {
    /// Failed envelope with a single message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(ErrorPayload::Message(message.into()))
    }

    /// Equivalent of checking `success === true`.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The error payload of a failed envelope.
    pub const fn error(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Failure(payload) => Some(payload),
            Self::Success(_) => None,
        }
    }

    /// Formatted error message of a failed envelope.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ErrorPayload::message)
    }

    /// Transform the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        match self {
            Self::Success(data) => ApiEnvelope::Success(f(data)),
            Self::Failure(payload) => ApiEnvelope::Failure(payload),
        }
    }

    /// Convert into a `Result`, turning failures into [`PortalError::Api`].
    ///
    /// # Errors
    /// Returns [`PortalError::Api`] when the envelope is a failure.
    pub fn into_result(self) -> Result<T, PortalError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(payload) => Err(PortalError::Api(payload)),
        }
    }
}

impl ApiEnvelope<Value> {
    /// Decode the untyped success payload into `T`.
    ///
    /// A payload that does not match the expected shape is reported the same
    /// way as an unparseable body.
    pub fn decode<T: DeserializeOwned>(self) -> ApiEnvelope<T> {
        match self {
            Self::Success(data) => match serde_json::from_value(data) {
                Ok(decoded) => ApiEnvelope::Success(decoded),
                Err(_) => ApiEnvelope::failure(crate::constants::INVALID_JSON_MESSAGE),
            },
            Self::Failure(payload) => ApiEnvelope::Failure(payload),
        }
    }
}

#[derive(Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: Value,
}

impl<'de, T> Deserialize<'de> for ApiEnvelope<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawEnvelope::deserialize(deserializer)?;
        if raw.success {
            return serde_json::from_value(raw.data).map(Self::Success).map_err(D::Error::custom);
        }
        let error = match raw.data {
            Value::Object(mut data) => data.remove("error").unwrap_or(Value::Null),
            _ => Value::Null,
        };
        Ok(Self::Failure(ErrorPayload::from_value(error)))
    }
}

impl<T: Serialize> Serialize for ApiEnvelope<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Wire<D: Serialize> {
            success: bool,
            data: D,
        }
        #[derive(Serialize)]
        struct ErrorData<'a> {
            error: &'a ErrorPayload,
        }

        match self {
            Self::Success(data) => Wire { success: true, data }.serialize(serializer),
            Self::Failure(error) => {
                Wire { success: false, data: ErrorData { error } }.serialize(serializer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_payload_is_returned_verbatim() {
        let envelope: ApiEnvelope<Value> =
            serde_json::from_value(json!({"success": false, "data": {"error": "bad"}})).unwrap();
        assert_eq!(envelope.error_message().as_deref(), Some("bad"));
    }

    #[test]
    fn field_errors_join_field_and_message() {
        let payload = ErrorPayload::from_value(json!({"email": ["required"], "otp": "invalid"}));
        let message = payload.message();

        assert!(message.contains("email: required"));
        assert!(message.contains("otp: invalid"));
        assert_eq!(message, "email: required. otp: invalid");
    }

    #[test]
    fn field_errors_keep_backend_key_order() {
        let envelope: ApiEnvelope<Value> = serde_json::from_str(
            r#"{"success": false, "data": {"error": {"otp": "invalid", "email": ["required"]}}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error_message().as_deref(), Some("otp: invalid. email: required"));
    }

    #[test]
    fn multiple_messages_for_one_field_are_comma_joined() {
        let payload = ErrorPayload::from_value(json!({"password": ["too short", "too common"]}));
        assert_eq!(payload.message(), "password: too short, too common");
        assert_eq!(payload.field("password").as_deref(), Some("too short, too common"));
    }

    #[test]
    fn empty_or_missing_error_uses_generic_message() {
        assert_eq!(ErrorPayload::from_value(json!({})).message(), "An error occurred");

        let envelope: ApiEnvelope<Value> =
            serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(envelope.error_message().as_deref(), Some("An error occurred"));
    }

    #[test]
    fn success_envelope_decodes_typed_data() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Url {
            url: String,
        }

        let envelope: ApiEnvelope<Url> =
            serde_json::from_value(json!({"success": true, "data": {"url": "https://x"}})).unwrap();
        assert_eq!(envelope, ApiEnvelope::Success(Url { url: "https://x".into() }));
    }

    #[test]
    fn decode_reports_shape_mismatch_as_invalid_json() {
        let envelope = ApiEnvelope::Success(json!({"unexpected": true}));
        let decoded: ApiEnvelope<Vec<String>> = envelope.decode();
        assert_eq!(decoded.error_message().as_deref(), Some("Invalid JSON response from server"));
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let envelope: ApiEnvelope<Value> = ApiEnvelope::failure("nope");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": false, "data": {"error": "nope"}})
        );
    }

    #[test]
    fn into_result_maps_failure_to_api_error() {
        let envelope: ApiEnvelope<()> = ApiEnvelope::failure("denied");
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err, PortalError::api("denied"));
    }
}

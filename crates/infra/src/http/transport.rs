//! Envelope-normalizing transport
//!
//! Every call resolves to an [`ApiEnvelope`]; nothing here returns `Err`.
//! Network failures, non-JSON bodies and error statuses are folded into a
//! failed envelope with a fixed message so callers only ever branch on
//! `is_success()`.

use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use talentfolio_core::UnauthorizedRegistry;
use talentfolio_domain::constants::{
    INVALID_JSON_MESSAGE, NETWORK_FAILURE_MESSAGE, NON_JSON_MESSAGE, RAW_SNIPPET_CHARS,
};
use talentfolio_domain::{ApiConfig, ApiEnvelope, ErrorPayload, PortalError, Result, Upload};
use tracing::{debug, instrument, warn};
use url::Url;

use super::client::HttpClient;

/// Request payload
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`
    Json(Value),
    /// Single-file `multipart/form-data` body under `field`
    Multipart { field: &'static str, file: Upload },
}

/// Per-request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    /// Fire the unauthorized registry when the backend answers 401
    pub notify_unauthorized: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, body: None, notify_unauthorized: true }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self { method: Method::POST, body: Some(RequestBody::Json(body)), ..Self::default() }
    }

    /// `POST` without a body.
    pub fn post_empty() -> Self {
        Self { method: Method::POST, ..Self::default() }
    }

    pub fn put(body: Value) -> Self {
        Self { method: Method::PUT, body: Some(RequestBody::Json(body)), ..Self::default() }
    }

    pub fn delete() -> Self {
        Self { method: Method::DELETE, ..Self::default() }
    }

    /// `DELETE` carrying a JSON body.
    pub fn delete_with(body: Value) -> Self {
        Self { method: Method::DELETE, body: Some(RequestBody::Json(body)), ..Self::default() }
    }

    /// `POST` of a single file.
    pub fn multipart(field: &'static str, file: Upload) -> Self {
        Self {
            method: Method::POST,
            body: Some(RequestBody::Multipart { field, file }),
            ..Self::default()
        }
    }

    /// Leave the session alone on a 401 (credential entry endpoints).
    #[must_use]
    pub const fn without_unauthorized_notice(mut self) -> Self {
        self.notify_unauthorized = false;
        self
    }
}

/// Envelope plus the HTTP details the auth gateway needs
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// `None` when no response was received
    pub status: Option<StatusCode>,
    /// Leading integer of the `Retry-After` header
    pub retry_after_secs: Option<u64>,
    pub envelope: ApiEnvelope<Value>,
}

impl RawResponse {
    fn failed(message: impl Into<String>) -> Self {
        Self { status: None, retry_after_secs: None, envelope: ApiEnvelope::failure(message) }
    }
}

/// Transport for the `/api/v1` backend
#[derive(Clone)]
pub struct ApiTransport {
    http: HttpClient,
    base_url: String,
    registry: UnauthorizedRegistry,
}

impl ApiTransport {
    /// Build a transport over `base_url`. A trailing `/` is trimmed.
    pub fn new(http: HttpClient, base_url: impl Into<String>, registry: UnauthorizedRegistry) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, registry }
    }

    /// Build the HTTP client and transport from configuration.
    ///
    /// # Errors
    /// Returns [`PortalError::Config`] if the resolved base URL is not an
    /// absolute URL or the client cannot be built.
    pub fn from_config(config: &ApiConfig, registry: UnauthorizedRegistry) -> Result<Self> {
        let base_url = config.resolved_base_url();
        Url::parse(&base_url)
            .map_err(|e| PortalError::Config(format!("Invalid API base URL '{base_url}': {e}")))?;

        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self::new(builder.build()?, base_url, registry))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The registry fired on 401 responses.
    pub const fn registry(&self) -> &UnauthorizedRegistry {
        &self.registry
    }

    /// Full URL for `endpoint`, adding a leading `/` when missing.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    /// Send a request and normalize the outcome into an envelope.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ApiEnvelope<Value> {
        self.request_raw(endpoint, options).await.envelope
    }

    /// Like [`request`](Self::request) but keeps the status and
    /// `Retry-After` header.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request_raw(&self, endpoint: &str, options: RequestOptions) -> RawResponse {
        let RequestOptions { method, body, notify_unauthorized } = options;
        let mut builder = self.http.request(method, self.url(endpoint));

        match body {
            Some(RequestBody::Json(value)) => builder = builder.json(&value),
            Some(RequestBody::Multipart { field, file }) => {
                let Upload { file_name, content_type, bytes } = file;
                let part = match Part::bytes(bytes).file_name(file_name).mime_str(&content_type) {
                    Ok(part) => part,
                    Err(err) => return RawResponse::failed(err.to_string()),
                };
                builder = builder.multipart(Form::new().part(field, part));
            }
            None => builder = builder.header(CONTENT_TYPE, "application/json"),
        }

        let response = match self.http.send(builder).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "request did not complete");
                return RawResponse::failed(network_message(&err));
            }
        };

        let raw = normalize(response).await;

        if let Some(payload) = raw.envelope.error() {
            warn!(status = ?raw.status, error = %payload.message(), "request failed");
        }

        if raw.status == Some(StatusCode::UNAUTHORIZED) && notify_unauthorized {
            self.registry.fire().await;
        }

        raw
    }
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("base_url", &self.base_url)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

fn network_message(err: &PortalError) -> String {
    match err {
        PortalError::Transport(message) if !message.trim().is_empty() => message.clone(),
        PortalError::Transport(_) => NETWORK_FAILURE_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

async fn normalize(response: Response) -> RawResponse {
    let status = response.status();
    let retry_after_secs =
        response.headers().get(RETRY_AFTER).and_then(|v| v.to_str().ok()).and_then(leading_int);
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    let envelope = match response.text().await {
        Err(err) => ApiEnvelope::failure(err.to_string()),
        Ok(text) if !is_json => ApiEnvelope::failure(non_json_message(status, &text)),
        Ok(text) => envelope_from_json(status, &text),
    };
    debug!(%status, success = envelope.is_success(), "response normalized");

    RawResponse { status: Some(status), retry_after_secs, envelope }
}

fn envelope_from_json(status: StatusCode, text: &str) -> ApiEnvelope<Value> {
    let json = match serde_json::from_str::<Value>(text) {
        Ok(Value::Null) | Err(_) => return ApiEnvelope::failure(INVALID_JSON_MESSAGE),
        Ok(json) => json,
    };

    if !status.is_success() {
        let error = json.get("data").and_then(|data| data.get("error")).filter(|e| !e.is_null());
        return match error {
            Some(error) => ApiEnvelope::Failure(ErrorPayload::from_value(error.clone())),
            None => ApiEnvelope::failure(format!("Request failed with status {}", status.as_u16())),
        };
    }

    serde_json::from_value(json).unwrap_or_else(|_| ApiEnvelope::failure(INVALID_JSON_MESSAGE))
}

fn non_json_message(status: StatusCode, text: &str) -> String {
    if status.is_success() {
        return NON_JSON_MESSAGE.to_string();
    }
    let snippet: String = text.chars().take(RAW_SNIPPET_CHARS).collect();
    let ellipsis = if text.chars().count() > RAW_SNIPPET_CHARS { "…" } else { "" };
    format!("Request failed ({}). {snippet}{ellipsis}", status.as_u16())
}

fn leading_int(value: &str) -> Option<u64> {
    let trimmed = value.trim_start();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

//! REST transport for the ride-sharing API.
//!
//! Services build an [`ApiRequest`] and hand it to a [`Transport`]. The real
//! transport is [`HttpTransport`] over `reqwest`; tests substitute an
//! in-memory implementation.
//!
//! ERROR HANDLING
//! ==============
//! The transport only fails on network problems. Status classification
//! happens in [`ApiResponse::into_result`] so every caller sees the same
//! 4xx/5xx split.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;

pub const SIGN_UP_ENDPOINT: &str = "/api/sign_up/";
pub const LOG_IN_ENDPOINT: &str = "/api/log_in/";
pub const LOG_OUT_ENDPOINT: &str = "/api/log_out/";
pub const TRIPS_ENDPOINT: &str = "/api/trips/";

/// Detail path for one trip. The id must be a single plain path segment.
pub(crate) fn trip_endpoint(trip_id: &str) -> Result<String, ApiError> {
    let plain = !trip_id.is_empty()
        && trip_id != "."
        && trip_id != ".."
        && !trip_id.chars().any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control());
    if !plain {
        return Err(ApiError::InvalidTripId(trip_id.to_owned()));
    }
    Ok(format!("{TRIPS_ENDPOINT}{trip_id}/"))
}

pub(crate) fn authorization_value(token: &str) -> String {
    format!("Token {token}")
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// One part of a multipart form body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormField {
    #[must_use]
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self::Text { name: name.to_owned(), value: value.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

/// A transport-neutral API request. `path` is relative to the base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Session token, sent as `Authorization: Token <token>`.
    pub token: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), token: None, body: RequestBody::Empty }
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::POST, path: path.into(), token: None, body: RequestBody::Empty }
    }

    #[must_use]
    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::POST, path: path.into(), token: None, body: RequestBody::Json(body) }
    }

    #[must_use]
    pub fn patch_json(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::PATCH, path: path.into(), token: None, body: RequestBody::Json(body) }
    }

    #[must_use]
    pub fn post_multipart(path: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self { method: Method::POST, path: path.into(), token: None, body: RequestBody::Multipart(fields) }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// Status plus parsed body. Non-JSON bodies are kept as a JSON string.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Turn non-2xx responses into [`ApiError::Client`]/[`ApiError::Server`].
    ///
    /// # Errors
    ///
    /// Returns the classified error for any non-success status.
    pub fn into_result(self) -> Result<Value, ApiError> {
        if self.is_success() {
            return Ok(self.body);
        }
        Err(ApiError::from_status(self.status, error_message(&self.body)))
    }

    /// Check the status, then deserialize the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the status error, or [`ApiError::Decode`] on a schema mismatch.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let body = self.into_result()?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Human-readable message for an error body.
///
/// Prefers `detail`, then per-field validation lists (`{"username": ["taken"]}`).
pub(crate) fn error_message(body: &Value) -> String {
    match body {
        Value::Null => "empty response".to_owned(),
        Value::String(text) => text.clone(),
        Value::Object(map) => {
            if let Some(detail) = map.get("detail").and_then(Value::as_str) {
                return detail.to_owned();
            }
            let mut fields: Vec<String> = map
                .iter()
                .filter_map(|(field, value)| {
                    let messages: Vec<&str> = match value {
                        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                        Value::String(text) => vec![text.as_str()],
                        _ => Vec::new(),
                    };
                    (!messages.is_empty()).then(|| format!("{field}: {}", messages.join(" ")))
                })
                .collect();
            if fields.is_empty() {
                return body.to_string();
            }
            fields.sort();
            fields.join("; ")
        }
        other => other.to_string(),
    }
}

pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends API requests. Implemented by [`HttpTransport`] and by test doubles.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport rooted at the configured base URL.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from client config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "api request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, authorization_value(token));
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.json(&json),
            RequestBody::Multipart(fields) => builder.multipart(multipart_form(fields)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, %url, error = %e, "api request failed");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::debug!(method = %request.method, %url, status, "api response");
        Ok(ApiResponse::new(status, parse_body(&text)))
    }
}

fn multipart_form(fields: Vec<FormField>) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, file_name, content_type, bytes } => {
                let part = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

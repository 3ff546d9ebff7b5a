//! Backend API Client
//!
//! Thin reqwest wrappers over the LitDocket REST API, organized by domain.

mod cases;
mod deadlines;
mod dashboard;
mod notifications;
mod chat;
mod health;

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::app_config;
use crate::storage::token_store;

pub use cases::*;
pub use deadlines::*;
pub use dashboard::*;
pub use notifications::*;
pub use chat::*;
pub use health::*;

// ========================
// Errors
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response
    Network(String),
    Status { status: u16, message: String },
    Decode(String),
    Config(String),
    Unauthorized,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status { status, message } => write!(f, "Request failed ({}): {}", status, message),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::Unauthorized => write!(f, "Session expired, please sign in again"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status { status: status.as_u16(), message: e.to_string() }
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ========================
// Client
// ========================

/// Path segments are always percent-encoded
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

pub(crate) fn seg(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Some endpoints wrap payloads in `{"data": ...}`, some do not.
/// Only an object whose sole key is `data` counts as wrapped; records that merely
/// carry a `data` field decode as they are.
fn decode_payload<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    match value {
        serde_json::Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            serde_json::from_value(map.remove("data").unwrap_or_default())
        }
        other => serde_json::from_value(other),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message", alias = "error")]
    detail: serde_json::Value,
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail: serde_json::Value::String(s) }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if !body.trim().is_empty() => body.trim().chars().take(200).collect(),
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self { http: reqwest::Client::new() }
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = app_config().api.endpoint(path);
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::Config(format!("API base URL must be http(s): {}", url)));
        }
        let builder = self.http.request(method, url);
        Ok(match token_store().token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("request rejected with 401, dropping stored token");
            token_store().clear();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), message: error_message(status, &body) });
        }
        let text = response.text().await?;
        // 204 and empty bodies decode as JSON null
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        decode_payload(text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)?).await
    }

    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)?.query(query)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.request(Method::PATCH, path)?.json(body)).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared client for components
pub fn client() -> ApiClient {
    thread_local! {
        static CLIENT: ApiClient = ApiClient::new();
    }
    CLIENT.with(ApiClient::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accepts_both_shapes() {
        let wrapped: Vec<u32> = decode_payload(r#"{"data": [1, 2]}"#).unwrap();
        let bare: Vec<u32> = decode_payload("[3]").unwrap();
        assert_eq!(wrapped, vec![1, 2]);
        assert_eq!(bare, vec![3]);
        let empty: Option<u32> = decode_payload("null").unwrap();
        assert!(empty.is_none());
    }

    #[test]
    fn test_record_with_data_field_is_not_unwrapped() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Attachment {
            name: String,
            data: serde_json::Value,
        }

        let record: Attachment = decode_payload(r#"{"name": "exhibit-a", "data": {"pages": 3}}"#).unwrap();
        assert_eq!(record.name, "exhibit-a");
        assert_eq!(record.data["pages"], 3);

        let wrapped: Attachment = decode_payload(r#"{"data": {"name": "exhibit-b", "data": null}}"#).unwrap();
        assert_eq!(wrapped.name, "exhibit-b");
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"detail": "Deadline already completed"}"#);
        assert_eq!(msg, "Deadline already completed");
        let msg = error_message(StatusCode::BAD_GATEWAY, "");
        assert_eq!(msg, "Bad Gateway");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(seg("abc-123"), "abc-123");
        assert_eq!(seg("a/b c"), "a%2Fb%20c");
    }
}

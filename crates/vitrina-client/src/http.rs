//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (non-success → [`ClientError::Http`] or
//! [`ClientError::Rejected`] with the server's detail) and body decoding so
//! the client methods stay focused on request construction.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Longest raw body echoed back in an error message.
const MAX_RAW_DETAIL: usize = 200;

/// What kind of request produced a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Search,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Create and update carry a body the server may reject.
    #[must_use]
    pub const fn sends_body(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. `400`, `409` and `422` on a
/// request with a body become [`ClientError::Rejected`]; every other
/// non-success status becomes [`ClientError::Http`].
pub async fn check_response(
    resp: reqwest::Response,
    operation: Operation,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = extract_detail(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
    tracing::debug!(status = status.as_u16(), %message, "request failed");

    if operation.sends_body() && matches!(status.as_u16(), 400 | 409 | 422) {
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            detail: message,
        });
    }
    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, FastAPI validation lists
/// (`{"detail": [{"loc": [..., "field"], "msg": "..."}]}`), and
/// `{"message"|"error": "..."}`. Any other non-empty body is returned raw,
/// truncated.
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.chars().take(MAX_RAW_DETAIL).collect());
    };

    if let Some(detail) = value.get("detail") {
        return Some(match detail {
            Value::String(text) => text.clone(),
            Value::Array(items) => items
                .iter()
                .map(validation_item)
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        });
    }

    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| Some(body.chars().take(MAX_RAW_DETAIL).collect()))
}

fn validation_item(item: &Value) -> String {
    let msg = item
        .get("msg")
        .and_then(Value::as_str)
        .map_or_else(|| item.to_string(), str::to_string);
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .map(|last| match last {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        });
    match field {
        Some(field) => format!("{field}: {msg}"),
        None => msg,
    }
}

/// Read the body as text; `None` when it is empty.
pub async fn read_body(resp: reqwest::Response) -> Result<Option<String>, ClientError> {
    let text = resp.text().await?;
    Ok((!text.trim().is_empty()).then_some(text))
}

/// Decode a JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|error| ClientError::Parse(format!("{what}: {error}")))
}

//! Shared HTTP response helpers.
//!
//! Non-success statuses become [`ClientError::Service`] carrying whatever
//! message the service put in its JSON body, so the clients only deal with
//! request construction and the happy-path body.

use crate::error::ClientError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise the body is read
/// once and its `error` field (falling back to `detail`) becomes the
/// message. A body that is not JSON, or has neither field, yields `None`.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Service {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull the human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail"]
        .iter()
        .find_map(|field| value.get(field).and_then(serde_json::Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

//! Request body decoding.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// JSON body extractor that does not insist on `Content-Type:
/// application/json`; the bundled frontend posts bodies as text/plain.
/// Any read or parse failure becomes [`ApiError::MalformedJson`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::MalformedJson)?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| {
                tracing::debug!("rejecting request body: {e}");
                ApiError::MalformedJson
            })
    }
}

/// Read an integer field that may arrive as a JSON number or a digit string.
///
/// `null` and absent fields are `Ok(None)`; anything else that is not an
/// integer is a validation error naming the field.
pub fn int_field(name: &str, value: Option<&Value>) -> Result<Option<i64>, ApiError> {
    let invalid = || ApiError::Validation(format!("{name} must be an integer"));
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            let digits = s.strip_prefix('-').unwrap_or(s);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse().map(Some).map_err(|_| invalid())
        }
        Some(_) => Err(invalid()),
    }
}

/// Strict identifier read: a JSON integer or a string of ASCII digits only.
/// Signs, whitespace and anything else yield `None`.
pub fn digits_field(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    }
}

/// Read a free-text field; blank strings count as absent.
pub fn text_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

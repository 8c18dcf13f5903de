//! HTTP-specific error types for the Weebly Cloud SDK.
//!
//! This module contains error types for HTTP operations: server rejections,
//! request validation failures and network failures.
//!
//! # Error Handling
//!
//! - [`ApiError`]: The server rejected the request (non-204 status with an
//!   empty body or an `error` object)
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! `HttpError::Api` and `HttpError::Network` are deliberately separate so
//! callers can tell "the server said no" apart from "the server could not be
//! reached".
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.status, e.message),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(HttpError::Json(e)) => println!("Bad JSON: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Message used when a rejected response carries no usable error message.
pub const NO_RESPONSE_MESSAGE: &str = "No response";

/// Error returned when the API rejects a request.
///
/// Raised for any response whose status is not 204 and whose body is either
/// empty or carries a non-null top-level `error` field.
///
/// # Example
///
/// ```rust
/// use weebly_cloud::clients::ApiError;
///
/// let body = r#"{"error":{"message":"Not found","code":404}}"#;
/// let error = ApiError::from_body(404, body).unwrap();
///
/// assert_eq!(error.message, "Not found");
/// assert_eq!(error.code, Some(404));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The server-provided message, or `"No response"`.
    pub message: String,
    /// The server-provided error code, if any.
    pub code: Option<i64>,
}

impl ApiError {
    /// Applies the rejection rule to a response.
    ///
    /// Returns `None` when the response counts as a success: a 204 status,
    /// or a non-empty body without an `error` field. A non-empty body that
    /// is not valid JSON counts as a success too.
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Option<Self> {
        if status == 204 {
            return None;
        }

        if body.trim().is_empty() {
            return Some(Self::no_response(status));
        }

        let parsed: Value = serde_json::from_str(body).ok()?;
        let error = parsed.get("error").filter(|e| !e.is_null())?;

        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| NO_RESPONSE_MESSAGE.to_string(), String::from);
        let code = error.get("code").and_then(parse_code);

        Some(Self {
            status,
            message,
            code,
        })
    }

    /// Builds the error reported for an empty body.
    #[must_use]
    pub fn no_response(status: u16) -> Self {
        Self {
            status,
            message: NO_RESPONSE_MESSAGE.to_string(),
            code: None,
        }
    }
}

fn parse_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Error returned when an HTTP request fails validation.
///
/// Raised before a request is sent.
///
/// # Example
///
/// ```rust
/// use weebly_cloud::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::EmptyPath;
/// assert_eq!(error.to_string(), "Request path cannot be empty.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path was empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// The path carried its own query string.
    #[error("Request path '{path}' must not contain a query string; pass query parameters instead.")]
    QueryInPath {
        /// The offending path.
        path: String,
    },

    /// A body was supplied for a method that never sends one.
    #[error("Cannot send a body with {method}; use query parameters instead.")]
    UnexpectedBody {
        /// The HTTP method.
        method: String,
    },

    /// Query parameters were supplied for a body-carrying method.
    #[error("Cannot send query parameters with {method}; use body parameters instead.")]
    UnexpectedQuery {
        /// The HTTP method.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns the API rejection, if this error is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_204_is_never_an_error() {
        assert!(ApiError::from_body(204, "").is_none());
        assert!(ApiError::from_body(204, "not json").is_none());
        assert!(ApiError::from_body(204, r#"{"error":{"message":"x"}}"#).is_none());
    }

    #[test]
    fn test_empty_body_defaults_to_no_response() {
        let error = ApiError::from_body(500, "").unwrap();
        assert_eq!(error.status, 500);
        assert_eq!(error.message, "No response");
        assert_eq!(error.code, None);

        let error = ApiError::from_body(200, "  \n").unwrap();
        assert_eq!(error.message, "No response");
    }

    #[test]
    fn test_error_object_is_decoded() {
        let error =
            ApiError::from_body(404, r#"{"error":{"message":"Not found","code":404}}"#).unwrap();
        assert_eq!(error.status, 404);
        assert_eq!(error.message, "Not found");
        assert_eq!(error.code, Some(404));
        assert_eq!(error.to_string(), "Not found");
    }

    #[test]
    fn test_string_error_code_is_parsed() {
        let error =
            ApiError::from_body(400, r#"{"error":{"message":"Bad","code":"20"}}"#).unwrap();
        assert_eq!(error.code, Some(20));
    }

    #[test]
    fn test_error_without_message_uses_default() {
        let error = ApiError::from_body(400, r#"{"error":{"code":7}}"#).unwrap();
        assert_eq!(error.message, "No response");
        assert_eq!(error.code, Some(7));
    }

    #[test]
    fn test_null_error_is_success() {
        assert!(ApiError::from_body(200, r#"{"error":null,"ok":true}"#).is_none());
    }

    #[test]
    fn test_body_without_error_is_success_even_on_error_status() {
        assert!(ApiError::from_body(200, r#"{"user":{"user_id":"1"}}"#).is_none());
        assert!(ApiError::from_body(500, r#"{"something":"else"}"#).is_none());
        assert!(ApiError::from_body(502, "<html>bad gateway</html>").is_none());
    }

    #[test]
    fn test_http_error_api_error_accessor() {
        let error: HttpError = ApiError::no_response(500).into();
        assert_eq!(error.api_error().map(|e| e.status), Some(500));

        let error: HttpError = InvalidHttpRequestError::EmptyPath.into();
        assert!(error.api_error().is_none());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let api: &dyn std::error::Error = &ApiError::no_response(404);
        let _ = api;

        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
        let _ = invalid;
    }
}

//! Resource-specific error types for REST API operations.
//!
//! This module contains the error type returned by resources and lazy lists.
//! It wraps the transport errors and adds hydration failures: a response
//! that decoded fine but did not have the shape a resource expects.
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::rest::ResourceError;
//!
//! match user.login_link().await {
//!     Ok(link) => println!("{link}"),
//!     Err(e) if e.api_error().is_some() => {
//!         let api = e.api_error().unwrap();
//!         println!("rejected ({:?}): {}", api.code, api.message);
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::{ApiError, HttpError, RestError};
use thiserror::Error;

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use weebly_cloud::rest::ResourceError;
///
/// let error = ResourceError::MissingField {
///     resource: "Site",
///     field: "site_id".to_string(),
/// };
/// assert_eq!(error.to_string(), "Site response is missing field 'site_id'");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// A response body was not valid JSON.
    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field or id was absent.
    #[error("{resource} response is missing field '{field}'")]
    MissingField {
        /// The type name of the resource (e.g., "Site").
        resource: &'static str,
        /// The missing field or id name.
        field: String,
    },

    /// A response body did not have the expected shape.
    #[error("{resource} response has an unexpected shape: expected {expected}")]
    UnexpectedBody {
        /// The type name of the resource.
        resource: &'static str,
        /// A short description of the expected shape.
        expected: &'static str,
    },
}

impl ResourceError {
    /// Returns the API rejection, if this error is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Http(e) => e.api_error(),
            Self::Rest(e) => e.api_error(),
            _ => None,
        }
    }

    pub(crate) fn missing(resource: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField {
            resource,
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error() -> ApiError {
        ApiError {
            status: 404,
            message: "Not found".to_string(),
            code: Some(404),
        }
    }

    #[test]
    fn test_api_error_reachable_through_every_layer() {
        let from_http = ResourceError::Http(HttpError::Api(api_error()));
        assert_eq!(from_http.api_error(), Some(&api_error()));

        let from_rest = ResourceError::Rest(RestError::Http(HttpError::Api(api_error())));
        assert_eq!(from_rest.api_error(), Some(&api_error()));
        assert_eq!(from_rest.to_string(), "Not found");
    }

    #[test]
    fn test_hydration_errors_have_no_api_error() {
        let missing = ResourceError::missing("Blog", "blog_id");
        assert!(missing.api_error().is_none());
        assert_eq!(missing.to_string(), "Blog response is missing field 'blog_id'");

        let shape = ResourceError::UnexpectedBody {
            resource: "Plan",
            expected: "an object named 'plans'",
        };
        assert!(shape.to_string().contains("unexpected shape"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: ResourceError = json_error.into();
        assert!(matches!(error, ResourceError::Json(_)));
    }
}

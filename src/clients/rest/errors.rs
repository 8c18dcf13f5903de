//! REST-specific error types for the Weebly Cloud SDK.
//!
//! - [`RestError::InvalidPath`]: When a path fails validation
//! - [`RestError::Http`]: Wraps underlying HTTP errors
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::clients::rest::RestError;
//!
//! match client.get("account", None).await {
//!     Ok(response) => println!("Account: {}", response.body),
//!     Err(RestError::InvalidPath { path }) => println!("Invalid path: {path}"),
//!     Err(RestError::Http(e)) => println!("HTTP error: {e}"),
//! }
//! ```

use crate::clients::{ApiError, HttpError};
use thiserror::Error;

/// Error type for REST API operations.
///
/// # Example
///
/// ```rust
/// use weebly_cloud::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The REST API path is invalid.
    ///
    /// This error is returned when a path is empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl RestError {
    /// Returns the API rejection, if this error is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Http(e) => e.api_error(),
            Self::InvalidPath { .. } => None,
        }
    }
}

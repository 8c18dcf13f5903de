//! Error types for the Weebly Cloud SDK.
//!
//! This module contains the configuration errors raised while assembling
//! credentials and client settings.
//!
//! # Error Handling
//!
//! Every configuration constructor returns `Result<T, ConfigError>`. Because a
//! [`CloudConfig`](crate::CloudConfig) cannot be built without both keys, a
//! missing credential is always reported here, synchronously, before any
//! request can be attempted.
//!
//! # Example
//!
//! ```rust
//! use weebly_cloud::{ConfigError, PublicKey};
//!
//! let result = PublicKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyPublicKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Public key cannot be empty.
    #[error("Public key cannot be empty. Please provide a valid Weebly Cloud API key.")]
    EmptyPublicKey,

    /// Secret key cannot be empty.
    #[error("Secret key cannot be empty. Please provide a valid Weebly Cloud API secret.")]
    EmptySecretKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Environment variable '{name}' is not set.")]
    MissingEnvVar {
        /// The name of the missing variable.
        name: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with an http or https scheme (e.g., 'https://api.weeblycloud.com/').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

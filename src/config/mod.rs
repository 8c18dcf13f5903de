//! Configuration types for the Weebly Cloud SDK.
//!
//! This module provides the configuration used to build a client: the API
//! credentials plus a handful of transport settings.
//!
//! # Overview
//!
//! - [`CloudConfig`]: The immutable configuration shared by every request
//! - [`CloudConfigBuilder`]: A builder for constructing [`CloudConfig`] instances
//! - [`PublicKey`]: A validated public key newtype
//! - [`SecretKey`]: A validated secret key newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//!
//! There is no global client. A configuration is built once, handed to a
//! [`RestClient`](crate::RestClient), and every resource reaches the API
//! through that client. Several independent configurations can live in the
//! same process.
//!
//! # Example
//!
//! ```rust
//! use weebly_cloud::{CloudConfig, PublicKey, SecretKey};
//!
//! let config = CloudConfig::builder()
//!     .public_key(PublicKey::new("my-public-key").unwrap())
//!     .secret_key(SecretKey::new("my-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.weeblycloud.com/");
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, PublicKey, SecretKey};

use std::env;

use crate::auth::SignatureEncoding;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client type reported in the `X-W-Client-Type` header by default.
pub const DEFAULT_CLIENT_TYPE: &str = "rust";

/// Environment variable holding the public key.
pub const PUBLIC_KEY_ENV: &str = "WEEBLY_CLOUD_PUBLIC_KEY";
/// Environment variable holding the secret key.
pub const SECRET_KEY_ENV: &str = "WEEBLY_CLOUD_SECRET_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "WEEBLY_CLOUD_BASE_URL";

/// Configuration for the Weebly Cloud SDK.
///
/// Holds the credentials used to sign requests and the transport settings.
/// The configuration is immutable once built.
///
/// # Thread Safety
///
/// `CloudConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct CloudConfig {
    public_key: PublicKey,
    secret_key: SecretKey,
    base_url: BaseUrl,
    client_type: String,
    client_version: String,
    user_agent_prefix: Option<String>,
    signature_encoding: SignatureEncoding,
}

impl CloudConfig {
    /// Creates a new builder for constructing a `CloudConfig`.
    #[must_use]
    pub fn builder() -> CloudConfigBuilder {
        CloudConfigBuilder::new()
    }

    /// Builds a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `WEEBLY_CLOUD_PUBLIC_KEY` - The public key (required)
    /// * `WEEBLY_CLOUD_SECRET_KEY` - The secret key (required)
    /// * `WEEBLY_CLOUD_BASE_URL` - Base URL override (optional)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a required variable is unset,
    /// or the validation error of the offending value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let public_key = env::var(PUBLIC_KEY_ENV).map_err(|_| ConfigError::MissingEnvVar {
            name: PUBLIC_KEY_ENV,
        })?;
        let secret_key = env::var(SECRET_KEY_ENV).map_err(|_| ConfigError::MissingEnvVar {
            name: SECRET_KEY_ENV,
        })?;

        let mut builder = Self::builder()
            .public_key(PublicKey::new(public_key)?)
            .secret_key(SecretKey::new(secret_key)?);

        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            builder = builder.base_url(BaseUrl::new(base_url)?);
        }

        builder.build()
    }

    /// Returns the public key.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the value sent in the `X-W-Client-Type` header.
    #[must_use]
    pub fn client_type(&self) -> &str {
        &self.client_type
    }

    /// Returns the value sent in the `X-W-Client-Version` header.
    #[must_use]
    pub fn client_version(&self) -> &str {
        &self.client_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how request signatures are encoded.
    #[must_use]
    pub const fn signature_encoding(&self) -> SignatureEncoding {
        self.signature_encoding
    }
}

// Verify CloudConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CloudConfig>();
};

/// Builder for constructing [`CloudConfig`] instances.
///
/// Required fields are `public_key` and `secret_key`.
///
/// # Defaults
///
/// - `base_url`: `https://api.weeblycloud.com/`
/// - `client_type`: `"rust"`
/// - `client_version`: the crate version
/// - `user_agent_prefix`: `None`
/// - `signature_encoding`: [`SignatureEncoding::RawDigest`]
///
/// # Example
///
/// ```rust
/// use weebly_cloud::{BaseUrl, CloudConfig, PublicKey, SecretKey, SignatureEncoding};
///
/// let config = CloudConfig::builder()
///     .public_key(PublicKey::new("key").unwrap())
///     .secret_key(SecretKey::new("secret").unwrap())
///     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .signature_encoding(SignatureEncoding::HexDigest)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct CloudConfigBuilder {
    public_key: Option<PublicKey>,
    secret_key: Option<SecretKey>,
    base_url: Option<BaseUrl>,
    client_type: Option<String>,
    client_version: Option<String>,
    user_agent_prefix: Option<String>,
    signature_encoding: Option<SignatureEncoding>,
}

impl CloudConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the public key (required).
    #[must_use]
    pub fn public_key(mut self, key: PublicKey) -> Self {
        self.public_key = Some(key);
        self
    }

    /// Sets the secret key (required).
    #[must_use]
    pub fn secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the client type reported to the API.
    #[must_use]
    pub fn client_type(mut self, client_type: impl Into<String>) -> Self {
        self.client_type = Some(client_type.into());
        self
    }

    /// Overrides the client version reported to the API.
    #[must_use]
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = Some(version.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how request signatures are encoded.
    #[must_use]
    pub const fn signature_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.signature_encoding = Some(encoding);
        self
    }

    /// Builds the [`CloudConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `public_key` or
    /// `secret_key` are not set.
    pub fn build(self) -> Result<CloudConfig, ConfigError> {
        let public_key = self
            .public_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "public_key",
            })?;
        let secret_key = self
            .secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "secret_key",
            })?;

        Ok(CloudConfig {
            public_key,
            secret_key,
            base_url: self.base_url.unwrap_or_default(),
            client_type: self
                .client_type
                .unwrap_or_else(|| DEFAULT_CLIENT_TYPE.to_string()),
            client_version: self
                .client_version
                .unwrap_or_else(|| SDK_VERSION.to_string()),
            user_agent_prefix: self.user_agent_prefix,
            signature_encoding: self.signature_encoding.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> CloudConfigBuilder {
        CloudConfig::builder()
            .public_key(PublicKey::new("key").unwrap())
            .secret_key(SecretKey::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_public_key() {
        let result = CloudConfigBuilder::new()
            .secret_key(SecretKey::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "public_key"
            })
        ));
    }

    #[test]
    fn test_builder_requires_secret_key() {
        let result = CloudConfigBuilder::new()
            .public_key(PublicKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "secret_key"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = keys().build().unwrap();

        assert_eq!(config.base_url(), &BaseUrl::default());
        assert_eq!(config.client_type(), "rust");
        assert_eq!(config.client_version(), SDK_VERSION);
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.signature_encoding(), SignatureEncoding::RawDigest);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = keys()
            .base_url(BaseUrl::new("http://localhost:1234").unwrap())
            .client_type("php")
            .client_version("1.0.0")
            .user_agent_prefix("MyApp/2.0")
            .signature_encoding(SignatureEncoding::HexDigest)
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:1234/");
        assert_eq!(config.client_type(), "php");
        assert_eq!(config.client_version(), "1.0.0");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/2.0"));
        assert_eq!(config.signature_encoding(), SignatureEncoding::HexDigest);
    }

    #[test]
    fn test_config_debug_masks_secret() {
        let config = keys().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("CloudConfig"));
        assert!(debug_str.contains("SecretKey(*****)"));
        assert!(!debug_str.contains("\"secret\""));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CloudConfig>();
    }
}

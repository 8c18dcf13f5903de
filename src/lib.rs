//! # Weebly Cloud Rust SDK
//!
//! A Rust SDK for the Weebly Cloud API: signed HTTP transport, paginated
//! listings, and a typed resource tree for accounts, users, sites and
//! everything that hangs off a site.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`CloudConfig`] and [`CloudConfigBuilder`]
//! - Validated newtypes for the API credentials and base URL
//! - HMAC-SHA256 request signing via [`RequestSigner`]
//! - An async HTTP client that normalizes responses and API rejections
//! - [`PagedResponse`], which knows how to fetch its neighbouring pages
//! - [`CloudList`], a cursor that walks a whole listing one page at a time
//! - Resources with lazy properties, buffered edits and deletion
//!
//! ## Quick Start
//!
//! ```rust
//! use weebly_cloud::{CloudConfig, PublicKey, SecretKey};
//!
//! let config = CloudConfig::builder()
//!     .public_key(PublicKey::new("your-public-key").unwrap())
//!     .secret_key(SecretKey::new("your-secret-key").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use weebly_cloud::{CloudConfig, RestClient};
//! use weebly_cloud::rest::resources::{Account, User};
//! use weebly_cloud::rest::{CloudResource, Mutable};
//!
//! let client = RestClient::new(&CloudConfig::from_env()?)?;
//!
//! let account = Account::new(&client);
//! let user = account.create_user("owner@example.com", None).await?;
//! let mut site = user.create_site("example.com", None).await?;
//!
//! site.set_property("site_title", "My Site").await?;
//! site.save().await?;
//!
//! println!("{}", site.login_link().await?);
//! ```
//!
//! ## Raw Requests
//!
//! Endpoints without a resource type can be called through the verb facade:
//!
//! ```rust,ignore
//! let response = client.get("account", None).await?;
//! let account: serde_json::Value = response.json()?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the client is built from a configuration and
//!   passed explicitly to every resource
//! - **Fail-fast validation**: credentials and URLs validate on construction
//! - **Thread-safe**: configuration and clients are `Send + Sync`
//! - **Explicit I/O**: every network round trip happens behind an `.await`

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{RequestSigner, SignatureEncoding};
pub use config::{BaseUrl, CloudConfig, CloudConfigBuilder, PublicKey, SecretKey};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, PageInfo, PagedResponse, Params, RestClient, RestError,
};

// Re-export resource infrastructure
pub use rest::{CloudList, CloudResource, Deletable, IdContext, Mutable, ResourceError};

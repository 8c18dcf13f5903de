//! HTTP client types for Weebly Cloud API communication.
//!
//! This module provides the transport layer for making signed requests to
//! the Weebly Cloud API.
//!
//! # Overview
//!
//! - [`HttpClient`]: Signs and sends one request per call
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A normalized response with parsed [`PageInfo`]
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`PagedResponse`]: A response that can fetch its neighbouring pages
//! - [`rest::RestClient`]: The verb-level facade used by all resources
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::{CloudConfig, RestClient};
//!
//! let client = RestClient::new(&CloudConfig::from_env()?)?;
//! let sites = client.get_list("user/42/site", None, Some(20)).await?;
//!
//! if let Some(page_two) = sites.next_page().await? {
//!     println!("{}", page_two.body);
//! }
//! ```
//!
//! # Rejections
//!
//! A response is an [`ApiError`] when its status is not 204 and its body is
//! empty or carries an `error` object. A 204 is always a success. Requests
//! are never retried.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod paged_response;
pub mod rest;

pub use errors::{ApiError, HttpError, InvalidHttpRequestError, NO_RESPONSE_MESSAGE};
pub use http_client::{
    HttpClient, CLIENT_TYPE_HEADER, CLIENT_VERSION_HEADER, PUBLIC_KEY_HEADER, SIGNATURE_HEADER,
};
pub use http_request::{build_query, HttpMethod, HttpRequest, HttpRequestBuilder, Params};
pub use http_response::{parse_header_value, HttpResponse, PageInfo};
pub use paged_response::{PagedResponse, PAGE_PARAM};

// Re-export REST client types at the clients module level
pub use rest::{RestClient, RestError};

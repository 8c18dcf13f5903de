//! REST API client for the Weebly Cloud API.
//!
//! This module provides the verb-level facade built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! # Overview
//!
//! - [`RestClient`]: `get()`, `post()`, `put()`, `patch()`, `delete()` and `get_list()`
//! - [`RestError`]: Error type for REST API operations
//!
//! # Path Normalization
//!
//! Leading slashes are stripped (`/user/1` becomes `user/1`); a path that is
//! empty after stripping is rejected with [`RestError::InvalidPath`].
//!
//! # Parameters
//!
//! GET and DELETE send their parameters in the query string. POST, PUT and
//! PATCH send them as a JSON body.

mod client;
mod errors;

pub use client::{RestClient, LIMIT_PARAM};
pub use errors::RestError;

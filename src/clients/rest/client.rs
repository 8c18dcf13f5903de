//! REST client implementation for the Weebly Cloud API.
//!
//! This module provides the [`RestClient`] type, the verb-level facade every
//! resource uses to talk to the API.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, PagedResponse, Params};
use crate::config::CloudConfig;

/// Query parameter carrying the page size of a listing.
pub const LIMIT_PARAM: &str = "limit";

/// REST API client for the Weebly Cloud API.
///
/// Provides `get`, `post`, `put`, `patch`, `delete` and `get_list` methods.
/// Every call performs one signed round trip and returns a
/// [`PagedResponse`] that can fetch its neighbouring pages.
///
/// Cloning is cheap: clones share one underlying HTTP client.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use weebly_cloud::{CloudConfig, RestClient};
/// use serde_json::json;
///
/// let client = RestClient::new(&CloudConfig::from_env()?)?;
///
/// // GET request
/// let response = client.get("account", None).await?;
///
/// // POST request with body
/// let body = json!({"email": "someone@example.com"});
/// let response = client.post("user", body.as_object().cloned()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    /// The shared HTTP client for making requests.
    http_client: Arc<HttpClient>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &CloudConfig) -> Result<Self, RestError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(base_url = %config.base_url().as_ref(), "Created Weebly Cloud REST client");
        Ok(Self {
            http_client: Arc::new(http_client),
        })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid (e.g., empty).
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(&self, path: &str, query: Option<Params>) -> Result<PagedResponse, RestError> {
        self.make_request(HttpMethod::Get, path, query).await
    }

    /// Sends a POST request to the specified path.
    ///
    /// An absent or empty body is sent as `[]`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(&self, path: &str, body: Option<Params>) -> Result<PagedResponse, RestError> {
        self.make_request(HttpMethod::Post, path, body).await
    }

    /// Sends a PUT request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(&self, path: &str, body: Option<Params>) -> Result<PagedResponse, RestError> {
        self.make_request(HttpMethod::Put, path, body).await
    }

    /// Sends a PATCH request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn patch(&self, path: &str, body: Option<Params>) -> Result<PagedResponse, RestError> {
        self.make_request(HttpMethod::Patch, path, body).await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<Params>,
    ) -> Result<PagedResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, query).await
    }

    /// Requests the first page of a listing.
    ///
    /// `page_size`, when given, is merged into `search_params` as `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let sites = client.get_list("user/1/site", None, Some(10)).await?;
    /// println!("{} sites over {} pages", sites.total(), sites.page_count());
    /// ```
    pub async fn get_list(
        &self,
        path: &str,
        search_params: Option<Params>,
        page_size: Option<u32>,
    ) -> Result<PagedResponse, RestError> {
        let mut query = search_params.unwrap_or_default();
        if let Some(limit) = page_size {
            query.insert(LIMIT_PARAM.to_string(), Value::from(limit));
        }
        let query = if query.is_empty() { None } else { Some(query) };
        self.get(path, query).await
    }

    /// Sends a pre-built request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn execute(&self, mut request: HttpRequest) -> Result<PagedResponse, RestError> {
        request.path = normalize_path(&request.path)?;
        let response = self.http_client.request(request).await?;
        Ok(PagedResponse::new(response, self.clone()))
    }

    /// Internal helper to build and send requests.
    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<Params>,
    ) -> Result<PagedResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, normalized_path);
        if let Some(params) = params {
            builder = builder.params(params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;
        self.execute(request).await
    }
}

/// Normalizes a REST API path by stripping leading `/` characters.
///
/// Returns an error for paths that are empty after stripping.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim().trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PublicKey, SecretKey};

    fn create_test_client() -> RestClient {
        let config = CloudConfig::builder()
            .public_key(PublicKey::new("key").unwrap())
            .secret_key(SecretKey::new("secret").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_normalize_path_strips_leading_slash() {
        assert_eq!(normalize_path("/user/1").unwrap(), "user/1");
        assert_eq!(normalize_path("//account").unwrap(), "account");
        assert_eq!(normalize_path("plan").unwrap(), "plan");
    }

    #[test]
    fn test_normalize_path_empty_path_returns_error() {
        assert!(matches!(
            normalize_path(""),
            Err(RestError::InvalidPath { path }) if path.is_empty()
        ));
        assert!(matches!(
            normalize_path("/"),
            Err(RestError::InvalidPath { path }) if path == "/"
        ));
    }

    #[tokio::test]
    async fn test_empty_path_fails_before_sending() {
        let client = create_test_client();
        let result = client.get("", None).await;
        assert!(matches!(result, Err(RestError::InvalidPath { .. })));
    }

    #[test]
    fn test_clones_share_http_client() {
        let client = create_test_client();
        let clone = client.clone();
        assert!(std::ptr::eq(client.http_client(), clone.http_client()));
    }

    #[test]
    fn test_rest_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestClient>();
    }
}

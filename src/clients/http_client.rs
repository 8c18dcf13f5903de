//! HTTP client for Weebly Cloud API communication.
//!
//! This module provides the [`HttpClient`] type, which signs and sends one
//! request per call and normalizes the response.

use std::collections::HashMap;

use crate::auth::RequestSigner;
use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUrl, CloudConfig, SDK_VERSION};

/// Header carrying the public key.
pub const PUBLIC_KEY_HEADER: &str = "X-Public-Key";
/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "X-Signed-Request-Hash";
/// Header carrying the client type.
pub const CLIENT_TYPE_HEADER: &str = "X-W-Client-Type";
/// Header carrying the client version.
pub const CLIENT_VERSION_HEADER: &str = "X-W-Client-Version";

/// HTTP client for making signed requests to the Weebly Cloud API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Request signing and the authentication headers
/// - Response header parsing, including pagination metadata
/// - Detecting API rejections
///
/// Each call to [`HttpClient::request`] performs exactly one round trip.
/// There is no retry and no timeout beyond the transport defaults.
/// Redirects are followed.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use weebly_cloud::{CloudConfig, HttpMethod, PublicKey, SecretKey};
/// use weebly_cloud::clients::{HttpClient, HttpRequest};
///
/// let config = CloudConfig::builder()
///     .public_key(PublicKey::new("key")?)
///     .secret_key(SecretKey::new("secret")?)
///     .build()?;
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "account").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL every path is joined onto.
    base_url: BaseUrl,
    /// Signs each request.
    signer: RequestSigner,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &CloudConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Weebly Cloud Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert(
            PUBLIC_KEY_HEADER.to_string(),
            config.public_key().as_ref().to_string(),
        );
        default_headers.insert(
            CLIENT_TYPE_HEADER.to_string(),
            config.client_type().to_string(),
        );
        default_headers.insert(
            CLIENT_VERSION_HEADER.to_string(),
            config.client_version().to_string(),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            signer: RequestSigner::new(config.secret_key().clone(), config.signature_encoding()),
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL a request is sent to.
    ///
    /// The query string is appended only when there are query parameters.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let url = self.base_url.join(&request.path);
        let query = request.query_string();
        if query.is_empty() {
            url
        } else {
            format!("{url}?{query}")
        }
    }

    /// Sends an HTTP request to the Weebly Cloud API.
    ///
    /// The response is rejected when its status is not 204 and its body is
    /// either empty or carries a non-null `error` field.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - The API rejects the request (`Api`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let path = request.path.trim_start_matches('/').to_string();
        let url = self.url_for(&request);

        let canonical_body = RequestSigner::canonical_body(request.http_method, request.body.as_ref());
        let signature = self
            .signer
            .sign_canonical(request.http_method, &path, &canonical_body);

        tracing::debug!(
            method = %request.http_method,
            path = %path,
            query_params = request.query.as_ref().map_or(0, serde_json::Map::len),
            "Sending Weebly Cloud API request"
        );

        let mut req_builder = self
            .client
            .request(request.http_method.into(), &url)
            .header(SIGNATURE_HEADER, signature);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if request.http_method.has_body() {
            req_builder = req_builder.body(canonical_body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        if let Some(error) = ApiError::from_body(code, &body) {
            tracing::debug!(
                status = code,
                code = ?error.code,
                message = %error.message,
                "Weebly Cloud API rejected request"
            );
            return Err(HttpError::Api(error));
        }

        let response = HttpResponse::new(
            code,
            res_headers,
            body,
            path,
            request.query.unwrap_or_default(),
        );

        if !response.is_ok() {
            tracing::warn!(
                status = code,
                path = %response.path,
                "Accepting non-2xx response without an error field"
            );
        }

        Ok(response)
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

//! HTTP request types for the Weebly Cloud SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Weebly Cloud API, plus the query string
//! encoder used for GET and DELETE parameters.

use std::fmt;

use serde_json::{Map, Value};

use crate::clients::errors::InvalidHttpRequestError;

/// A mapping of parameter names to JSON values.
///
/// Used both for request bodies and for query strings.
pub type Params = Map<String, Value>;

/// HTTP methods supported by the Weebly Cloud API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name used on the wire and in signatures.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods that send their parameters as a JSON body.
    ///
    /// GET and DELETE put parameters in the query string instead.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// An HTTP request to be sent to the Weebly Cloud API.
///
/// `path` is relative to the API base URL and never contains a query string.
/// Body parameters are only ever sent by body-carrying methods and query
/// parameters only by GET and DELETE; [`HttpRequest::verify`] rejects any
/// other combination.
///
/// # Example
///
/// ```rust
/// use weebly_cloud::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "user/1/site")
///     .query_param("limit", 10)
///     .build()
///     .unwrap();
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "user")
///     .body_param("email", json!("someone@example.com"))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL) for this request.
    pub path: String,
    /// JSON body parameters (POST/PUT/PATCH only).
    pub body: Option<Params>,
    /// Query parameters (GET/DELETE only).
    pub query: Option<Params>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` is empty or contains a query string
    /// - `body` is set on a GET or DELETE request
    /// - `query` is set on a POST, PUT or PATCH request
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_start_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if self.path.contains('?') {
            return Err(InvalidHttpRequestError::QueryInPath {
                path: self.path.clone(),
            });
        }

        if self.body.is_some() && !self.http_method.has_body() {
            return Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method.to_string(),
            });
        }

        if self.query.is_some() && self.http_method.has_body() {
            return Err(InvalidHttpRequestError::UnexpectedQuery {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }

    /// Returns the URL-encoded query string, or an empty string when there
    /// are no query parameters.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query.as_ref().map_or_else(String::new, build_query)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<Params>,
    query: Option<Params>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: None,
        }
    }

    /// Sets all body parameters at once.
    #[must_use]
    pub fn body(mut self, body: Params) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a single body parameter.
    #[must_use]
    pub fn body_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Params) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Routes `params` to the body or the query string depending on the method.
    #[must_use]
    pub fn params(self, params: Params) -> Self {
        if self.http_method.has_body() {
            self.body(params)
        } else {
            self.query(params)
        }
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
        };
        request.verify()?;
        Ok(request)
    }
}

/// Encodes parameters as a query string.
///
/// Strings are used as-is, numbers in decimal, booleans as `1`/`0`, and
/// nulls are skipped. Arrays expand to `key[0]=..&key[1]=..` and objects to
/// `key[sub]=..`, recursively. Keys and values are form-encoded, so a
/// space becomes `+`.
#[must_use]
pub fn build_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_pairs(&mut pairs, key, value);
    }
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn form_encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key.to_string(), n.to_string())),
        Value::String(s) => pairs.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push_pairs(pairs, &format!("{key}[{i}]"), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_pairs(pairs, &format!("{key}[{sub}]"), item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_http_method_display_is_upper_case() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_has_body() {
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(HttpMethod::Patch.has_body());
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "user/1")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "user/1");
        assert!(request.body.is_none());
        assert!(request.query.is_none());
        assert_eq!(request.query_string(), "");
    }

    #[test]
    fn test_builder_creates_valid_patch_request() {
        let request = HttpRequest::builder(HttpMethod::Patch, "user/1/site/2")
            .body_param("site_title", "Renamed")
            .build()
            .unwrap();

        assert_eq!(request.body, Some(params(json!({"site_title": "Renamed"}))));
    }

    #[test]
    fn test_post_without_body_is_allowed() {
        let request = HttpRequest::builder(HttpMethod::Post, "user/1/enable").build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_verify_rejects_empty_path() {
        let result = HttpRequest::builder(HttpMethod::Get, "/").build();
        assert_eq!(result, Err(InvalidHttpRequestError::EmptyPath));
    }

    #[test]
    fn test_verify_rejects_query_in_path() {
        let result = HttpRequest::builder(HttpMethod::Get, "user?limit=1").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::QueryInPath { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_body_on_get() {
        let result = HttpRequest::builder(HttpMethod::Get, "user/1")
            .body_param("a", 1)
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::UnexpectedBody { method }) if method == "GET"
        ));
    }

    #[test]
    fn test_verify_rejects_query_on_post() {
        let result = HttpRequest::builder(HttpMethod::Post, "user")
            .query_param("a", 1)
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::UnexpectedQuery { method }) if method == "POST"
        ));
    }

    #[test]
    fn test_params_are_routed_by_method() {
        let get = HttpRequest::builder(HttpMethod::Get, "user/1/site")
            .params(params(json!({"limit": 5})))
            .build()
            .unwrap();
        assert!(get.body.is_none());
        assert_eq!(get.query_string(), "limit=5");

        let post = HttpRequest::builder(HttpMethod::Post, "user")
            .params(params(json!({"email": "x@y.z"})))
            .build()
            .unwrap();
        assert!(post.query.is_none());
        assert!(post.body.is_some());
    }

    #[test]
    fn test_build_query_scalars() {
        let query = build_query(&params(json!({
            "a": "text",
            "b": 3,
            "c": true,
            "d": false,
            "e": null
        })));
        assert_eq!(query, "a=text&b=3&c=1&d=0");
    }

    #[test]
    fn test_build_query_percent_encodes() {
        let query = build_query(&params(json!({"q": "a b&c=d", "email": "x@y.com"})));
        assert_eq!(query, "email=x%40y.com&q=a+b%26c%3Dd");
    }

    #[test]
    fn test_build_query_space_is_plus() {
        let query = build_query(&params(json!({"q": "my site", "tag": "a+b"})));
        assert_eq!(query, "q=my+site&tag=a%2Bb");
    }

    #[test]
    fn test_build_query_nested_values() {
        let query = build_query(&params(json!({
            "ids": [1, 2],
            "filter": {"status": "live"}
        })));
        assert_eq!(
            query,
            "filter%5Bstatus%5D=live&ids%5B0%5D=1&ids%5B1%5D=2"
        );
    }
}

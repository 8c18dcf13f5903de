//! HTTP response types for the Weebly Cloud SDK.
//!
//! This module provides the [`HttpResponse`] envelope returned by every
//! request and the [`PageInfo`] metadata parsed from the `X-Resultset-*`
//! response headers.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::http_request::Params;

/// Header carrying the total number of items in a listing.
pub const RESULTSET_TOTAL_HEADER: &str = "x-resultset-total";
/// Header carrying the page size of a listing.
pub const RESULTSET_LIMIT_HEADER: &str = "x-resultset-limit";
/// Header carrying the (1-based) current page of a listing.
pub const RESULTSET_PAGE_HEADER: &str = "x-resultset-page";

/// Pagination metadata parsed from the `X-Resultset-*` headers.
///
/// Missing values are `-1`. A response is paginated exactly when the total
/// is positive.
///
/// # Example
///
/// ```rust
/// use weebly_cloud::clients::PageInfo;
///
/// let info = PageInfo::new(25, 10, 1);
/// assert_eq!(info.page_count, 3);
/// assert!(info.is_paginated);
/// assert_eq!(info.next_page_number(), Some(2));
/// assert_eq!(info.previous_page_number(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    /// Total number of items across all pages, or `-1`.
    pub total: i64,
    /// Page size, or `-1`.
    pub limit: i64,
    /// Current page number (1-based), or `-1`.
    pub page: i64,
    /// Number of pages; `1` when it cannot be computed.
    pub page_count: i64,
    /// Whether the listing spans pages.
    pub is_paginated: bool,
}

impl PageInfo {
    /// Builds page info from raw values, deriving `page_count` and
    /// `is_paginated`.
    #[must_use]
    pub fn new(total: i64, limit: i64, page: i64) -> Self {
        let page_count = if total > 0 && limit > 0 {
            total / limit + i64::from(total % limit != 0)
        } else {
            1
        };

        Self {
            total,
            limit,
            page,
            page_count,
            is_paginated: total > 0,
        }
    }

    /// Parses page info from a lowercase header map.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Self {
        let value = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map_or(-1, |raw| parse_header_value(raw))
        };

        Self::new(
            value(RESULTSET_TOTAL_HEADER),
            value(RESULTSET_LIMIT_HEADER),
            value(RESULTSET_PAGE_HEADER),
        )
    }

    /// Returns the page to request for "next", or `None` at the last page.
    #[must_use]
    pub const fn next_page_number(&self) -> Option<i64> {
        if self.is_paginated && self.page >= 1 && self.page < self.page_count {
            Some(self.page + 1)
        } else {
            None
        }
    }

    /// Returns the page to request for "previous", or `None` at the first page.
    #[must_use]
    pub const fn previous_page_number(&self) -> Option<i64> {
        if self.is_paginated && self.page > 1 {
            Some(self.page - 1)
        } else {
            None
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(-1, -1, -1)
    }
}

/// Parses the leading decimal digits of a header value.
///
/// Anything without leading digits, and the value `0`, yields `-1`.
#[must_use]
pub fn parse_header_value(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    match trimmed[..digits_end].parse::<i64>() {
        Ok(value) if value > 0 => value,
        _ => -1,
    }
}

/// An HTTP response from the Weebly Cloud API.
///
/// Keeps the raw body together with the request path and query parameters
/// that produced it, so that adjacent pages can be requested later.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// The request path, relative to the base URL.
    pub path: String,
    /// The query parameters the request was sent with.
    pub query: Params,
    /// Pagination metadata.
    pub page_info: PageInfo,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing pagination headers.
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
        path: impl Into<String>,
        query: Params,
    ) -> Self {
        let page_info = PageInfo::from_headers(&headers);
        Self {
            code,
            headers,
            body: body.into(),
            path: path.into(),
            query,
            page_info,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Decodes the body as a JSON value; an empty body decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON.
    pub fn json_value(&self) -> Result<Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body)
    }

    /// Decodes the body and returns one top-level field, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON.
    pub fn json_field(&self, key: &str) -> Result<Option<Value>, serde_json::Error> {
        Ok(match self.json_value()? {
            Value::Object(mut map) => map.remove(key),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    fn response(pairs: &[(&str, &str)], body: &str) -> HttpResponse {
        HttpResponse::new(200, headers(pairs), body, "user/1/site", Params::new())
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        assert!(HttpResponse::new(200, HashMap::new(), "", "a", Params::new()).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), "", "a", Params::new()).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), "", "a", Params::new()).is_ok());
    }

    #[test]
    fn test_page_info_from_headers() {
        let response = response(
            &[
                ("x-resultset-total", "25"),
                ("x-resultset-limit", "10"),
                ("x-resultset-page", "2"),
            ],
            "[]",
        );

        assert_eq!(response.page_info.total, 25);
        assert_eq!(response.page_info.limit, 10);
        assert_eq!(response.page_info.page, 2);
        assert_eq!(response.page_info.page_count, 3);
        assert!(response.page_info.is_paginated);
        assert_eq!(response.page_info.next_page_number(), Some(3));
        assert_eq!(response.page_info.previous_page_number(), Some(1));
    }

    #[test]
    fn test_page_info_absent_headers() {
        let info = response(&[], "{}").page_info;
        assert_eq!(info.total, -1);
        assert_eq!(info.limit, -1);
        assert_eq!(info.page, -1);
        assert_eq!(info.page_count, 1);
        assert!(!info.is_paginated);
        assert_eq!(info.next_page_number(), None);
        assert_eq!(info.previous_page_number(), None);
    }

    #[test]
    fn test_single_full_page_is_paginated_with_no_next() {
        let info = PageInfo::new(3, 3, 1);
        assert!(info.is_paginated);
        assert_eq!(info.page_count, 1);
        assert_eq!(info.next_page_number(), None);
        assert_eq!(info.previous_page_number(), None);
    }

    #[test]
    fn test_page_boundaries() {
        assert_eq!(PageInfo::new(25, 10, 3).next_page_number(), None);
        assert_eq!(PageInfo::new(25, 10, 3).previous_page_number(), Some(2));
        assert_eq!(PageInfo::new(25, 10, 1).previous_page_number(), None);
    }

    #[test]
    fn test_parse_header_value() {
        assert_eq!(parse_header_value("42"), 42);
        assert_eq!(parse_header_value(" 7 items"), 7);
        assert_eq!(parse_header_value("0"), -1);
        assert_eq!(parse_header_value("abc"), -1);
        assert_eq!(parse_header_value(""), -1);
    }

    #[test]
    fn test_page_info_huge_total() {
        let info = PageInfo::new(i64::MAX, 10, 1);
        assert_eq!(info.page_count, i64::MAX / 10 + 1);
        assert!(info.is_paginated);

        let headers = HashMap::from([
            ("x-resultset-total".to_string(), vec![i64::MAX.to_string()]),
            ("x-resultset-limit".to_string(), vec!["1".to_string()]),
        ]);
        assert_eq!(PageInfo::from_headers(&headers).page_count, i64::MAX);
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(PageInfo::new(25, 10, 1).page_count, 3);
        assert_eq!(PageInfo::new(20, 10, 1).page_count, 2);
        assert_eq!(PageInfo::new(3, 3, 1).page_count, 1);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response(&[("x-resultset-total", "5")], "");
        assert_eq!(response.header("X-Resultset-Total"), Some("5"));
        assert_eq!(response.header("missing"), None);
    }

    #[test]
    fn test_json_helpers() {
        let response = response(&[], r#"{"user":{"user_id":"9"},"count":2}"#);
        assert_eq!(
            response.json_field("user").unwrap(),
            Some(json!({"user_id": "9"}))
        );
        assert_eq!(response.json_field("missing").unwrap(), None);

        #[derive(serde::Deserialize)]
        struct Count {
            count: u32,
        }
        assert_eq!(response.json::<Count>().unwrap().count, 2);
    }

    #[test]
    fn test_json_value_of_empty_body_is_null() {
        assert_eq!(response(&[], "").json_value().unwrap(), Value::Null);
        assert!(response(&[], "nope").json_value().is_err());
    }
}

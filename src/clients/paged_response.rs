//! Paged responses with adjacent-page navigation.
//!
//! Every call through [`RestClient`] returns a [`PagedResponse`]: the
//! response envelope plus enough context (path, query parameters and the
//! client) to request the next or previous page of the same listing.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut page = client.get_list("user/1/site", None, Some(10)).await?;
//! loop {
//!     println!("page {} of {}", page.page(), page.page_count());
//!     match page.next_page().await? {
//!         Some(next) => page = next,
//!         None => break,
//!     }
//! }
//! ```

use std::ops::Deref;

use serde_json::Value;

use crate::clients::rest::{RestClient, RestError};
use crate::clients::{HttpResponse, PageInfo};

/// Query parameter carrying the requested page number.
pub const PAGE_PARAM: &str = "page";

/// A response that knows how to fetch its neighbouring pages.
///
/// Dereferences to [`HttpResponse`] for access to the status, headers and
/// body.
#[derive(Clone, Debug)]
pub struct PagedResponse {
    response: HttpResponse,
    client: RestClient,
}

impl PagedResponse {
    /// Wraps a response together with the client that produced it.
    #[must_use]
    pub const fn new(response: HttpResponse, client: RestClient) -> Self {
        Self { response, client }
    }

    /// Returns the pagination metadata.
    #[must_use]
    pub const fn page_info(&self) -> &PageInfo {
        &self.response.page_info
    }

    /// Total number of items across all pages, or `-1`.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.response.page_info.total
    }

    /// Current page number, or `-1`.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.response.page_info.page
    }

    /// Page size, or `-1`.
    #[must_use]
    pub const fn page_limit(&self) -> i64 {
        self.response.page_info.limit
    }

    /// Number of pages.
    #[must_use]
    pub const fn page_count(&self) -> i64 {
        self.response.page_info.page_count
    }

    /// Whether the listing spans pages.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.response.page_info.is_paginated
    }

    /// Returns the wrapped response.
    #[must_use]
    pub const fn response(&self) -> &HttpResponse {
        &self.response
    }

    /// Returns the client that produced this response.
    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    /// Unwraps into the underlying response.
    #[must_use]
    pub fn into_inner(self) -> HttpResponse {
        self.response
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` without a request when the response is not
    /// paginated or is already the last page.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the request fails.
    pub async fn next_page(&self) -> Result<Option<Self>, RestError> {
        match self.page_info().next_page_number() {
            Some(page) => self.fetch_page(page, "next").await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetches the previous page.
    ///
    /// Returns `Ok(None)` without a request when the response is not
    /// paginated or is already the first page.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] if the request fails.
    pub async fn previous_page(&self) -> Result<Option<Self>, RestError> {
        match self.page_info().previous_page_number() {
            Some(page) => self.fetch_page(page, "previous").await.map(Some),
            None => Ok(None),
        }
    }

    async fn fetch_page(&self, page: i64, direction: &str) -> Result<Self, RestError> {
        tracing::debug!(
            path = %self.response.path,
            page,
            direction,
            "Fetching adjacent page"
        );

        let mut query = self.response.query.clone();
        query.insert(PAGE_PARAM.to_string(), Value::from(page));
        self.client.get(&self.response.path, Some(query)).await
    }
}

impl Deref for PagedResponse {
    type Target = HttpResponse;

    fn deref(&self) -> &Self::Target {
        &self.response
    }
}

impl From<PagedResponse> for HttpResponse {
    fn from(paged: PagedResponse) -> Self {
        paged.response
    }
}

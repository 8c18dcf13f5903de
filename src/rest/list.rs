//! Lazily paginated resource lists.
//!
//! A [`CloudList`] presents a paginated listing as one cursor-based
//! sequence. Items from the first page are hydrated up front; later pages
//! are fetched one at a time, only when [`CloudList::advance`] runs past the
//! items already held.
//!
//! Every network round trip happens inside an `.await` on `advance` (or
//! `collect_remaining`), never behind an iterator.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut sites = user.list_sites(None).await?;
//! println!("{} sites", sites.size());
//!
//! while let Some(site) = sites.advance().await? {
//!     println!("{}", site.site_id());
//! }
//!
//! sites.reset(); // walk again without refetching
//! ```

use std::fmt;

use crate::clients::{Params, PagedResponse, RestClient};
use crate::rest::{IdContext, ResourceError};

/// Turns one page of a listing into resources.
///
/// Implemented for every closure of the matching shape, so a hydrator is
/// usually written inline:
///
/// ```rust
/// use weebly_cloud::rest::{Hydrate, IdContext, ResourceError};
///
/// let names = |_: &IdContext, json: &str| -> Result<Vec<String>, ResourceError> {
///     Ok(serde_json::from_str(json)?)
/// };
/// let items = names.hydrate(&IdContext::new(), r#"["a","b"]"#).unwrap();
/// assert_eq!(items, vec!["a", "b"]);
/// ```
pub trait Hydrate<T> {
    /// Builds the resources contained in `json`, using `ids` for the
    /// parents' identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the page does not have the expected shape.
    fn hydrate(&self, ids: &IdContext, json: &str) -> Result<Vec<T>, ResourceError>;
}

impl<T, F> Hydrate<T> for F
where
    F: Fn(&IdContext, &str) -> Result<Vec<T>, ResourceError>,
{
    fn hydrate(&self, ids: &IdContext, json: &str) -> Result<Vec<T>, ResourceError> {
        self(ids, json)
    }
}

/// A cursor over a paginated listing that fetches pages on demand.
///
/// - [`size`](Self::size) is the server-reported total for paginated
///   listings, and the first page's length otherwise.
/// - [`advance`](Self::advance) returns the item at the cursor and moves
///   the cursor forward, fetching the next page first when the cursor has
///   run past the hydrated items.
/// - Once the listing reports no next page, no further fetch is attempted.
/// - A failed fetch leaves the cursor and the hydrated items untouched.
pub struct CloudList<T> {
    response: PagedResponse,
    hydrator: Box<dyn Hydrate<T> + Send + Sync>,
    ids: IdContext,
    items: Vec<T>,
    cursor: usize,
    size: usize,
    is_paginated: bool,
    exhausted: bool,
}

impl<T> CloudList<T> {
    /// Builds a list from its first page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the first page cannot be hydrated.
    pub fn new<H>(response: PagedResponse, hydrator: H, ids: IdContext) -> Result<Self, ResourceError>
    where
        H: Hydrate<T> + Send + Sync + 'static,
    {
        let items = hydrator.hydrate(&ids, &response.body)?;
        let is_paginated = response.is_paginated();
        let size = if is_paginated {
            usize::try_from(response.total()).unwrap_or_default()
        } else {
            items.len()
        };

        tracing::debug!(
            path = %response.path,
            size,
            hydrated = items.len(),
            is_paginated,
            "Created lazy list"
        );

        Ok(Self {
            response,
            hydrator: Box::new(hydrator),
            ids,
            items,
            cursor: 0,
            size,
            is_paginated,
            exhausted: !is_paginated,
        })
    }

    /// Requests the first page of `path` and builds a list from it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or the hydration fails.
    pub async fn load<H>(
        client: &RestClient,
        path: &str,
        search_params: Option<Params>,
        ids: IdContext,
        hydrator: H,
    ) -> Result<Self, ResourceError>
    where
        H: Hydrate<T> + Send + Sync + 'static,
    {
        let response = client.get_list(path, search_params, None).await?;
        Self::new(response, hydrator, ids)
    }

    /// Number of items in the listing.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the listing spans pages.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.is_paginated
    }

    /// The cursor position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Number of items hydrated so far.
    #[must_use]
    pub fn loaded_len(&self) -> usize {
        self.items.len()
    }

    /// The items hydrated so far.
    #[must_use]
    pub fn loaded(&self) -> &[T] {
        &self.items
    }

    /// The most recently fetched page.
    #[must_use]
    pub const fn response(&self) -> &PagedResponse {
        &self.response
    }

    /// The parent ids handed to the hydrator.
    #[must_use]
    pub const fn ids(&self) -> &IdContext {
        &self.ids
    }

    /// The item at the cursor, without advancing or fetching.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// Whether the cursor has reached [`size`](Self::size).
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.cursor >= self.size
    }

    /// Moves the cursor back to the start. Hydrated items are kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Returns the item at the cursor and advances past it.
    ///
    /// Returns `Ok(None)` once the listing has no more items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if fetching or hydrating the next page
    /// fails. The list stays usable for the items already hydrated.
    pub async fn advance(&mut self) -> Result<Option<&T>, ResourceError> {
        // Items past the reported total are never yielded; a short listing
        // ends early through the exhausted check below.
        if self.at_end() {
            return Ok(None);
        }

        let index = self.cursor;

        if index >= self.items.len() && !self.fetch_next_page().await? {
            return Ok(None);
        }

        if index >= self.items.len() {
            return Ok(None);
        }

        self.cursor += 1;
        Ok(self.items.get(index))
    }

    /// Fetches one more page. Returns `false` when there is none.
    async fn fetch_next_page(&mut self) -> Result<bool, ResourceError> {
        if self.exhausted {
            return Ok(false);
        }

        let Some(next) = self.response.next_page().await? else {
            self.exhausted = true;
            return Ok(false);
        };

        let items = self.hydrator.hydrate(&self.ids, &next.body)?;
        tracing::debug!(
            path = %next.path,
            page = next.page(),
            appended = items.len(),
            "Appended page to lazy list"
        );

        self.items.extend(items);
        self.response = next;
        Ok(true)
    }
}

impl<T: Clone> CloudList<T> {
    /// Advances to the end, returning every item from the cursor onwards.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResourceError`] hit while fetching. Items returned
    /// before the error are consumed.
    pub async fn collect_remaining(&mut self) -> Result<Vec<T>, ResourceError> {
        let mut out = Vec::new();
        while let Some(item) = self.advance().await? {
            out.push(item.clone());
        }
        Ok(out)
    }
}

impl<T: fmt::Debug> fmt::Debug for CloudList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudList")
            .field("path", &self.response.path)
            .field("ids", &self.ids)
            .field("size", &self.size)
            .field("cursor", &self.cursor)
            .field("is_paginated", &self.is_paginated)
            .field("exhausted", &self.exhausted)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

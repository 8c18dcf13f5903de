//! The Page resource.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::resources::{id_field, list_items};
use crate::rest::{CloudResource, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError};

/// A page on a site. Pages can be edited but not deleted through the API.
///
/// URL `user/{user_id}/site/{site_id}/page/{page_id}`.
#[derive(Clone, Debug)]
pub struct Page {
    page_id: String,
    resource: Resource,
}

impl Page {
    /// Resource type name.
    pub const NAME: &'static str = "Page";

    /// Creates an unloaded page.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        page_id: impl Display,
    ) -> Self {
        let page_id = page_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/page/{page_id}"),
                PropertyEnvelope::Whole,
            ),
            page_id,
        }
    }

    /// Creates a page and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        page_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut page = Self::new(client, user_id, site_id, page_id);
        page.get().await?;
        Ok(page)
    }

    /// Creates a page from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        page_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let page_id = page_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/page/{page_id}"),
                PropertyEnvelope::Whole,
                properties,
            ),
            page_id,
        }
    }

    /// The page id.
    #[must_use]
    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Builds pages from a listing page (a bare array).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the page or an item is malformed, or
    /// `ids` lacks a parent id.
    pub fn array_from_json(
        client: &RestClient,
        ids: &IdContext,
        json: &str,
    ) -> Result<Vec<Self>, ResourceError> {
        let user_id = ids.require(Self::NAME, "user_id")?;
        let site_id = ids.require(Self::NAME, "site_id")?;
        list_items(Self::NAME, json, None)?
            .into_iter()
            .map(|properties| {
                let page_id = id_field(Self::NAME, &properties, "page_id")?;
                Ok(Self::from_properties(client, user_id, site_id, page_id, properties))
            })
            .collect()
    }
}

impl CloudResource for Page {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for Page {}

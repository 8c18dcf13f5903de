//! The FormEntry resource: one submission of a form.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::resources::{id_field, list_items};
use crate::rest::{CloudResource, IdContext, PropertyEnvelope, Resource, ResourceError};

/// A form submission.
///
/// URL `user/{user_id}/site/{site_id}/form/{form_id}/entry/{entry_id}`.
/// Listing items identify themselves with `form_entry_id`.
#[derive(Clone, Debug)]
pub struct FormEntry {
    entry_id: String,
    resource: Resource,
}

impl FormEntry {
    /// Resource type name.
    pub const NAME: &'static str = "FormEntry";

    /// Creates an unloaded entry.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        form_id: impl Display,
        entry_id: impl Display,
    ) -> Self {
        let entry_id = entry_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/form/{form_id}/entry/{entry_id}"),
                PropertyEnvelope::Whole,
            ),
            entry_id,
        }
    }

    /// Creates an entry and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        form_id: impl Display,
        entry_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut entry = Self::new(client, user_id, site_id, form_id, entry_id);
        entry.get().await?;
        Ok(entry)
    }

    /// Creates an entry from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        form_id: impl Display,
        entry_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let entry_id = entry_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/form/{form_id}/entry/{entry_id}"),
                PropertyEnvelope::Whole,
                properties,
            ),
            entry_id,
        }
    }

    /// The entry id.
    #[must_use]
    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// Builds entries from a listing page (a bare array).
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
        let form_id = ids.require(Self::NAME, "form_id")?;
        list_items(Self::NAME, json, None)?
            .into_iter()
            .map(|properties| {
                let entry_id = id_field(Self::NAME, &properties, "form_entry_id")?;
                Ok(Self::from_properties(
                    client, user_id, site_id, form_id, entry_id, properties,
                ))
            })
            .collect()
    }
}

impl CloudResource for FormEntry {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

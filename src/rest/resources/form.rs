//! The Form resource.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::{Params, RestClient};
use crate::rest::resources::{id_field, list_items, FormEntry};
use crate::rest::{CloudList, CloudResource, IdContext, PropertyEnvelope, Resource, ResourceError};

/// A form on a site. Read-only; submissions are [`FormEntry`] values.
///
/// URL `user/{user_id}/site/{site_id}/form/{form_id}`.
#[derive(Clone, Debug)]
pub struct Form {
    user_id: String,
    site_id: String,
    form_id: String,
    resource: Resource,
}

impl Form {
    /// Resource type name.
    pub const NAME: &'static str = "Form";

    /// Creates an unloaded form.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        form_id: impl Display,
    ) -> Self {
        let (user_id, site_id, form_id) = (user_id.to_string(), site_id.to_string(), form_id.to_string());
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/form/{form_id}"),
                PropertyEnvelope::Whole,
            ),
            user_id,
            site_id,
            form_id,
        }
    }

    /// Creates a form and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        form_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut form = Self::new(client, user_id, site_id, form_id);
        form.get().await?;
        Ok(form)
    }

    /// Creates a form from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        form_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let (user_id, site_id, form_id) = (user_id.to_string(), site_id.to_string(), form_id.to_string());
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/form/{form_id}"),
                PropertyEnvelope::Whole,
                properties,
            ),
            user_id,
            site_id,
            form_id,
        }
    }

    /// The form id.
    #[must_use]
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Builds forms from a listing page (a bare array).
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
                let form_id = id_field(Self::NAME, &properties, "form_id")?;
                Ok(Self::from_properties(client, user_id, site_id, form_id, properties))
            })
            .collect()
    }

    /// Lists the form's submissions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_form_entries(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<FormEntry>, ResourceError> {
        let client = self.resource.client().clone();
        let ids = IdContext::new()
            .with("user_id", &self.user_id)
            .with("site_id", &self.site_id)
            .with("form_id", &self.form_id);
        CloudList::load(
            self.resource.client(),
            &format!("{}/entry", self.url()),
            search_params,
            ids,
            move |ids: &IdContext, json: &str| FormEntry::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one submission.
    #[must_use]
    pub fn get_form_entry(&self, entry_id: impl Display) -> FormEntry {
        FormEntry::new(
            self.resource.client(),
            &self.user_id,
            &self.site_id,
            &self.form_id,
            entry_id,
        )
    }
}

impl CloudResource for Form {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

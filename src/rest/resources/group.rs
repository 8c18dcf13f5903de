//! The Group resource.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::resources::{id_field, list_items};
use crate::rest::{
    CloudResource, Deletable, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError,
};

/// A member group on a site.
///
/// URL `user/{user_id}/site/{site_id}/group/{group_id}`.
#[derive(Clone, Debug)]
pub struct Group {
    group_id: String,
    resource: Resource,
}

impl Group {
    /// Resource type name.
    pub const NAME: &'static str = "Group";

    /// Creates an unloaded group.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        group_id: impl Display,
    ) -> Self {
        let group_id = group_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/group/{group_id}"),
                PropertyEnvelope::Whole,
            ),
            group_id,
        }
    }

    /// Creates a group and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        group_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut group = Self::new(client, user_id, site_id, group_id);
        group.get().await?;
        Ok(group)
    }

    /// Creates a group from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        group_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let group_id = group_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/group/{group_id}"),
                PropertyEnvelope::Whole,
                properties,
            ),
            group_id,
        }
    }

    /// The group id.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Builds groups from a listing page (a bare array).
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
                let group_id = id_field(Self::NAME, &properties, "group_id")?;
                Ok(Self::from_properties(client, user_id, site_id, group_id, properties))
            })
            .collect()
    }
}

impl CloudResource for Group {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for Group {}
impl Deletable for Group {}

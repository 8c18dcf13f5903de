//! The Member resource.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::resources::{id_field, list_items};
use crate::rest::{
    CloudResource, Deletable, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError,
};

/// A site member: a visitor account with access to member-only pages.
///
/// URL `user/{user_id}/site/{site_id}/member/{member_id}`.
#[derive(Clone, Debug)]
pub struct Member {
    member_id: String,
    resource: Resource,
}

impl Member {
    /// Resource type name.
    pub const NAME: &'static str = "Member";

    /// Creates an unloaded member.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        member_id: impl Display,
    ) -> Self {
        let member_id = member_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/member/{member_id}"),
                PropertyEnvelope::Whole,
            ),
            member_id,
        }
    }

    /// Fetches a member.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        member_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut member = Self::new(client, user_id, site_id, member_id);
        member.get().await?;
        Ok(member)
    }

    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        member_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let member_id = member_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/member/{member_id}"),
                PropertyEnvelope::Whole,
                properties,
            ),
            member_id,
        }
    }

    #[must_use]
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Builds members from a listing page. Items carry `member_id`; the
    /// user and site ids come from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] on a malformed page.
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
                let member_id = id_field(Self::NAME, &properties, "member_id")?;
                Ok(Self::from_properties(client, user_id, site_id, member_id, properties))
            })
            .collect()
    }
}

impl CloudResource for Member {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for Member {}
impl Deletable for Member {}

//! The User resource.
//!
//! A user owns sites and can be enabled, disabled, or handed a one-time
//! login link into the site editor.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::{Params, RestClient};
use crate::rest::resources::{body_field, id_field, merge_params, object_body, string_field, Site};
use crate::rest::{CloudList, CloudResource, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError};

/// A user under the account.
///
/// URL `user/{user_id}`; properties under `user`.
#[derive(Clone, Debug)]
pub struct User {
    user_id: String,
    resource: Resource,
}

impl User {
    /// Resource type name.
    pub const NAME: &'static str = "User";

    /// Creates an unloaded user.
    #[must_use]
    pub fn new(client: &RestClient, user_id: impl Display) -> Self {
        let user_id = user_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}"),
                PropertyEnvelope::Key("user"),
            ),
            user_id,
        }
    }

    /// Creates a user and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(client: &RestClient, user_id: impl Display) -> Result<Self, ResourceError> {
        let mut user = Self::new(client, user_id);
        user.get().await?;
        Ok(user)
    }

    /// Creates a user from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let user_id = user_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}"),
                PropertyEnvelope::Key("user"),
                properties,
            ),
            user_id,
        }
    }

    /// The user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Enables the user.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn enable(&self) -> Result<(), ResourceError> {
        self.post_action("enable").await
    }

    /// Disables the user.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn disable(&self) -> Result<(), ResourceError> {
        self.post_action("disable").await
    }

    /// Generates a one-time link that logs the user into the editor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `link`.
    pub async fn login_link(&self) -> Result<String, ResourceError> {
        let response = self
            .resource
            .client()
            .post(&format!("{}/loginLink", self.url()), None)
            .await?;
        string_field(Self::NAME, &response, "link")
    }

    /// Returns the themes available to the user, as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `data`.
    pub async fn get_available_themes(
        &self,
        search_params: Option<Params>,
    ) -> Result<Value, ResourceError> {
        let response = self
            .resource
            .client()
            .get_list(&format!("{}/theme", self.url()), search_params, None)
            .await?;
        body_field(Self::NAME, &response, "data")
    }

    /// Registers a custom theme from a zip archive URL.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create_custom_theme(&self, name: &str, zip_url: &str) -> Result<(), ResourceError> {
        let params = merge_params(
            [("name", Value::from(name)), ("zip_url", Value::from(zip_url))],
            None,
        );
        self.resource
            .client()
            .post(&format!("{}/theme", self.url()), Some(params))
            .await?;
        Ok(())
    }

    /// Creates a site for `domain` plus any extra `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `site` object.
    pub async fn create_site(
        &self,
        domain: &str,
        data: Option<Params>,
    ) -> Result<Site, ResourceError> {
        let client = self.resource.client();
        let params = merge_params([("domain", Value::from(domain))], data);
        let response = client
            .post(&format!("{}/site", self.url()), Some(params))
            .await?;

        let properties = object_body(Site::NAME, &response, Some("site"))?;
        let site_id = id_field(Site::NAME, &properties, "site_id")?;
        Ok(Site::from_properties(client, &self.user_id, site_id, properties))
    }

    /// Lists the user's sites.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_sites(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<Site>, ResourceError> {
        let client = self.resource.client().clone();
        CloudList::load(
            self.resource.client(),
            &format!("{}/site", self.url()),
            search_params,
            IdContext::new().with("user_id", &self.user_id),
            move |ids: &IdContext, json: &str| Site::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one of the user's sites.
    #[must_use]
    pub fn get_site(&self, site_id: impl Display) -> Site {
        Site::new(self.resource.client(), &self.user_id, site_id)
    }

    async fn post_action(&self, action: &str) -> Result<(), ResourceError> {
        self.resource
            .client()
            .post(&format!("{}/{action}", self.url()), None)
            .await?;
        Ok(())
    }
}

impl CloudResource for User {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for User {}

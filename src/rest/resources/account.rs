//! The Account resource: the API key's own account.
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::rest::resources::Account;
//! use weebly_cloud::rest::CloudResource;
//!
//! let mut account = Account::fetch(&client).await?;
//! let user = account.create_user("owner@example.com", None).await?;
//! let mut plans = account.list_plans().await?;
//! ```

use serde_json::{Map, Value};

use crate::clients::{Params, RestClient};
use crate::rest::resources::{id_field, merge_params, object_body, Plan, User};
use crate::rest::{CloudList, CloudResource, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError};

/// The account that owns the API key.
///
/// URL `account`; properties under `account`.
#[derive(Clone, Debug)]
pub struct Account {
    resource: Resource,
}

impl Account {
    /// Resource type name.
    pub const NAME: &'static str = "Account";
    const URL: &'static str = "account";

    /// Creates an unloaded account.
    #[must_use]
    pub fn new(client: &RestClient) -> Self {
        Self {
            resource: Resource::new(Self::NAME, client, Self::URL, PropertyEnvelope::Key("account")),
        }
    }

    /// Creates an account and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(client: &RestClient) -> Result<Self, ResourceError> {
        let mut account = Self::new(client);
        account.get().await?;
        Ok(account)
    }

    /// Creates an account from known properties.
    #[must_use]
    pub fn from_properties(client: &RestClient, properties: Map<String, Value>) -> Self {
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                Self::URL,
                PropertyEnvelope::Key("account"),
                properties,
            ),
        }
    }

    /// Creates a user with `email` plus any extra `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `user` object.
    pub async fn create_user(
        &self,
        email: &str,
        data: Option<Params>,
    ) -> Result<User, ResourceError> {
        let client = self.resource.client();
        let params = merge_params([("email", Value::from(email))], data);
        let response = client.post("user", Some(params)).await?;

        let properties = object_body(User::NAME, &response, Some("user"))?;
        let user_id = id_field(User::NAME, &properties, "user_id")?;
        Ok(User::from_properties(client, user_id, properties))
    }

    /// Lists the plans available to the account.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_plans(&self) -> Result<CloudList<Plan>, ResourceError> {
        let client = self.resource.client().clone();
        CloudList::load(
            self.resource.client(),
            "plan",
            None,
            IdContext::new(),
            move |ids: &IdContext, json: &str| Plan::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one plan.
    #[must_use]
    pub fn get_plan(&self, plan_id: impl std::fmt::Display) -> Plan {
        Plan::new(self.resource.client(), plan_id)
    }
}

impl CloudResource for Account {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for Account {}

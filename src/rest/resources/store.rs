//! The Store resource: a site's e-commerce settings and catalogue.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let store = site.get_store();
//! let skus = json!([{"price": 9.99, "inventory": 10}]);
//! let product = store.create_product("Mug", skus, None).await?;
//! product.publish().await?;
//!
//! println!("{} products", store.get_product_count().await?);
//! ```

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::{Params, RestClient};
use crate::rest::resources::{body_field, id_field, merge_params, object_body, Product};
use crate::rest::{CloudList, CloudResource, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError};

/// A site's store.
///
/// URL `user/{user_id}/site/{site_id}/store`; the whole body is the
/// property object.
#[derive(Clone, Debug)]
pub struct Store {
    user_id: String,
    site_id: String,
    resource: Resource,
}

impl Store {
    /// Resource type name.
    pub const NAME: &'static str = "Store";

    /// Creates an unloaded store.
    #[must_use]
    pub fn new(client: &RestClient, user_id: impl Display, site_id: impl Display) -> Self {
        let user_id = user_id.to_string();
        let site_id = site_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/store"),
                PropertyEnvelope::Whole,
            ),
            user_id,
            site_id,
        }
    }

    /// Creates a store and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut store = Self::new(client, user_id, site_id);
        store.get().await?;
        Ok(store)
    }

    /// Creates a store from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let user_id = user_id.to_string();
        let site_id = site_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/store"),
                PropertyEnvelope::Whole,
                properties,
            ),
            user_id,
            site_id,
        }
    }

    /// Sends `data` as a PATCH right away and returns the decoded response.
    ///
    /// Unlike [`Mutable::save`], this bypasses the pending edits.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the body is not JSON.
    pub async fn update_store(&self, data: Params) -> Result<Value, ResourceError> {
        let response = self.resource.client().patch(self.url(), Some(data)).await?;
        Ok(response.json_value()?)
    }

    /// Lists the store's products.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_products(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<Product>, ResourceError> {
        let client = self.resource.client().clone();
        let ids = IdContext::new()
            .with("user_id", &self.user_id)
            .with("site_id", &self.site_id);
        CloudList::load(
            self.resource.client(),
            &format!("{}/product", self.url()),
            search_params,
            ids,
            move |ids: &IdContext, json: &str| Product::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns the number of products in the store.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// numeric `count`.
    pub async fn get_product_count(&self) -> Result<u64, ResourceError> {
        let response = self
            .resource
            .client()
            .get(&format!("{}/product/count", self.url()), None)
            .await?;
        let count = body_field(Self::NAME, &response, "count")?;
        count
            .as_u64()
            .or_else(|| count.as_str().and_then(|s| s.parse().ok()))
            .ok_or(ResourceError::UnexpectedBody {
                resource: Self::NAME,
                expected: "a numeric 'count'",
            })
    }

    /// Creates a product with `name` and `skus` plus any extra `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `product_id`.
    pub async fn create_product(
        &self,
        name: &str,
        skus: Value,
        data: Option<Params>,
    ) -> Result<Product, ResourceError> {
        let client = self.resource.client();
        let params = merge_params([("name", Value::from(name)), ("skus", skus)], data);
        let response = client
            .post(&format!("{}/product", self.url()), Some(params))
            .await?;

        let properties = object_body(Product::NAME, &response, None)?;
        let product_id = id_field(Product::NAME, &properties, "product_id")?;
        Ok(Product::from_properties(
            client,
            &self.user_id,
            &self.site_id,
            product_id,
            properties,
        ))
    }

    /// Returns a lazy handle to one product.
    #[must_use]
    pub fn get_product(&self, product_id: impl Display) -> Product {
        Product::new(self.resource.client(), &self.user_id, &self.site_id, product_id)
    }
}

impl CloudResource for Store {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for Store {}

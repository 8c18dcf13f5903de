//! The Product resource.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::resources::{id_field, list_items, merge_params};
use crate::rest::{
    CloudResource, Deletable, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError,
};

/// A product in a site's store.
///
/// URL `user/{user_id}/site/{site_id}/store/product/{product_id}`.
#[derive(Clone, Debug)]
pub struct Product {
    product_id: String,
    resource: Resource,
}

impl Product {
    /// Resource type name.
    pub const NAME: &'static str = "Product";

    /// Creates an unloaded product.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        product_id: impl Display,
    ) -> Self {
        let product_id = product_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/store/product/{product_id}"),
                PropertyEnvelope::Whole,
            ),
            product_id,
        }
    }

    /// Creates a product and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        product_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut product = Self::new(client, user_id, site_id, product_id);
        product.get().await?;
        Ok(product)
    }

    /// Creates a product from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        product_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let product_id = product_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/store/product/{product_id}"),
                PropertyEnvelope::Whole,
                properties,
            ),
            product_id,
        }
    }

    /// The product id.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Builds products from a listing page (a bare array).
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
                let product_id = id_field(Self::NAME, &properties, "product_id")?;
                Ok(Self::from_properties(client, user_id, site_id, product_id, properties))
            })
            .collect()
    }

    /// Makes the product visible in the store.
    ///
    /// Sent immediately; pending edits are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn publish(&self) -> Result<(), ResourceError> {
        self.set_published(true).await
    }

    /// Hides the product from the store.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn unpublish(&self) -> Result<(), ResourceError> {
        self.set_published(false).await
    }

    async fn set_published(&self, published: bool) -> Result<(), ResourceError> {
        let params = merge_params([("published", Value::from(published))], None);
        self.resource.client().patch(self.url(), Some(params)).await?;
        Ok(())
    }
}

impl CloudResource for Product {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for Product {}
impl Deletable for Product {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CloudConfig, PublicKey, SecretKey};

    fn client() -> RestClient {
        let config = CloudConfig::builder()
            .public_key(PublicKey::new("key").unwrap())
            .secret_key(SecretKey::new("secret").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_products_take_parent_ids_from_context() {
        let ids = IdContext::new().with("user_id", "1").with("site_id", "2");
        let products =
            Product::array_from_json(&client(), &ids, r#"[{"product_id":"10"},{"product_id":"11"}]"#)
                .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].url(), "user/1/site/2/store/product/10");
        assert_eq!(products[1].product_id(), "11");
    }
}

//! The BlogPost resource.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::resources::{id_field, list_items};
use crate::rest::{
    CloudResource, Deletable, IdContext, Mutable, PropertyEnvelope, Resource, ResourceError,
};

/// A post on a blog.
///
/// URL `user/{user_id}/site/{site_id}/blog/{blog_id}/post/{post_id}`.
#[derive(Clone, Debug)]
pub struct BlogPost {
    blog_id: String,
    post_id: String,
    resource: Resource,
}

impl BlogPost {
    /// Resource type name.
    pub const NAME: &'static str = "BlogPost";

    /// Creates an unloaded post.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        blog_id: impl Display,
        post_id: impl Display,
    ) -> Self {
        let blog_id = blog_id.to_string();
        let post_id = post_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/blog/{blog_id}/post/{post_id}"),
                PropertyEnvelope::Whole,
            ),
            blog_id,
            post_id,
        }
    }

    /// Creates a post and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        blog_id: impl Display,
        post_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut post = Self::new(client, user_id, site_id, blog_id, post_id);
        post.get().await?;
        Ok(post)
    }

    /// Creates a post from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        blog_id: impl Display,
        post_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        let blog_id = blog_id.to_string();
        let post_id = post_id.to_string();
        Self {
            resource: Resource::with_properties(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}/blog/{blog_id}/post/{post_id}"),
                PropertyEnvelope::Whole,
                properties,
            ),
            blog_id,
            post_id,
        }
    }

    /// The parent blog's id.
    #[must_use]
    pub fn blog_id(&self) -> &str {
        &self.blog_id
    }

    /// The post id.
    #[must_use]
    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Builds posts from a listing page (a bare array).
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
        let blog_id = ids.require(Self::NAME, "blog_id")?;
        list_items(Self::NAME, json, None)?
            .into_iter()
            .map(|properties| {
                let post_id = id_field(Self::NAME, &properties, "post_id")?;
                Ok(Self::from_properties(
                    client, user_id, site_id, blog_id, post_id, properties,
                ))
            })
            .collect()
    }
}

impl CloudResource for BlogPost {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for BlogPost {}
impl Deletable for BlogPost {}

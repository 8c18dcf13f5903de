//! The Blog resource.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::{Params, RestClient};
use crate::rest::resources::{id_field, list_items, object_body, BlogPost};
use crate::rest::{CloudList, CloudResource, IdContext, PropertyEnvelope, Resource, ResourceError};

/// A blog on a site.
///
/// URL `user/{user_id}/site/{site_id}/blog/{blog_id}`; the whole body is the
/// property object. Blogs are read-only; their posts are not.
#[derive(Clone, Debug)]
pub struct Blog {
    user_id: String,
    site_id: String,
    blog_id: String,
    resource: Resource,
}

impl Blog {
    /// Resource type name.
    pub const NAME: &'static str = "Blog";

    /// Creates an unloaded blog.
    #[must_use]
    pub fn new(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        blog_id: impl Display,
    ) -> Self {
        Self::build(client, user_id, site_id, blog_id, None)
    }

    /// Creates a blog and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        blog_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut blog = Self::new(client, user_id, site_id, blog_id);
        blog.get().await?;
        Ok(blog)
    }

    /// Creates a blog from known properties.
    #[must_use]
    pub fn from_properties(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        blog_id: impl Display,
        properties: Map<String, Value>,
    ) -> Self {
        Self::build(client, user_id, site_id, blog_id, Some(properties))
    }

    fn build(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
        blog_id: impl Display,
        properties: Option<Map<String, Value>>,
    ) -> Self {
        let (user_id, site_id, blog_id) = (user_id.to_string(), site_id.to_string(), blog_id.to_string());
        let url = format!("user/{user_id}/site/{site_id}/blog/{blog_id}");
        let resource = match properties {
            Some(p) => Resource::with_properties(Self::NAME, client, url, PropertyEnvelope::Whole, p),
            None => Resource::new(Self::NAME, client, url, PropertyEnvelope::Whole),
        };
        Self {
            user_id,
            site_id,
            blog_id,
            resource,
        }
    }

    /// The blog id.
    #[must_use]
    pub fn blog_id(&self) -> &str {
        &self.blog_id
    }

    /// Builds blogs from a listing page (a bare array).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the page or an item is malformed, or
    /// `ids` lacks `user_id` or `site_id`.
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
                let blog_id = id_field(Self::NAME, &properties, "blog_id")?;
                Ok(Self::from_properties(client, user_id, site_id, blog_id, properties))
            })
            .collect()
    }

    /// Lists the blog's posts.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_blog_posts(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<BlogPost>, ResourceError> {
        let client = self.resource.client().clone();
        let ids = IdContext::new()
            .with("user_id", &self.user_id)
            .with("site_id", &self.site_id)
            .with("blog_id", &self.blog_id);
        CloudList::load(
            self.resource.client(),
            &format!("{}/post", self.url()),
            search_params,
            ids,
            move |ids: &IdContext, json: &str| BlogPost::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one post.
    #[must_use]
    pub fn get_blog_post(&self, post_id: impl Display) -> BlogPost {
        BlogPost::new(
            self.resource.client(),
            &self.user_id,
            &self.site_id,
            &self.blog_id,
            post_id,
        )
    }

    /// Creates a post with `post_body` plus any extra `data`.
    ///
    /// `post_body` always wins over a `post_body` key in `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `post_id`.
    pub async fn create_blog_post(
        &self,
        post_body: &str,
        data: Option<Params>,
    ) -> Result<BlogPost, ResourceError> {
        let client = self.resource.client();
        let mut params = data.unwrap_or_default();
        params.insert("post_body".to_string(), Value::from(post_body));

        let response = client
            .post(&format!("{}/post", self.url()), Some(params))
            .await?;
        let properties = object_body(BlogPost::NAME, &response, None)?;
        let post_id = id_field(BlogPost::NAME, &properties, "post_id")?;
        Ok(BlogPost::from_properties(
            client,
            &self.user_id,
            &self.site_id,
            &self.blog_id,
            post_id,
            properties,
        ))
    }
}

impl CloudResource for Blog {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

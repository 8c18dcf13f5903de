//! The Site resource and its sub-resources.
//!
//! A site is the hub of the resource tree: blogs, forms, pages, member
//! groups, members and the store all hang off it.
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::rest::resources::Site;
//! use weebly_cloud::rest::{CloudResource, Mutable};
//!
//! let mut site = Site::fetch(&client, "1234", "5678").await?;
//! site.set_plan(4, None).await?;
//! site.publish().await?;
//!
//! let link = site.login_link().await?;
//! ```

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::clients::{Params, RestClient};
use crate::rest::resources::{
    id_field, list_items, merge_params, object_body, string_field, Blog, Form, Group, Member,
    Page, Plan, Store,
};
use crate::rest::{
    CloudList, CloudResource, Deletable, IdContext, Mutable, PropertyEnvelope, Resource,
    ResourceError,
};

/// A site owned by a user.
///
/// URL `user/{user_id}/site/{site_id}`; properties under `site`.
#[derive(Clone, Debug)]
pub struct Site {
    user_id: String,
    site_id: String,
    resource: Resource,
}

impl Site {
    /// Resource type name.
    pub const NAME: &'static str = "Site";

    /// Creates an unloaded site.
    #[must_use]
    pub fn new(client: &RestClient, user_id: impl Display, site_id: impl Display) -> Self {
        let user_id = user_id.to_string();
        let site_id = site_id.to_string();
        Self {
            resource: Resource::new(
                Self::NAME,
                client,
                format!("user/{user_id}/site/{site_id}"),
                PropertyEnvelope::Key("site"),
            ),
            user_id,
            site_id,
        }
    }

    /// Creates a site and fetches its properties.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn fetch(
        client: &RestClient,
        user_id: impl Display,
        site_id: impl Display,
    ) -> Result<Self, ResourceError> {
        let mut site = Self::new(client, user_id, site_id);
        site.get().await?;
        Ok(site)
    }

    /// Creates a site from known properties.
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
                format!("user/{user_id}/site/{site_id}"),
                PropertyEnvelope::Key("site"),
                properties,
            ),
            user_id,
            site_id,
        }
    }

    /// The owning user's id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The site id.
    #[must_use]
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Builds sites from a `{"sites": [...]}` listing page.
    ///
    /// `ids` must carry `user_id`; each item carries its own `site_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the page or an item is malformed.
    pub fn array_from_json(
        client: &RestClient,
        ids: &IdContext,
        json: &str,
    ) -> Result<Vec<Self>, ResourceError> {
        let user_id = ids.require(Self::NAME, "user_id")?;
        list_items(Self::NAME, json, Some("sites"))?
            .into_iter()
            .map(|properties| {
                let site_id = id_field(Self::NAME, &properties, "site_id")?;
                Ok(Self::from_properties(client, user_id, site_id, properties))
            })
            .collect()
    }

    /// Publishes the site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn publish(&self) -> Result<(), ResourceError> {
        self.post_action("publish", None).await
    }

    /// Unpublishes the site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn unpublish(&self) -> Result<(), ResourceError> {
        self.post_action("unpublish", None).await
    }

    /// Generates a one-time link that opens this site in the editor.
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

    /// Sets the credentials used to publish the site to an external host.
    ///
    /// The API requires `publish_host`, `publish_username`,
    /// `publish_password` and `publish_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn set_publish_credentials(&self, data: Params) -> Result<(), ResourceError> {
        self.post_action("setPublishCredentials", Some(data)).await
    }

    /// Restores a deleted site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn restore(&self, domain: &str) -> Result<(), ResourceError> {
        let params = merge_params([("domain", Value::from(domain))], None);
        self.post_action("restore", Some(params)).await
    }

    /// Enables the site for editing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn enable(&self) -> Result<(), ResourceError> {
        self.post_action("enable", None).await
    }

    /// Disables the site, locking the user out of the editor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn disable(&self) -> Result<(), ResourceError> {
        self.post_action("disable", None).await
    }

    /// Returns the plan assigned to the site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response holds
    /// no plan.
    pub async fn get_plan(&self) -> Result<Plan, ResourceError> {
        let client = self.resource.client();
        let response = client.get(&format!("{}/plan", self.url()), None).await?;
        Plan::array_from_json(client, &IdContext::new(), &response.body)?
            .into_iter()
            .next()
            .ok_or(ResourceError::UnexpectedBody {
                resource: Plan::NAME,
                expected: "at least one plan",
            })
    }

    /// Assigns a plan to the site. `term` defaults to 1.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn set_plan(&self, plan_id: impl Display, term: Option<u32>) -> Result<(), ResourceError> {
        let params = merge_params(
            [
                ("plan_id", Value::from(plan_id.to_string())),
                ("term", Value::from(term.unwrap_or(1))),
            ],
            None,
        );
        self.post_action("plan", Some(params)).await
    }

    /// Assigns a theme to the site.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn set_theme(&self, theme_id: impl Display, is_custom: bool) -> Result<(), ResourceError> {
        let params = merge_params(
            [
                ("theme_id", Value::from(theme_id.to_string())),
                ("is_custom", Value::from(is_custom)),
            ],
            None,
        );
        self.post_action("theme", Some(params)).await
    }

    /// Lists the site's blogs.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_blogs(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<Blog>, ResourceError> {
        let client = self.resource.client().clone();
        CloudList::load(
            self.resource.client(),
            &format!("{}/blog", self.url()),
            search_params,
            self.child_ids(),
            move |ids: &IdContext, json: &str| Blog::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one blog.
    #[must_use]
    pub fn get_blog(&self, blog_id: impl Display) -> Blog {
        Blog::new(self.resource.client(), &self.user_id, &self.site_id, blog_id)
    }

    /// Lists the site's forms.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_forms(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<Form>, ResourceError> {
        let client = self.resource.client().clone();
        CloudList::load(
            self.resource.client(),
            &format!("{}/form", self.url()),
            search_params,
            self.child_ids(),
            move |ids: &IdContext, json: &str| Form::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one form.
    #[must_use]
    pub fn get_form(&self, form_id: impl Display) -> Form {
        Form::new(self.resource.client(), &self.user_id, &self.site_id, form_id)
    }

    /// Lists the site's pages.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_pages(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<Page>, ResourceError> {
        let client = self.resource.client().clone();
        CloudList::load(
            self.resource.client(),
            &format!("{}/page", self.url()),
            search_params,
            self.child_ids(),
            move |ids: &IdContext, json: &str| Page::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one page.
    #[must_use]
    pub fn get_page(&self, page_id: impl Display) -> Page {
        Page::new(self.resource.client(), &self.user_id, &self.site_id, page_id)
    }

    /// Lists the site's member groups.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_groups(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<Group>, ResourceError> {
        let client = self.resource.client().clone();
        CloudList::load(
            self.resource.client(),
            &format!("{}/group", self.url()),
            search_params,
            self.child_ids(),
            move |ids: &IdContext, json: &str| Group::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one member group.
    #[must_use]
    pub fn get_group(&self, group_id: impl Display) -> Group {
        Group::new(self.resource.client(), &self.user_id, &self.site_id, group_id)
    }

    /// Creates a member group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `group_id`.
    pub async fn create_group(&self, name: &str) -> Result<Group, ResourceError> {
        let client = self.resource.client();
        let params = merge_params([("name", Value::from(name))], None);
        let response = client
            .post(&format!("{}/group", self.url()), Some(params))
            .await?;

        let properties = object_body(Group::NAME, &response, None)?;
        let group_id = id_field(Group::NAME, &properties, "group_id")?;
        Ok(Group::from_properties(
            client,
            &self.user_id,
            &self.site_id,
            group_id,
            properties,
        ))
    }

    /// Lists the site's members.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or hydration fails.
    pub async fn list_members(
        &self,
        search_params: Option<Params>,
    ) -> Result<CloudList<Member>, ResourceError> {
        let client = self.resource.client().clone();
        CloudList::load(
            self.resource.client(),
            &format!("{}/member", self.url()),
            search_params,
            self.child_ids(),
            move |ids: &IdContext, json: &str| Member::array_from_json(&client, ids, json),
        )
        .await
    }

    /// Returns a lazy handle to one member.
    #[must_use]
    pub fn get_member(&self, member_id: impl Display) -> Member {
        Member::new(self.resource.client(), &self.user_id, &self.site_id, member_id)
    }

    /// Creates a member from `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the response has no
    /// `member_id`.
    pub async fn create_member(&self, data: Params) -> Result<Member, ResourceError> {
        let client = self.resource.client();
        let response = client
            .post(&format!("{}/member", self.url()), Some(data))
            .await?;

        let properties = object_body(Member::NAME, &response, None)?;
        let member_id = id_field(Member::NAME, &properties, "member_id")?;
        Ok(Member::from_properties(
            client,
            &self.user_id,
            &self.site_id,
            member_id,
            properties,
        ))
    }

    /// Returns a lazy handle to the site's store.
    #[must_use]
    pub fn get_store(&self) -> Store {
        Store::new(self.resource.client(), &self.user_id, &self.site_id)
    }

    fn child_ids(&self) -> IdContext {
        IdContext::new()
            .with("user_id", &self.user_id)
            .with("site_id", &self.site_id)
    }

    async fn post_action(&self, action: &str, body: Option<Params>) -> Result<(), ResourceError> {
        self.resource
            .client()
            .post(&format!("{}/{action}", self.url()), body)
            .await?;
        Ok(())
    }
}

impl CloudResource for Site {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Mutable for Site {}
impl Deletable for Site {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CloudConfig, PublicKey, SecretKey};
    use serde_json::json;

    fn client() -> RestClient {
        let config = CloudConfig::builder()
            .public_key(PublicKey::new("key").unwrap())
            .secret_key(SecretKey::new("secret").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_array_from_json_takes_user_id_from_context() {
        let ids = IdContext::new().with("user_id", "7");
        let json = r#"{"sites":[{"site_id":"100","site_title":"A"},{"site_id":101}]}"#;
        let sites = Site::array_from_json(&client(), &ids, json).unwrap();

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].url(), "user/7/site/100");
        assert_eq!(sites[1].site_id(), "101");
        assert_eq!(sites[1].user_id(), "7");
        assert_eq!(
            sites[0].properties().and_then(|p| p.get("site_title")),
            Some(&json!("A"))
        );
        assert!(!sites[0].is_loaded());
    }

    #[test]
    fn test_array_from_json_requires_user_id() {
        let result = Site::array_from_json(&client(), &IdContext::new(), r#"{"sites":[]}"#);
        assert!(matches!(result, Err(ResourceError::MissingField { .. })));
    }

    #[test]
    fn test_child_handles_share_parent_ids() {
        let site = Site::new(&client(), "1", "2");
        assert_eq!(site.get_blog(3).url(), "user/1/site/2/blog/3");
        assert_eq!(site.get_form(4).url(), "user/1/site/2/form/4");
        assert_eq!(site.get_page(5).url(), "user/1/site/2/page/5");
        assert_eq!(site.get_group(6).url(), "user/1/site/2/group/6");
        assert_eq!(site.get_member(7).url(), "user/1/site/2/member/7");
        assert_eq!(site.get_store().url(), "user/1/site/2/store");
    }
}

//! Concrete Weebly Cloud resources.
//!
//! Each resource wraps a [`Resource`](crate::rest::Resource) and offers
//! three constructors:
//!
//! - `new(..)`: lazy; nothing is fetched until a property is needed
//! - `fetch(..)`: eager; fetches the properties before returning
//! - `from_properties(..)`: already hydrated from a listing or a create call
//!
//! and an `array_from_json` hydrator used by listings.
//!
//! # Resource Tree
//!
//! ```text
//! Account
//! ├── Plan
//! └── User
//!     └── Site
//!         ├── Blog ── BlogPost
//!         ├── Form ── FormEntry
//!         ├── Page
//!         ├── Group
//!         ├── Member
//!         └── Store ── Product
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::rest::resources::{Site, User};
//! use weebly_cloud::rest::{CloudResource, Deletable};
//!
//! let user = User::new(&client, "1234");
//! let mut site = user.create_site("example.com", None).await?;
//! site.publish().await?;
//!
//! let mut pages = site.list_pages(None).await?;
//! while let Some(page) = pages.advance().await? {
//!     println!("{}", page.page_id());
//! }
//!
//! site.delete().await?;
//! ```

mod account;
mod blog;
mod blog_post;
mod form;
mod form_entry;
mod group;
mod member;
mod page;
mod plan;
mod product;
mod site;
mod store;
mod user;

pub use account::Account;
pub use blog::Blog;
pub use blog_post::BlogPost;
pub use form::Form;
pub use form_entry::FormEntry;
pub use group::Group;
pub use member::Member;
pub use page::Page;
pub use plan::Plan;
pub use product::Product;
pub use site::Site;
pub use store::Store;
pub use user::User;

use serde_json::{Map, Value};

use crate::clients::{Params, PagedResponse};
use crate::rest::{PropertyEnvelope, ResourceError};

/// Decodes a listing page into its item objects.
///
/// With `key`, the items are read from that top-level field; otherwise the
/// whole body must be the array.
pub(crate) fn list_items(
    resource: &'static str,
    json: &str,
    key: Option<&'static str>,
) -> Result<Vec<Map<String, Value>>, ResourceError> {
    let mut value: Value = serde_json::from_str(json)?;

    if let Some(key) = key {
        value = match value {
            Value::Object(mut map) => map
                .remove(key)
                .ok_or_else(|| ResourceError::missing(resource, key))?,
            _ => {
                return Err(ResourceError::UnexpectedBody {
                    resource,
                    expected: "a JSON object",
                })
            }
        };
    }

    let Value::Array(items) = value else {
        return Err(ResourceError::UnexpectedBody {
            resource,
            expected: "a JSON array",
        });
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            _ => Err(ResourceError::UnexpectedBody {
                resource,
                expected: "an array of JSON objects",
            }),
        })
        .collect()
}

/// Reads an id field, accepting strings and numbers.
pub(crate) fn id_field(
    resource: &'static str,
    properties: &Map<String, Value>,
    field: &str,
) -> Result<String, ResourceError> {
    match properties.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ResourceError::missing(resource, field)),
    }
}

/// Decodes a response body into a property object, optionally under `key`.
pub(crate) fn object_body(
    resource: &'static str,
    response: &PagedResponse,
    key: Option<&'static str>,
) -> Result<Map<String, Value>, ResourceError> {
    let envelope = key.map_or(PropertyEnvelope::Whole, PropertyEnvelope::Key);
    envelope.extract(resource, &response.body)
}

/// Returns one top-level field of a response body.
pub(crate) fn body_field(
    resource: &'static str,
    response: &PagedResponse,
    field: &str,
) -> Result<Value, ResourceError> {
    response
        .json_field(field)?
        .ok_or_else(|| ResourceError::missing(resource, field))
}

/// Returns one top-level string field of a response body, e.g. a login link.
pub(crate) fn string_field(
    resource: &'static str,
    response: &PagedResponse,
    field: &str,
) -> Result<String, ResourceError> {
    match body_field(resource, response, field)? {
        Value::String(s) => Ok(s),
        _ => Err(ResourceError::UnexpectedBody {
            resource,
            expected: "a string field",
        }),
    }
}

/// Builds request parameters from fixed fields plus optional extra data.
///
/// Extra data is applied last, so it wins on conflicting keys.
pub(crate) fn merge_params(
    fields: impl IntoIterator<Item = (&'static str, Value)>,
    extra: Option<Params>,
) -> Params {
    let mut params: Params = fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    if let Some(extra) = extra {
        params.extend(extra);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_items_bare_array() {
        let items = list_items("Blog", r#"[{"blog_id":"1"},{"blog_id":"2"}]"#, None).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].get("blog_id"), Some(&json!("2")));
    }

    #[test]
    fn test_list_items_under_key() {
        let items = list_items("Site", r#"{"sites":[{"site_id":"9"}]}"#, Some("sites")).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_list_items_errors() {
        assert!(matches!(
            list_items("Site", r#"{"users":[]}"#, Some("sites")),
            Err(ResourceError::MissingField { .. })
        ));
        assert!(matches!(
            list_items("Blog", r#"{"blog_id":"1"}"#, None),
            Err(ResourceError::UnexpectedBody { .. })
        ));
        assert!(matches!(
            list_items("Blog", r#"[1,2]"#, None),
            Err(ResourceError::UnexpectedBody { .. })
        ));
    }

    #[test]
    fn test_id_field_accepts_strings_and_numbers() {
        let props = json!({"a": "12", "b": 34, "c": null});
        let props = props.as_object().unwrap();
        assert_eq!(id_field("T", props, "a").unwrap(), "12");
        assert_eq!(id_field("T", props, "b").unwrap(), "34");
        assert!(id_field("T", props, "c").is_err());
        assert!(id_field("T", props, "d").is_err());
    }

    #[test]
    fn test_merge_params_extra_wins() {
        let extra = json!({"domain": "override.com", "plan_id": 2});
        let params = merge_params(
            [("domain", json!("example.com"))],
            extra.as_object().cloned(),
        );
        assert_eq!(params.get("domain"), Some(&json!("override.com")));
        assert_eq!(params.get("plan_id"), Some(&json!(2)));
    }
}

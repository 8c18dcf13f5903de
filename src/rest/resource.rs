//! The property and mutation contract shared by every resource.
//!
//! A [`Resource`] is a URL plus an in-memory snapshot of the remote object's
//! properties. Concrete types (`Site`, `User`, ...) wrap one and expose it
//! through the [`CloudResource`] trait; types that can be edited or removed
//! also implement [`Mutable`] and [`Deletable`].
//!
//! # States
//!
//! ```text
//! unloaded --get()--> loaded --set_property()--> loaded + dirty --save()--> loaded
//! ```
//!
//! - [`CloudResource::get_property`] fetches only when the resource was never
//!   loaded and the property is absent from the snapshot.
//! - [`Mutable::set_property`] always records the edit, fetches first if the
//!   resource was never loaded, and mirrors the value into the snapshot only
//!   if the property already exists there.
//! - [`Mutable::save`] sends the pending edits as one PATCH and clears them
//!   on success; on failure they are kept so the save can be retried.
//! - [`Deletable::delete`] sends a DELETE and leaves the object untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::rest::resources::Site;
//! use weebly_cloud::rest::{CloudResource, Mutable};
//!
//! let mut site = Site::new(&client, "1234", "5678");
//! let title = site.get_property("site_title").await?; // one GET
//! site.set_property("site_title", "Renamed").await?;  // no request
//! site.save().await?;                                 // one PATCH
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::{PendingChanges, ResourceError};

/// Where a resource's properties live inside a response body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyEnvelope {
    /// The whole body is the property object.
    Whole,
    /// The properties are under a top-level key, e.g. `{"site": {...}}`.
    Key(&'static str),
    /// The properties are two levels down, e.g. `{"plans": {"4": {...}}}`.
    Nested {
        /// The top-level key.
        outer: &'static str,
        /// The key inside the outer object.
        inner: String,
    },
}

impl PropertyEnvelope {
    /// Extracts the property object from a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Json`] if the body is not JSON,
    /// [`ResourceError::MissingField`] if an envelope key is absent, and
    /// [`ResourceError::UnexpectedBody`] if the target is not an object.
    pub fn extract(
        &self,
        resource: &'static str,
        body: &str,
    ) -> Result<Map<String, Value>, ResourceError> {
        let value: Value = serde_json::from_str(body)?;

        let target = match self {
            Self::Whole => value,
            Self::Key(key) => take_field(resource, value, key)?,
            Self::Nested { outer, inner } => {
                let outer_value = take_field(resource, value, outer)?;
                take_field(resource, outer_value, inner)?
            }
        };

        match target {
            Value::Object(map) => Ok(map),
            _ => Err(ResourceError::UnexpectedBody {
                resource,
                expected: "a JSON object of properties",
            }),
        }
    }
}

fn take_field(resource: &'static str, value: Value, key: &str) -> Result<Value, ResourceError> {
    match value {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| ResourceError::missing(resource, key)),
        _ => Err(ResourceError::UnexpectedBody {
            resource,
            expected: "a JSON object",
        }),
    }
}

/// The state behind every concrete resource.
///
/// `properties` is `None` until the first fetch unless the resource was
/// built from already-known data. `loaded` only becomes `true` after a
/// successful fetch, so pre-hydrated resources still fetch once on their
/// first mutation.
#[derive(Clone, Debug)]
pub struct Resource {
    name: &'static str,
    client: RestClient,
    url: String,
    envelope: PropertyEnvelope,
    properties: Option<Map<String, Value>>,
    changes: PendingChanges,
    loaded: bool,
}

impl Resource {
    /// Creates an unloaded resource.
    #[must_use]
    pub fn new(
        name: &'static str,
        client: &RestClient,
        url: impl Into<String>,
        envelope: PropertyEnvelope,
    ) -> Self {
        Self {
            name,
            client: client.clone(),
            url: url.into(),
            envelope,
            properties: None,
            changes: PendingChanges::new(),
            loaded: false,
        }
    }

    /// Creates a resource whose properties are already known.
    #[must_use]
    pub fn with_properties(
        name: &'static str,
        client: &RestClient,
        url: impl Into<String>,
        envelope: PropertyEnvelope,
        properties: Map<String, Value>,
    ) -> Self {
        let mut resource = Self::new(name, client, url, envelope);
        resource.properties = Some(properties);
        resource
    }

    /// The resource type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The resource URL, relative to the API base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The client the resource talks through.
    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    /// Whether a fetch has succeeded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The current property snapshot, if any.
    #[must_use]
    pub const fn properties(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref()
    }

    /// The buffered edits.
    #[must_use]
    pub const fn pending_changes(&self) -> &PendingChanges {
        &self.changes
    }

    /// Fetches the properties, replacing the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the body does not
    /// match the envelope.
    pub async fn fetch(&mut self) -> Result<(), ResourceError> {
        tracing::debug!(resource = self.name, url = %self.url, "Fetching resource");
        let response = self.client.get(&self.url, None).await?;
        let properties = self.envelope.extract(self.name, &response.body)?;
        self.properties = Some(properties);
        self.loaded = true;
        Ok(())
    }

    /// Returns one property, fetching first if it is unknown and the
    /// resource was never loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails.
    pub async fn property(&mut self, name: &str) -> Result<Option<Value>, ResourceError> {
        if !self.loaded && self.lookup(name).is_none() {
            self.fetch().await?;
        }
        Ok(self.lookup(name).cloned())
    }

    /// Records an edit. Returns whether the snapshot was updated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the initial fetch fails. The edit stays
    /// recorded either way.
    pub async fn set(&mut self, name: &str, value: Value) -> Result<bool, ResourceError> {
        self.changes.record(name, value.clone());

        if !self.loaded {
            self.fetch().await?;
        }

        match self.properties.as_mut().and_then(|p| p.get_mut(name)) {
            Some(slot) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sends the buffered edits as one PATCH and clears them.
    ///
    /// Does nothing when no edit is pending.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails; the edits are kept.
    pub async fn save(&mut self) -> Result<(), ResourceError> {
        if !self.changes.is_dirty() {
            tracing::debug!(resource = self.name, url = %self.url, "Nothing to save");
            return Ok(());
        }

        tracing::debug!(
            resource = self.name,
            url = %self.url,
            fields = self.changes.as_params().len(),
            "Saving resource"
        );
        self.client
            .patch(&self.url, Some(self.changes.as_params().clone()))
            .await?;
        self.changes.mark_clean();
        Ok(())
    }

    /// Sends a DELETE for the resource URL.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn delete(&self) -> Result<(), ResourceError> {
        tracing::debug!(resource = self.name, url = %self.url, "Deleting resource");
        self.client.delete(&self.url, None).await?;
        Ok(())
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }
}

/// A remote object with lazily loaded properties.
///
/// Implementors only expose their [`Resource`]; every method has a default.
#[allow(async_fn_in_trait)]
pub trait CloudResource {
    /// Returns the underlying resource state.
    fn resource(&self) -> &Resource;

    /// Returns the underlying resource state mutably.
    fn resource_mut(&mut self) -> &mut Resource;

    /// The resource URL, relative to the API base URL.
    fn url(&self) -> &str {
        self.resource().url()
    }

    /// Whether a fetch has succeeded.
    fn is_loaded(&self) -> bool {
        self.resource().is_loaded()
    }

    /// The current property snapshot, without fetching.
    fn properties(&self) -> Option<&Map<String, Value>> {
        self.resource().properties()
    }

    /// Fetches the properties from the API, replacing the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn get(&mut self) -> Result<(), ResourceError> {
        self.resource_mut().fetch().await
    }

    /// Re-fetches the properties, discarding the current snapshot.
    ///
    /// Pending edits are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn refresh(&mut self) -> Result<(), ResourceError> {
        self.get().await
    }

    /// Returns a property, fetching first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a fetch was needed and failed.
    async fn get_property(&mut self, name: &str) -> Result<Option<Value>, ResourceError> {
        self.resource_mut().property(name).await
    }

    /// Returns a property decoded as `T`, fetching first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Json`] if the value does not decode as `T`.
    async fn property_as<T: DeserializeOwned>(
        &mut self,
        name: &str,
    ) -> Result<Option<T>, ResourceError> {
        match self.get_property(name).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

/// A resource whose properties can be edited and saved.
#[allow(async_fn_in_trait)]
pub trait Mutable: CloudResource {
    /// Records an edit; see [`Resource::set`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the initial fetch fails.
    async fn set_property(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<bool, ResourceError> {
        self.resource_mut().set(name, value.into()).await
    }

    /// Sends the pending edits as one PATCH.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn save(&mut self) -> Result<(), ResourceError> {
        self.resource_mut().save().await
    }

    /// The buffered edits.
    fn pending_changes(&self) -> &Map<String, Value> {
        self.resource().pending_changes().as_params()
    }

    /// Whether any edit is pending.
    fn is_dirty(&self) -> bool {
        self.resource().pending_changes().is_dirty()
    }
}

/// A resource that can be deleted.
#[allow(async_fn_in_trait)]
pub trait Deletable: CloudResource {
    /// Deletes the remote object. The local value is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    async fn delete(&self) -> Result<(), ResourceError> {
        self.resource().delete().await
    }
}

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

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_envelope_whole() {
        let props = PropertyEnvelope::Whole
            .extract("Blog", r#"{"blog_id":"1","title":"News"}"#)
            .unwrap();
        assert_eq!(props.get("title"), Some(&json!("News")));
    }

    #[test]
    fn test_envelope_key() {
        let props = PropertyEnvelope::Key("site")
            .extract("Site", r#"{"site":{"site_id":"9"}}"#)
            .unwrap();
        assert_eq!(props.get("site_id"), Some(&json!("9")));
    }

    #[test]
    fn test_envelope_nested() {
        let envelope = PropertyEnvelope::Nested {
            outer: "plans",
            inner: "4".to_string(),
        };
        let props = envelope
            .extract("Plan", r#"{"plans":{"4":{"name":"Pro"}}}"#)
            .unwrap();
        assert_eq!(props.get("name"), Some(&json!("Pro")));
    }

    #[test]
    fn test_envelope_errors() {
        assert!(matches!(
            PropertyEnvelope::Key("user").extract("User", r#"{"account":{}}"#),
            Err(ResourceError::MissingField { resource: "User", field }) if field == "user"
        ));
        assert!(matches!(
            PropertyEnvelope::Whole.extract("Blog", "[1,2]"),
            Err(ResourceError::UnexpectedBody { .. })
        ));
        assert!(matches!(
            PropertyEnvelope::Whole.extract("Blog", "not json"),
            Err(ResourceError::Json(_))
        ));
    }

    #[test]
    fn test_new_resource_is_unloaded() {
        let resource = Resource::new("Account", &client(), "account", PropertyEnvelope::Key("account"));
        assert_eq!(resource.name(), "Account");
        assert_eq!(resource.url(), "account");
        assert!(!resource.is_loaded());
        assert!(resource.properties().is_none());
        assert!(!resource.pending_changes().is_dirty());
    }

    #[tokio::test]
    async fn test_known_property_is_read_without_fetch() {
        // production base URL: a fetch here would fail the test
        let mut resource = Resource::with_properties(
            "Page",
            &client(),
            "user/1/site/2/page/3",
            PropertyEnvelope::Whole,
            object(json!({"title": "Home"})),
        );

        assert_eq!(resource.property("title").await.unwrap(), Some(json!("Home")));
        assert!(!resource.is_loaded());
    }

    #[tokio::test]
    async fn test_save_without_changes_sends_nothing() {
        let mut resource = Resource::new("Page", &client(), "user/1/site/2/page/3", PropertyEnvelope::Whole);
        resource.save().await.unwrap();
    }
}

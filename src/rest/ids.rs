//! Id contexts for nested resources.
//!
//! Every resource URL is built from the ids of the resource and its parents,
//! e.g. `user/{user_id}/site/{site_id}`. A listing hands those parent ids to
//! its hydrator so each child resource can rebuild its own URL.
//!
//! # Example
//!
//! ```rust
//! use weebly_cloud::rest::IdContext;
//!
//! let ids = IdContext::new().with("user_id", "12").with("site_id", "34");
//! assert_eq!(ids.get("site_id"), Some("34"));
//! assert!(ids.require("Site", "blog_id").is_err());
//! ```

use std::fmt::Display;

use crate::rest::ResourceError;

/// An ordered set of named ids.
///
/// Insertion order is preserved; inserting an existing name replaces its
/// value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdContext {
    entries: Vec<(String, String)>,
}

impl IdContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the context with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the id named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the id named `name`, or a [`ResourceError::MissingField`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the id is absent.
    pub fn require(&self, resource: &'static str, name: &str) -> Result<&str, ResourceError> {
        self.get(name)
            .ok_or_else(|| ResourceError::missing(resource, name))
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for IdContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ids = Self::new();
        for (k, v) in iter {
            ids.insert(k, v);
        }
        ids
    }
}

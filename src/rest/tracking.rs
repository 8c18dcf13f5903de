//! Pending-change tracking for partial updates.
//!
//! [`PendingChanges`] buffers field edits made through
//! [`Mutable::set_property`](crate::rest::Mutable::set_property) until they
//! are sent as a single PATCH by [`Mutable::save`](crate::rest::Mutable::save).
//!
//! # Example
//!
//! ```rust
//! use weebly_cloud::rest::PendingChanges;
//! use serde_json::json;
//!
//! let mut changes = PendingChanges::new();
//! assert!(!changes.is_dirty());
//!
//! changes.record("site_title", json!("Draft"));
//! changes.record("site_title", json!("Final"));
//! assert!(changes.is_dirty());
//! assert_eq!(changes.get("site_title"), Some(&json!("Final")));
//!
//! changes.mark_clean();
//! assert!(!changes.is_dirty());
//! ```

use serde_json::{Map, Value};

/// A buffer of uncommitted field edits.
///
/// Recording the same field twice keeps only the latest value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingChanges {
    changes: Map<String, Value>,
}

impl PendingChanges {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `field`.
    pub fn record(&mut self, field: impl Into<String>, value: Value) {
        self.changes.insert(field.into(), value);
    }

    /// Returns the pending value for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.changes.get(field)
    }

    /// Returns `true` if any edit is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Returns the pending edits as request parameters.
    #[must_use]
    pub const fn as_params(&self) -> &Map<String, Value> {
        &self.changes
    }

    /// Discards every pending edit.
    pub fn mark_clean(&mut self) {
        self.changes.clear();
    }
}

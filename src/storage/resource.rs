//! The Resource Record
//!
//! A resource is a named, categorized handle (a token, a lease, a one-time
//! link) that a producer publishes and a consumer fetches. The `payload` is the
//! handle itself; everything else is metadata that listings may disclose.
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "Category":    "tokens",
//!   "ID":          "abc",
//!   "Description": "login link for bob",
//!   "Resource":    "https://example.com/login?t=...",
//!   "Reusable":    false,
//!   "TTL":         300
//! }
//! ```
//!
//! Every field is optional on input and defaults to its zero value.

use crate::storage::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// Reserved character that may appear in neither a category nor an ID.
///
/// Keeping it out of both lets a flat key-value backend address a record
/// as `<category>.<id>` without ambiguity.
pub const SEPARATOR: char = '.';

/// A disposable resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// Namespace of the resource
    #[serde(rename = "Category", alias = "category")]
    pub category: String,

    /// Identifier, unique within its category
    #[serde(rename = "ID", alias = "id")]
    pub id: String,

    /// Free-text metadata
    #[serde(rename = "Description", alias = "description")]
    pub description: String,

    /// The handle itself. Never disclosed by listings.
    #[serde(rename = "Resource", alias = "resource")]
    pub payload: String,

    /// When false the resource is consumed by its first successful fetch
    #[serde(rename = "Reusable", alias = "reusable")]
    pub reusable: bool,

    /// Seconds to live. `<= 0` never expires. On reads this is the
    /// remaining lifetime, not the value originally supplied.
    #[serde(rename = "TTL", alias = "ttl")]
    pub ttl: i64,
}

impl Resource {
    /// Creates a reusable, never-expiring resource.
    pub fn new(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            id: id.into(),
            reusable: true,
            ..Default::default()
        }
    }

    /// Sets the human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the payload handed out by `get`.
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Sets the lifetime in seconds. Zero or less never expires.
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    /// Marks the resource as consumed by its first fetch.
    pub fn single_use(mut self) -> Self {
        self.reusable = false;
        self
    }

    /// Checks the naming rules for a resource about to be stored.
    ///
    /// Missing fields are reported before illegal ones, category before ID.
    pub fn validate(&self) -> Result<()> {
        if self.category.is_empty() {
            return Err(StoreError::UndefinedCategory);
        }
        if self.id.is_empty() {
            return Err(StoreError::UndefinedId);
        }
        if self.category.contains(SEPARATOR) {
            return Err(StoreError::IllegalCategory);
        }
        if self.id.contains(SEPARATOR) {
            return Err(StoreError::IllegalId);
        }
        Ok(())
    }

    /// Returns a copy that is safe to list: the payload is blanked.
    pub fn redacted(&self) -> Self {
        Self {
            payload: String::new(),
            ..self.clone()
        }
    }
}

//! The Storage Contract
//!
//! The operation set that a transport (or a test harness) uses to talk to a
//! store. Nothing outside the storage module reaches into repository
//! internals; everything goes through this trait.

use crate::storage::error::Result;
use crate::storage::resource::Resource;
use std::collections::BTreeMap;

/// Records of one category, keyed by ID.
pub type Listing = BTreeMap<String, Resource>;

/// Number of records per category.
pub type CategoryCounts = BTreeMap<String, usize>;

/// A store of disposable resources.
pub trait Storage: Send + Sync {
    /// Inserts or overwrites a resource.
    fn add(&self, resource: Resource) -> Result<()>;

    /// Fetches a resource with its payload and remaining TTL.
    ///
    /// A single-use resource is removed by this call.
    fn get(&self, category: &str, id: &str) -> Result<Resource>;

    /// Lists the live resources of a category with payloads blanked.
    fn list(&self, category: &str) -> Result<Listing>;

    /// Removes a resource and returns it.
    fn delete(&self, category: &str, id: &str) -> Result<Resource>;

    /// Counts the resources held in each category.
    fn categories(&self) -> Result<CategoryCounts>;

    /// Discards everything, then reports health.
    fn reset(&self) -> Result<()>;

    fn health_check(&self) -> Result<()>;
}

//! A scripted [`Storage`] for testing transports without a live repository.
//!
//! Every call is counted per method and its arguments remembered. Results are
//! whatever the test put in beforehand; a scripted error wins over any value.

use crate::storage::contract::{CategoryCounts, Listing, Storage};
use crate::storage::error::{Result, StoreError};
use crate::storage::resource::Resource;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MockState {
    error: Option<StoreError>,
    method_errors: HashMap<&'static str, StoreError>,
    categories: CategoryCounts,
    listing: Listing,
    resource: Resource,

    calls: HashMap<&'static str, usize>,
    category: String,
    id: String,
    added: Vec<Resource>,
}

#[derive(Debug, Default)]
pub struct MockStorage {
    state: Mutex<MockState>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, method: &'static str) -> MutexGuard<'_, MockState> {
        let mut state = self.state();
        *state.calls.entry(method).or_insert(0) += 1;
        state
    }

    fn outcome<T>(state: &MockState, method: &str, value: T) -> Result<T> {
        match state.method_errors.get(method).copied().or(state.error) {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }

    /// Makes every method fail with `error`.
    pub fn set_error(&self, error: StoreError) {
        self.state().error = Some(error);
    }

    /// Makes only `method` fail with `error`.
    pub fn set_error_for(&self, method: &'static str, error: StoreError) {
        self.state().method_errors.insert(method, error);
    }

    pub fn set_categories(&self, categories: CategoryCounts) {
        self.state().categories = categories;
    }

    pub fn set_listing(&self, listing: Listing) {
        self.state().listing = listing;
    }

    pub fn set_resource(&self, resource: Resource) {
        self.state().resource = resource;
    }

    /// Number of times `method` was called.
    pub fn calls(&self, method: &str) -> usize {
        self.state().calls.get(method).copied().unwrap_or(0)
    }

    pub fn last_category(&self) -> String {
        self.state().category.clone()
    }

    pub fn last_id(&self) -> String {
        self.state().id.clone()
    }

    /// Every resource passed to `add`, in call order.
    pub fn added(&self) -> Vec<Resource> {
        self.state().added.clone()
    }
}

impl Storage for MockStorage {
    fn add(&self, resource: Resource) -> Result<()> {
        let mut state = self.record("add");
        state.added.push(resource);
        Self::outcome(&state, "add", ())
    }

    fn get(&self, category: &str, id: &str) -> Result<Resource> {
        let mut state = self.record("get");
        state.category = category.to_string();
        state.id = id.to_string();
        Self::outcome(&state, "get", state.resource.clone())
    }

    fn list(&self, category: &str) -> Result<Listing> {
        let mut state = self.record("list");
        state.category = category.to_string();
        Self::outcome(&state, "list", state.listing.clone())
    }

    fn delete(&self, category: &str, id: &str) -> Result<Resource> {
        let mut state = self.record("delete");
        state.category = category.to_string();
        state.id = id.to_string();
        Self::outcome(&state, "delete", state.resource.clone())
    }

    fn categories(&self) -> Result<CategoryCounts> {
        let state = self.record("categories");
        Self::outcome(&state, "categories", state.categories.clone())
    }

    fn reset(&self) -> Result<()> {
        let state = self.record("reset");
        Self::outcome(&state, "reset", ())
    }

    fn health_check(&self) -> Result<()> {
        let state = self.record("health_check");
        Self::outcome(&state, "health_check", ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_and_arguments() {
        let mock = MockStorage::new();
        mock.set_resource(Resource::new("a", "b"));

        assert_eq!(mock.get("a", "b"), Ok(Resource::new("a", "b")));
        mock.get("c", "d").unwrap();
        mock.add(Resource::new("x", "y")).unwrap();

        assert_eq!(mock.calls("get"), 2);
        assert_eq!(mock.calls("add"), 1);
        assert_eq!(mock.calls("list"), 0);
        assert_eq!(mock.last_category(), "c");
        assert_eq!(mock.last_id(), "d");
        assert_eq!(mock.added(), vec![Resource::new("x", "y")]);
    }

    #[test]
    fn test_scripted_error_wins() {
        let mock = MockStorage::new();
        mock.set_listing(Listing::new());
        mock.set_error(StoreError::EmptyList);

        assert_eq!(mock.list("a"), Err(StoreError::EmptyList));
        assert_eq!(mock.health_check(), Err(StoreError::EmptyList));
    }

    #[test]
    fn test_method_error_only_hits_that_method() {
        let mock = MockStorage::new();
        mock.set_error_for("delete", StoreError::ResourceNotFound);

        assert_eq!(mock.list("a"), Ok(Listing::new()));
        assert_eq!(mock.delete("a", "b"), Err(StoreError::ResourceNotFound));
    }
}

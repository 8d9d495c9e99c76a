//! The Repository
//!
//! Holds every stored resource in a nested mapping, category → ID → record,
//! behind one reader/writer lock.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Repository                         │
//! │                                                          │
//! │   RwLock<HashMap<category, HashMap<id, StoredResource>>> │
//! │                                                          │
//! │   write: add, get, list, delete, reset,                  │
//! │          categories (sweep mode)                         │
//! │   read:  categories (lazy mode), health_check            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `get` and `list` look like reads but may purge stale records, consume
//! single-use ones and write back the remaining TTL, so they take the write
//! lock. Operations on the same category are totally ordered by lock
//! acquisition; nothing calls back into the repository while holding it.
//!
//! ## Poisoning
//!
//! No operation can panic half-way through a mutation, so a poisoned guard is
//! recovered and used as is. The poison flag itself is kept as the "torn down"
//! signal reported by [`health_check`](Storage::health_check) until
//! [`reset`](Storage::reset) rebuilds the mapping.

use crate::storage::clock::{Clock, SystemClock};
use crate::storage::contract::{CategoryCounts, Listing, Storage};
use crate::storage::error::{Result, StoreError};
use crate::storage::expiry::{CountMode, Expiry};
use crate::storage::resource::Resource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// A resource together with the instant it goes stale.
#[derive(Debug, Clone)]
struct StoredResource {
    resource: Resource,
    expiry: Expiry,
}

/// The records of one category, keyed by ID.
type Bucket = HashMap<String, StoredResource>;

/// An in-memory store of disposable resources.
///
/// Designed to be wrapped in an `Arc` and shared across request handlers.
/// Each repository is independent; several can live in one process.
///
/// # Example
///
/// ```
/// use dispokv::storage::{Repository, Resource, Storage, StoreError};
///
/// let repo = Repository::new();
/// repo.add(Resource::new("links", "abc").with_payload("https://example.com/x").single_use())
///     .unwrap();
///
/// // The listing shows the link without its content
/// let listing = repo.list("links").unwrap();
/// assert_eq!(listing["abc"].payload, "");
///
/// // The first fetch consumes it
/// assert_eq!(repo.get("links", "abc").unwrap().payload, "https://example.com/x");
/// assert_eq!(repo.get("links", "abc"), Err(StoreError::ResourceNotFound));
/// ```
pub struct Repository {
    /// category → ID → record. A category exists only while it holds records.
    resources: RwLock<HashMap<String, Bucket>>,

    /// Time source for expiry
    clock: Arc<dyn Clock>,

    /// How `categories` treats unpurged stale records
    count_mode: CountMode,

    /// Statistics: successful adds
    add_count: AtomicU64,

    /// Statistics: successful fetches
    get_count: AtomicU64,

    /// Statistics: single-use records consumed by a fetch
    consumed_count: AtomicU64,

    /// Statistics: stale records purged
    expired_count: AtomicU64,

    /// Statistics: successful deletes
    del_count: AtomicU64,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("categories", &self.read().len())
            .field("count_mode", &self.count_mode)
            .field("add_count", &self.add_count.load(Ordering::Relaxed))
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    /// Creates an empty repository on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty repository reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
            clock,
            count_mode: CountMode::default(),
            add_count: AtomicU64::new(0),
            get_count: AtomicU64::new(0),
            consumed_count: AtomicU64::new(0),
            expired_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
        }
    }

    /// Sets how `categories` counts records.
    pub fn with_count_mode(mut self, count_mode: CountMode) -> Self {
        self.count_mode = count_mode;
        self
    }

    /// How `categories` counts records.
    pub fn count_mode(&self) -> CountMode {
        self.count_mode
    }

    /// Returns the number of stored records, stale ones included.
    pub fn len(&self) -> usize {
        self.read().values().map(HashMap::len).sum()
    }

    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns operation statistics.
    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            added: self.add_count.load(Ordering::Relaxed),
            fetched: self.get_count.load(Ordering::Relaxed),
            consumed: self.consumed_count.load(Ordering::Relaxed),
            expired: self.expired_count.load(Ordering::Relaxed),
            deleted: self.del_count.load(Ordering::Relaxed),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Bucket>> {
        self.resources.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Bucket>> {
        self.resources.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes every stale record from `bucket`, returning how many went.
    fn purge_stale(bucket: &mut Bucket, now: i64) -> u64 {
        let before = bucket.len();
        bucket.retain(|_, stored| !stored.expiry.is_stale(now));
        (before - bucket.len()) as u64
    }

    /// Drops the bucket for `category` once it has no records left.
    fn drop_if_empty(resources: &mut HashMap<String, Bucket>, category: &str) {
        if resources.get(category).is_some_and(HashMap::is_empty) {
            resources.remove(category);
        }
    }

    fn record_expired(&self, count: u64) {
        if count > 0 {
            self.expired_count.fetch_add(count, Ordering::Relaxed);
        }
    }
}

impl Storage for Repository {
    fn add(&self, resource: Resource) -> Result<()> {
        resource.validate()?;

        let mut resources = self.write();
        let expiry = Expiry::from_ttl(resource.ttl, self.clock.now());

        debug!(
            category = %resource.category,
            id = %resource.id,
            ttl = resource.ttl,
            reusable = resource.reusable,
            "Resource added"
        );

        resources
            .entry(resource.category.clone())
            .or_default()
            .insert(resource.id.clone(), StoredResource { resource, expiry });

        self.add_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn get(&self, category: &str, id: &str) -> Result<Resource> {
        let mut resources = self.write();
        let now = self.clock.now();

        let bucket = resources
            .get_mut(category)
            .ok_or(StoreError::ResourceNotFound)?;
        let stored = bucket.get_mut(id).ok_or(StoreError::ResourceNotFound)?;

        if stored.expiry.is_stale(now) {
            bucket.remove(id);
            Self::drop_if_empty(&mut resources, category);
            self.record_expired(1);
            debug!(category, id, "Stale resource purged on fetch");
            return Err(StoreError::ResourceNotFound);
        }

        stored.resource.ttl = stored.expiry.remaining(now);

        let resource = if stored.resource.reusable {
            stored.resource.clone()
        } else {
            let consumed = bucket
                .remove(id)
                .map(|stored| stored.resource)
                .ok_or(StoreError::ResourceNotFound)?;
            Self::drop_if_empty(&mut resources, category);
            self.consumed_count.fetch_add(1, Ordering::Relaxed);
            debug!(category, id, "Single-use resource consumed");
            consumed
        };

        self.get_count.fetch_add(1, Ordering::Relaxed);
        Ok(resource)
    }

    fn list(&self, category: &str) -> Result<Listing> {
        let mut resources = self.write();
        let now = self.clock.now();

        let bucket = resources
            .get_mut(category)
            .ok_or(StoreError::ResourceNotFound)?;

        let purged = Self::purge_stale(bucket, now);
        self.record_expired(purged);
        if purged > 0 {
            debug!(category, purged, "Stale resources purged on list");
        }

        if bucket.is_empty() {
            resources.remove(category);
            return Err(StoreError::EmptyList);
        }

        let listing = bucket
            .iter_mut()
            .map(|(id, stored)| {
                stored.resource.ttl = stored.expiry.remaining(now);
                (id.clone(), stored.resource.redacted())
            })
            .collect();

        Ok(listing)
    }

    fn delete(&self, category: &str, id: &str) -> Result<Resource> {
        let mut resources = self.write();
        let now = self.clock.now();

        let bucket = resources
            .get_mut(category)
            .ok_or(StoreError::ResourceNotFound)?;
        let mut stored = bucket.remove(id).ok_or(StoreError::ResourceNotFound)?;
        Self::drop_if_empty(&mut resources, category);

        // An expired record is gone either way, but was never the caller's to delete
        if stored.expiry.is_stale(now) {
            self.record_expired(1);
            debug!(category, id, "Stale resource purged on delete");
            return Err(StoreError::ResourceNotFound);
        }

        stored.resource.ttl = stored.expiry.remaining(now);
        self.del_count.fetch_add(1, Ordering::Relaxed);
        debug!(category, id, "Resource deleted");

        Ok(stored.resource)
    }

    fn categories(&self) -> Result<CategoryCounts> {
        let counts: CategoryCounts = match self.count_mode {
            CountMode::Lazy => self
                .read()
                .iter()
                .map(|(category, bucket)| (category.clone(), bucket.len()))
                .collect(),
            CountMode::Sweep => {
                let mut resources = self.write();
                let now = self.clock.now();

                let mut purged = 0;
                for bucket in resources.values_mut() {
                    purged += Self::purge_stale(bucket, now);
                }
                resources.retain(|_, bucket| !bucket.is_empty());
                self.record_expired(purged);

                resources
                    .iter()
                    .map(|(category, bucket)| (category.clone(), bucket.len()))
                    .collect()
            }
        };

        if counts.is_empty() {
            return Err(StoreError::EmptyStorage);
        }

        Ok(counts)
    }

    fn reset(&self) -> Result<()> {
        *self.write() = HashMap::new();
        self.resources.clear_poison();

        info!("Storage reset");
        self.health_check()
    }

    fn health_check(&self) -> Result<()> {
        if self.resources.is_poisoned() {
            return Err(StoreError::Unhealthy);
        }
        Ok(())
    }
}

/// Repository statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryStats {
    /// Successful adds
    pub added: u64,
    /// Successful fetches
    pub fetched: u64,
    /// Single-use records consumed by a fetch
    pub consumed: u64,
    /// Stale records purged
    pub expired: u64,
    /// Successful deletes
    pub deleted: u64,
}

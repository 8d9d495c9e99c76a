//! Storage Module
//!
//! This module provides the core storage functionality for DispoKV: a
//! thread-safe, in-memory registry of categorized resources that can expire
//! after a time-to-live and/or be consumed by their first fetch.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Storage (trait, the contract)               │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ implemented by
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Repository                           │
//! │   RwLock ─ category ─┬─ id ─ { Resource, Expiry }           │
//! │                      └─ id ─ { Resource, Expiry }           │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ asks
//!                                ▼
//!                          Clock (seconds)
//! ```
//!
//! ## Features
//!
//! - **Namespacing**: IDs are unique within a category
//! - **TTL Support**: Records go stale after their time-to-live
//! - **Lazy Expiry**: Stale records are purged when their category is touched
//! - **Single Use**: Non-reusable records are deleted by their first fetch
//! - **Substitutable Clock**: Deterministic expiry in tests
//!
//! ## Example
//!
//! ```
//! use dispokv::storage::{ManualClock, Repository, Resource, Storage};
//! use std::sync::Arc;
//!
//! let clock = ManualClock::new(0);
//! let repo = Repository::with_clock(Arc::new(clock.clone()));
//!
//! repo.add(Resource::new("leases", "l1").with_ttl(5)).unwrap();
//!
//! clock.advance(2);
//! assert_eq!(repo.get("leases", "l1").unwrap().ttl, 3);
//! ```

pub mod clock;
pub mod contract;
pub mod error;
pub mod expiry;
#[cfg(test)]
pub(crate) mod mock;
pub mod repository;
pub mod resource;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use contract::{CategoryCounts, Listing, Storage};
pub use error::{Result, StoreError};
pub use expiry::{CountMode, Expiry};
pub use repository::{Repository, RepositoryStats};
pub use resource::{Resource, SEPARATOR};

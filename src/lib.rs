//! # DispoKV - A Store for Disposable Resources
//!
//! DispoKV is a concurrency-safe, in-memory registry of named, categorized
//! resources. Producers publish short-lived handles (tokens, leases, one-time
//! links); consumers retrieve them and, depending on policy, permanently
//! remove them.
//!
//! ## Features
//!
//! - **Namespaced**: Resources live under a category, IDs are unique per category
//! - **TTL Support**: Resources can expire after a number of seconds
//! - **Single Use**: A non-reusable resource is delivered to exactly one fetch
//! - **Private Listings**: Listings never disclose a resource's payload
//! - **REST API**: Served over HTTP with axum on Tokio
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                               DispoKV                                   │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│   Router    │───>│  Handlers   │                  │
//! │  │ (axum)      │    │ (routes.rs) │    │             │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │ Storage trait           │
//! │                                               ▼                         │
//! │                     ┌──────────────────────────────────────────────┐    │
//! │                     │                 Repository                   │    │
//! │                     │   RwLock<category → id → {resource, expiry}> │    │
//! │                     └──────────────────────┬───────────────────────┘    │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                                      Clock (seconds)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use dispokv::api;
//! use dispokv::storage::Repository;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = Arc::new(Repository::new());
//!     let app = api::router(store, "/");
//!
//!     let listener = TcpListener::bind("127.0.0.1:8088").await?;
//!     api::serve(listener, app, std::future::pending()).await
//! }
//! ```
//!
//! ## REST API
//!
//! - `GET /api/resources` - count of resources per category
//! - `DELETE /api/resources` - discard everything
//! - `GET /api/resources/<category>` - list a category, payloads blanked
//! - `DELETE /api/resources/<category>` - delete a category
//! - `POST /api/resources/<category>` - upsert a map of ID → resource
//! - `GET /api/resources/<category>/<id>` - fetch (and maybe consume) a resource
//! - `DELETE /api/resources/<category>/<id>` - delete a resource
//! - `POST /api/resources/<category>/<id>` - upsert a resource
//! - `GET /api/healthcheck` - `{"status":"ok"}`
//!
//! ## Module Overview
//!
//! - [`storage`]: The repository, its contract, expiry policy and clock
//! - [`api`]: HTTP transport over the storage contract
//! - [`config`]: Server configuration
//!
//! ## Design Highlights
//!
//! ### Lazy Expiry
//!
//! There is no background sweeper. A stale resource is purged the next time
//! an operation touches its category, and is never returned once stale.
//!
//! ### One Lock
//!
//! A single reader/writer lock guards the whole mapping. Fetches and listings
//! take it exclusively because they may purge, consume or rewrite records.

pub mod api;
pub mod config;
pub mod storage;

// Re-export commonly used types for convenience
pub use api::{router, ApiError};
pub use config::Config;
pub use storage::{Repository, Resource, Storage, StoreError};

/// The default port DispoKV listens on
pub const DEFAULT_PORT: u16 = 8088;

/// The default host DispoKV binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of DispoKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

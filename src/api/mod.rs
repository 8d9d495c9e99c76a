//! HTTP API Module
//!
//! This module exposes a [`Storage`](crate::storage::Storage) over a REST-style
//! HTTP interface. It is a thin translation layer: it maps verbs and URL
//! segments onto storage operations, encodes results as JSON and turns every
//! error into a status code plus its text.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TCP Listener (main.rs)                   │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ axum::serve
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Router (routes.rs)  ──>  Handlers (handlers.rs)            │
//! │                                │                            │
//! │                                ▼                            │
//! │                     Arc<dyn Storage>                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use dispokv::api;
//! use dispokv::storage::Repository;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! let app = api::router(Arc::new(Repository::new()), "/");
//! let listener = TcpListener::bind("127.0.0.1:8088").await?;
//! api::serve(listener, app, std::future::pending()).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use error::ApiError;
pub use handlers::SharedStorage;
pub use routes::{api_root, router};

use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// Serves `app` on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "HTTP server listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

//! Request handlers.
//!
//! Each handler translates one HTTP operation into calls on the [`Storage`]
//! contract and never touches repository internals.
//!
//! | Operation                    | Storage call              |
//! |------------------------------|---------------------------|
//! | `DELETE /resources`          | `reset`                   |
//! | `GET /resources`             | `categories`              |
//! | `GET /resources/c`           | `list`                    |
//! | `DELETE /resources/c`        | `list`, then `delete` × n |
//! | `POST /resources/c`          | `add` × n                 |
//! | `GET /resources/c/i`         | `get`                     |
//! | `DELETE /resources/c/i`      | `delete`                  |
//! | `POST /resources/c/i`        | `add`                     |
//! | `GET /healthcheck`           | `health_check`            |
//!
//! Upserts accept `POST`, `PUT` and the `UPDATE` extension method. Bodies are
//! read raw and decoded as JSON whatever their content type.

use crate::api::error::ApiError;
use crate::storage::{CategoryCounts, Listing, Resource, Storage};
use axum::extract::{Path, State};
use axum::http::Method;
use axum::Json;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// The store shared by every handler.
pub type SharedStorage = Arc<dyn Storage>;

/// Name of the extension method accepted for upserts.
const UPDATE: &str = "UPDATE";

fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Refuses a record whose category or ID disagrees with where it was sent.
fn check_target(resource: &Resource, category: &str, id: &str) -> Result<(), ApiError> {
    if resource.category != category {
        return Err(ApiError::CategoryMismatch(resource.category.clone()));
    }
    if resource.id != id {
        return Err(ApiError::IdConflict {
            body: resource.id.clone(),
            url: id.to_string(),
        });
    }
    Ok(())
}

/// Drops every category.
pub async fn delete_all(State(store): State<SharedStorage>) -> Result<(), ApiError> {
    store.reset()?;
    Ok(())
}

/// Returns the number of records in each category.
pub async fn get_all(State(store): State<SharedStorage>) -> Result<Json<CategoryCounts>, ApiError> {
    Ok(Json(store.categories()?))
}

/// Lists a category with payloads blanked.
pub async fn get_category(
    State(store): State<SharedStorage>,
    Path(category): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    Ok(Json(store.list(&category)?))
}

/// Deletes every live resource in a category, stopping at the first failure.
pub async fn delete_category(
    State(store): State<SharedStorage>,
    Path(category): Path<String>,
) -> Result<(), ApiError> {
    let listing = store.list(&category)?;
    for id in listing.keys() {
        store.delete(&category, id)?;
    }

    debug!(category = %category, count = listing.len(), "Category deleted");
    Ok(())
}

/// Upserts a map of ID → resource into a category.
///
/// Every record is checked against the URL and the naming rules before any
/// of them is added.
pub async fn post_category(
    State(store): State<SharedStorage>,
    Path(category): Path<String>,
    body: Bytes,
) -> Result<(), ApiError> {
    let records: BTreeMap<String, Resource> = decode(&body)?;

    for (id, resource) in &records {
        check_target(resource, &category, id)?;
        resource.validate()?;
    }

    let count = records.len();
    for resource in records.into_values() {
        store.add(resource)?;
    }

    debug!(category = %category, count, "Category upserted");
    Ok(())
}

/// Routes the `UPDATE` method to [`post_category`].
pub async fn update_category(
    method: Method,
    state: State<SharedStorage>,
    path: Path<String>,
    body: Bytes,
) -> Result<(), ApiError> {
    if method.as_str() != UPDATE {
        return Err(ApiError::MethodNotAllowed);
    }
    post_category(state, path, body).await
}

/// Fetches one resource with its payload, consuming it if single-use.
pub async fn get_id(
    State(store): State<SharedStorage>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(store.get(&category, &id)?))
}

/// Deletes one resource. The payload is not echoed back.
pub async fn delete_id(
    State(store): State<SharedStorage>,
    Path((category, id)): Path<(String, String)>,
) -> Result<(), ApiError> {
    store.delete(&category, &id)?;
    Ok(())
}

/// Upserts one resource at its own URL.
pub async fn post_id(
    State(store): State<SharedStorage>,
    Path((category, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<(), ApiError> {
    let resource: Resource = decode(&body)?;
    check_target(&resource, &category, &id)?;
    resource.validate()?;
    store.add(resource)?;
    Ok(())
}

/// Routes the `UPDATE` method to [`post_id`].
pub async fn update_id(
    method: Method,
    state: State<SharedStorage>,
    path: Path<(String, String)>,
    body: Bytes,
) -> Result<(), ApiError> {
    if method.as_str() != UPDATE {
        return Err(ApiError::MethodNotAllowed);
    }
    post_id(state, path, body).await
}

/// Reports whether the store is usable.
pub async fn healthcheck(State(store): State<SharedStorage>) -> Result<Json<Value>, ApiError> {
    store.health_check()?;
    Ok(Json(json!({ "status": "ok" })))
}

/// Fallback for paths outside the API.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

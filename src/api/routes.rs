//! URL layout of the REST API.
//!
//! ```text
//! DELETE, GET, POST, PUT, UPDATE   {root}/resources/<category>/<id>
//! DELETE, GET, POST, PUT, UPDATE   {root}/resources/<category>
//! DELETE, GET                      {root}/resources
//! GET                              {root}/healthcheck
//! ```
//!
//! `{root}` is the configured prefix followed by `/api`. Anything else under
//! it, and the root itself, answers 404.

use crate::api::handlers::{self, SharedStorage};
use axum::routing::{any, get};
use axum::Router;

/// Builds the API root path for a URL prefix.
///
/// Leading and trailing slashes on the prefix are ignored, so `""`, `"/"`
/// and `"//"` all give `/api`, and `"dr/"` gives `/dr/api`.
pub fn api_root(prefix: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        "/api".to_string()
    } else {
        format!("/{}/api", prefix)
    }
}

/// Builds the router serving `store` under `prefix`.
pub fn router(store: SharedStorage, prefix: &str) -> Router {
    let root = api_root(prefix);
    let resources = format!("{}/resources", root);

    Router::new()
        .route(&root, any(handlers::not_found))
        .route(
            &resources,
            get(handlers::get_all).delete(handlers::delete_all),
        )
        .route(
            &format!("{}/:category", resources),
            get(handlers::get_category)
                .delete(handlers::delete_category)
                .post(handlers::post_category)
                .put(handlers::post_category)
                .fallback(handlers::update_category),
        )
        .route(
            &format!("{}/:category/:id", resources),
            get(handlers::get_id)
                .delete(handlers::delete_id)
                .post(handlers::post_id)
                .put(handlers::post_id)
                .fallback(handlers::update_id),
        )
        .route(&format!("{}/healthcheck", root), get(handlers::healthcheck))
        .fallback(handlers::not_found)
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root() {
        assert_eq!(api_root(""), "/api");
        assert_eq!(api_root("/"), "/api");
        assert_eq!(api_root("//"), "/api");
        assert_eq!(api_root("dr"), "/dr/api");
        assert_eq!(api_root("/dr/"), "/dr/api");
        assert_eq!(api_root("/a/b"), "/a/b/api");
    }
}

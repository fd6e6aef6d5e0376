//! Route definitions for the bookmark API
//!
//! This module assembles the Axum router: the six bookmark actions (also
//! mirrored under the `/bookmarks/action` prefix), the auth and
//! content-type middleware, the unauthenticated health endpoint, and the
//! fixed 405 body for wrong-method requests.

use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::Router;

use axum::middleware;

use crate::database::AppState;
use crate::error::ERROR_MESSAGE;
use crate::handler::{
    create_bookmark, list_bookmarks, remove_bookmark, search_bookmarks, show_bookmark,
    update_bookmark,
};
use crate::middleware::{enforce_json_content_type, require_api_key};

/// Creates and configures the application router
///
/// # Route Definitions
///
/// - `GET /show/{id}` - read a bookmark by id
/// - `POST /create` - create a bookmark
/// - `PUT /update/{id}` - replace a bookmark's title/link/tag
/// - `DELETE /remove/{id}` - delete a bookmark
/// - `GET /list?page=N` - id-window page of bookmarks
/// - `POST /search?page=N` - full-text search
/// - `GET /app/health` - liveness heartbeat (no API key required)
///
/// All bookmark routes are additionally mounted under `/bookmarks/action`
/// and sit behind the API-key and JSON content-type middleware.
pub fn create_app(state: AppState) -> Router {
    let actions = Router::new()
        .route("/show/{id}", get(show_bookmark))
        .route("/create", post(create_bookmark))
        .route("/update/{id}", put(update_bookmark))
        .route("/remove/{id}", delete(remove_bookmark))
        .route("/list", get(list_bookmarks))
        .route("/search", post(search_bookmarks));

    Router::new()
        .merge(actions.clone())
        // Legacy prefix, serving the same handlers
        .nest("/bookmarks/action", actions)
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(middleware::from_fn(enforce_json_content_type))
        // Registered after the layers so the heartbeat needs no API key
        .route("/app/health", get(health))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

/// Liveness heartbeat
async fn health() -> &'static str {
    "."
}

/// Fixed body for wrong-method requests on matched paths
async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, ERROR_MESSAGE)
}

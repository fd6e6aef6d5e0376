//! HTTP request handlers for the bookmark API
//!
//! This module implements the business logic for:
//! - Creating bookmarks with duplicate detection and title enrichment
//! - Reading, updating and deleting bookmarks by id
//! - Listing bookmarks in fixed-size id windows
//! - Full-text searching with prefix-matched, OR-combined tokens
//!
//! Every handler returns `Result<_, ApiError>`; status-code mapping lives in
//! `error.rs`.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::database::{self, AppState};
use crate::error::{ApiError, DELETE_MESSAGE};
use crate::model::{Bookmark, BookmarkData, PageParams, SearchQuery};

/// Uppercases title and tag text before storage
fn format_text(text: &str) -> String {
    text.to_uppercase()
}

/// Builds the tsquery pattern for full-text search
///
/// Tokens are uppercased, suffixed with the `:*` prefix-match marker and
/// OR-joined, so a multi-word query matches any token as a prefix:
/// `"foo bar"` becomes `FOO:* | BAR:*`.
fn build_search_pattern(query: &str) -> String {
    query
        .split_whitespace()
        .map(|token| format!("{}:*", format_text(token)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Parses a path id, rejecting anything that is not an integer
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| {
        debug!(id = raw, "invalid bookmark id");
        ApiError::BadRequest
    })
}

/// Validates the submitted link and resolves the effective title
///
/// Shared by create and update (their validation contract is identical):
/// 1. The link must be non-empty and answer a HEAD request with a status
///    below 400.
/// 2. No stored bookmark may carry the same link.
/// 3. An empty title is replaced by the target page's `<title>` text; a
///    failed fetch rejects the request.
async fn validate_and_enrich(
    state: &AppState,
    data: &BookmarkData,
) -> Result<String, ApiError> {
    if data.link.is_empty() || !state.probe.validate_link(&data.link).await {
        debug!(link = %data.link, "link rejected");
        return Err(ApiError::BadRequest);
    }

    // Existence check and the later insert/update are separate statements:
    // two concurrent requests for the same link can both pass this check.
    if database::link_exists(&state.db, &data.link).await? {
        return Err(ApiError::Duplicate);
    }

    if data.title.is_empty() {
        let title = state.probe.fetch_title(&data.link).await.map_err(|err| {
            debug!(link = %data.link, error = %err, "title fetch failed");
            ApiError::BadRequest
        })?;
        Ok(title)
    } else {
        Ok(data.title.clone())
    }
}

/// Creates a new bookmark
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Example Domain",  // optional, fetched from the page if empty
///   "link": "https://example.com",
///   "tag": "reference"          // optional
/// }
/// ```
///
/// # Response
///
/// - **200 OK** - stored bookmark with server-assigned id and timestamp
/// - **400 Bad Request** - undecodable body, empty/unreachable link, or
///   failed title fetch
/// - **409 Conflict** - a bookmark with this link already exists
/// - **500 Internal Server Error** - insert failed
pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<BookmarkData>, JsonRejection>,
) -> Result<Json<Bookmark>, ApiError> {
    let Json(data) = payload.map_err(|_| ApiError::BadRequest)?;
    let title = validate_and_enrich(&state, &data).await?;

    let stored = database::insert(
        &state.db,
        &format_text(&title),
        &data.link,
        &format_text(&data.tag),
    )
    .await?;

    Ok(Json(stored))
}

/// Reads a bookmark by id
///
/// # Response
///
/// - **200 OK** - the bookmark
/// - **400 Bad Request** - id is not an integer
/// - **500 Internal Server Error** - lookup failed; a missing record takes
///   this path too (long-standing contract, kept for compatibility)
pub async fn show_bookmark(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Bookmark>, ApiError> {
    let id = parse_id(&id)?;
    let bookmark = database::get_by_id(&state.db, id).await?;
    Ok(Json(bookmark))
}

/// Replaces an existing bookmark's title, link and tag
///
/// Validation matches create, including the duplicate-link check (a record
/// keeping its own link counts as a duplicate of itself). The timestamp is
/// refreshed on success.
///
/// # Response
///
/// - **200 OK** - updated bookmark
/// - **400 Bad Request** - bad id/body/link, or the target id does not exist
/// - **409 Conflict** - another bookmark already has this link
/// - **500 Internal Server Error** - update failed
pub async fn update_bookmark(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<BookmarkData>, JsonRejection>,
) -> Result<Json<Bookmark>, ApiError> {
    let id = parse_id(&id)?;
    let Json(data) = payload.map_err(|_| ApiError::BadRequest)?;
    let title = validate_and_enrich(&state, &data).await?;

    if database::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let updated = database::update(
        &state.db,
        id,
        &format_text(&title),
        &data.link,
        &format_text(&data.tag),
    )
    .await?;

    Ok(Json(updated))
}

/// Deletes a bookmark by id
///
/// # Response
///
/// - **200 OK** - fixed confirmation message
/// - **400 Bad Request** - bad id, or the record does not exist
/// - **500 Internal Server Error** - delete failed
pub async fn remove_bookmark(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<&'static str, ApiError> {
    let id = parse_id(&id)?;

    if database::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    database::delete(&state.db, id).await?;
    Ok(DELETE_MESSAGE)
}

/// Lists bookmarks in a fixed-size id window
///
/// `page` is an id lower bound: the response holds bookmarks with
/// `page < id <= page + 25`. No `page` (or an unparsable one) means 0.
///
/// # Response
///
/// - **200 OK** - JSON array, possibly empty
/// - **500 Internal Server Error** - query failed
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let rows = database::list_window(&state.db, params.value()).await?;
    Ok(Json(rows))
}

/// Full-text search over stored bookmarks
///
/// # Request Body
///
/// ```json
/// { "data": "rust async" }
/// ```
///
/// Each whitespace-separated token is matched as an uppercased prefix, and
/// tokens are OR-combined. `page` is a plain row offset into the results.
///
/// # Response
///
/// - **200 OK** - up to 25 matching bookmarks
/// - **400 Bad Request** - undecodable body
/// - **500 Internal Server Error** - query failed
pub async fn search_bookmarks(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let Json(query) = payload.map_err(|_| ApiError::BadRequest)?;
    let pattern = build_search_pattern(&query.data);
    debug!(pattern = %pattern, "searching bookmarks");

    let rows = database::search(&state.db, &pattern, params.value()).await?;
    Ok(Json(rows))
}

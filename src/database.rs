//! Database pool setup and query helpers
//!
//! This module owns everything that talks to PostgreSQL: pool creation,
//! embedded migrations, and one small helper per query the handlers issue.
//! The helpers execute a parameterized statement and decode rows; all
//! decision-making lives in the handlers.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::AppConfig;
use crate::fetch::LinkProbe;
use crate::model::Bookmark;

/// Maximum number of pooled connections
const MAX_CONNECTIONS: u32 = 10;

/// Timeout for acquiring a connection from the pool
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size shared by the list window and search results
pub const PAGE_LIMIT: i64 = 25;

const BOOKMARK_COLUMNS: &str = r#"id, title, link, "timestamp", tag"#;

/// Application state shared across all request handlers
///
/// Everything in here is cheap to clone: the pool is internally
/// reference-counted and the probe and config are behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub db: PgPool,

    /// Outbound link validation / title fetching capability
    pub probe: Arc<dyn LinkProbe>,

    /// Runtime configuration (API key, bind port)
    pub config: Arc<AppConfig>,
}

/// Creates the connection pool and runs pending migrations
///
/// This is the only place a failure is fatal: the process has nothing to
/// serve without a database.
pub async fn init_db(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Looks up a bookmark by primary key; `Ok(None)` when absent
pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<Bookmark>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id=$1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Looks up a bookmark by primary key, treating a missing row as an error
///
/// Used by the read endpoint, where a missing record and a query failure
/// share the same 500 response.
pub async fn get_by_id(db: &PgPool, id: i32) -> Result<Bookmark, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id=$1"
    ))
    .bind(id)
    .fetch_one(db)
    .await
}

/// Returns true when a bookmark with this exact link already exists
pub async fn link_exists(db: &PgPool, link: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> =
        sqlx::query_as("SELECT id FROM bookmarks WHERE link=$1 LIMIT 1")
            .bind(link)
            .fetch_optional(db)
            .await?;
    Ok(row.is_some())
}

/// Inserts a bookmark and returns the stored row
///
/// `id` comes from the serial column and `timestamp` from `now()`; the
/// caller has already normalized title and tag.
pub async fn insert(
    db: &PgPool,
    title: &str,
    link: &str,
    tag: &str,
) -> Result<Bookmark, sqlx::Error> {
    sqlx::query_as(&format!(
        "INSERT INTO bookmarks (title, link, \"timestamp\", tag) \
         VALUES ($1, $2, now(), $3) RETURNING {BOOKMARK_COLUMNS}"
    ))
    .bind(title)
    .bind(link)
    .bind(tag)
    .fetch_one(db)
    .await
}

/// Replaces title/link/tag of an existing bookmark, refreshing its timestamp
pub async fn update(
    db: &PgPool,
    id: i32,
    title: &str,
    link: &str,
    tag: &str,
) -> Result<Bookmark, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE bookmarks SET title=$1, link=$2, \"timestamp\"=now(), tag=$3 \
         WHERE id=$4 RETURNING {BOOKMARK_COLUMNS}"
    ))
    .bind(title)
    .bind(link)
    .bind(tag)
    .bind(id)
    .fetch_one(db)
    .await
}

/// Hard-deletes a bookmark by primary key
pub async fn delete(db: &PgPool, id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM bookmarks WHERE id=$1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Returns the id-window page `(page, page + PAGE_LIMIT]`
///
/// `page` is an id lower bound, not a page index. Nonstandard, but it is
/// the pagination contract clients rely on.
pub async fn list_window(db: &PgPool, page: i64) -> Result<Vec<Bookmark>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id>$1 AND id<=$2 LIMIT $3"
    ))
    .bind(page)
    .bind(page + PAGE_LIMIT)
    .bind(PAGE_LIMIT)
    .fetch_all(db)
    .await
}

/// Full-text search against the generated `ts` tsvector column
///
/// The pattern is matched under both the language-aware 'english'
/// configuration and the raw 'simple' one, so stemmed and verbatim tokens
/// both hit. `offset` is a plain row offset.
pub async fn search(
    db: &PgPool,
    pattern: &str,
    offset: i64,
) -> Result<Vec<Bookmark>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {BOOKMARK_COLUMNS} FROM bookmarks \
         WHERE ts @@ to_tsquery('english', $1) OR ts @@ to_tsquery('simple', $1) \
         LIMIT $2 OFFSET $3"
    ))
    .bind(pattern)
    .bind(PAGE_LIMIT)
    .bind(offset)
    .fetch_all(db)
    .await
}

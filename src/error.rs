//! Error taxonomy and HTTP response mapping
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl
//! turns each variant into the status code and body the API has always
//! emitted. A failed request never takes the process down.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::model::ResponseMessage;

/// Fixed message bodies, shared with the handlers and tests.
pub const BAD_REQUEST_MESSAGE: &str = "Bad Request";
pub const NOT_EXIST_MESSAGE: &str = "Bookmark doesn't exist";
pub const DUPLICATE_MESSAGE: &str = "Duplicate Bookmark";
pub const DB_ERROR_MESSAGE: &str = "DataBase Error";
pub const DELETE_MESSAGE: &str = "Delete Successful";
pub const ERROR_MESSAGE: &str = "Error";

/// Errors surfaced by the request handlers
///
/// `NotFound` covers a missing record on update/delete and deliberately maps
/// to 400, not 404. A missing record on read never reaches this enum: the
/// read path uses `fetch_one`, so it surfaces as `Database(RowNotFound)` and
/// shares the 500 path with genuine query failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed id, undecodable body, empty or unreachable link, or a
    /// failed title fetch
    #[error("bad request")]
    BadRequest,

    /// Write operation aimed at an id that does not exist
    #[error("bookmark does not exist")]
    NotFound,

    /// A bookmark with the same link already exists
    #[error("duplicate bookmark")]
    Duplicate,

    /// Query execution failed (or a read found no row)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest => (
                StatusCode::BAD_REQUEST,
                Json(ResponseMessage::new(BAD_REQUEST_MESSAGE)),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::BAD_REQUEST,
                Json(ResponseMessage::new(NOT_EXIST_MESSAGE)),
            )
                .into_response(),
            // Plain-text bodies for these two, matching the wire format
            // clients already depend on.
            ApiError::Duplicate => {
                (StatusCode::CONFLICT, DUPLICATE_MESSAGE).into_response()
            }
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, DB_ERROR_MESSAGE).into_response()
            }
        }
    }
}

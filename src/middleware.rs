//! Request middleware: API-key check and JSON content-type enforcement

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::database::AppState;

/// Header carrying the shared API secret
pub const API_KEY_HEADER: &str = "X-BOOKMARKS-API-KEY";

/// Middleware enforcing the `X-BOOKMARKS-API-KEY` header
///
/// Every request must carry the header with the configured secret; a
/// missing or mismatching value is rejected with 401 regardless of path or
/// method. When no secret is configured the check is skipped.
pub async fn require_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let api_key = &state.config.api_key;
    if !api_key.is_empty() {
        let unauthorized_response = || {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Unauthorized",
                    "message": "Invalid or missing API key header"
                })),
            )
                .into_response()
        };

        match headers.get(API_KEY_HEADER) {
            Some(header_value) => match header_value.to_str() {
                Ok(header_str) => {
                    if header_str != api_key {
                        return Err(unauthorized_response());
                    }
                }
                Err(_) => return Err(unauthorized_response()),
            },
            None => return Err(unauthorized_response()),
        }
    }

    Ok(next.run(request).await)
}

/// Middleware rejecting non-JSON request bodies
///
/// Any request that declares a `Content-Type` must declare
/// `application/json`; anything else is rejected with 415. Requests without
/// the header pass through untouched (a body-carrying request among them
/// still fails JSON extraction in the handler). Keying on the declared type
/// rather than `Content-Length` also covers bodies sent without a length
/// header.
pub async fn enforce_json_content_type(
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    if let Some(content_type) = request.headers().get(header::CONTENT_TYPE) {
        let is_json = content_type
            .to_str()
            .ok()
            // Ignore parameters such as "; charset=utf-8"
            .map(|value| {
                value
                    .split(';')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .eq_ignore_ascii_case("application/json")
            })
            .unwrap_or(false);

        if !is_json {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({
                    "error": "Unsupported Media Type",
                    "message": "Content-Type must be application/json"
                })),
            )
                .into_response());
        }
    }

    Ok(next.run(request).await)
}

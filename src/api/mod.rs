//! HTTP surface: task CRUD routes, typed errors, and the static front-end.

pub mod error;
pub mod routes;
pub mod static_files;
pub mod tasks;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Build a JSON response with the charset-qualified content type that every
/// API response carries, success and error paths alike.
pub(crate) fn json_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Plain-text response used by the static file path.
pub(crate) fn text_response(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

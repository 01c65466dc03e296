//! Typed API errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::codec;

use super::json_response;

/// Errors a task handler can return. The Display strings are the exact
/// messages clients see on the wire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing title")]
    MissingTitle,
    #[error("Invalid ID")]
    InvalidId,
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTitle | ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_response(self.status(), codec::render_error(&self.to_string()))
    }
}

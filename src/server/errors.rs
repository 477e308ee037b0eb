use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use crate::processor::TransactionProcessError;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Business rule rejections are part of normal operation, so they map to
/// `400` and carry the error's display text.
impl IntoResponse for TransactionProcessError {
    fn into_response(self) -> Response {
        json_error(StatusCode::BAD_REQUEST, self.to_string())
    }
}

/// Any body that cannot be decoded is rejected the same way, whatever the
/// underlying reason was.
pub fn invalid_body(rejection: JsonRejection) -> Response {
    debug!("malformed request body: {rejection}");
    json_error(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE)
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::envelope::ErrorResponse;

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new(
        "The requested resource was not found",
        None,
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

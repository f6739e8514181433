//! Reusable OpenAPI response types for failure envelopes.

use crate::envelope::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Failed to retrieve products",
        "error": "DATABASE_URL environment variable is not set"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid JSON or failed validation",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Price must be a positive number"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Product not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

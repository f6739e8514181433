//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use axum_helpers::{
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    ApiResponse, AppError, ErrorResponse, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Product, ProductId, ProductInput, ProductStats, StoreBackend, StoreStatus};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        product_stats,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductId, ProductInput, ProductStats, ErrorResponse),
        responses(NotFoundResponse, BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Product catalog management")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for store diagnostics
#[derive(OpenApi)]
#[openapi(
    paths(store_status),
    components(
        schemas(StoreStatus, StoreBackend),
        responses(InternalServerErrorResponse)
    ),
    tags(
        (name = "Store", description = "Storage backend diagnostics")
    )
)]
pub struct StoreApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/stats", get(product_stats))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Create the store diagnostics router (`/status`)
pub fn store_router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/status", get(store_status))
        .with_state(Arc::new(service))
}

/// List all products, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Result<ApiResponse<Vec<Product>>, AppError> {
    let products = service
        .list_products()
        .await
        .map_err(|e| e.into_app_error("Failed to retrieve products"))?;

    Ok(ApiResponse::ok(products, "Products retrieved successfully"))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<Response, AppError> {
    let product = service
        .create_product(input)
        .await
        .map_err(|e| e.into_app_error("Failed to create product"))?;

    Ok(ApiResponse::ok(product, "Product created successfully").with_status(StatusCode::CREATED))
}

/// Catalog totals for the admin screen
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Products",
    responses(
        (status = 200, description = "Product statistics retrieved successfully", body = ApiResponse<ProductStats>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn product_stats<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Result<ApiResponse<ProductStats>, AppError> {
    let stats = service
        .product_stats()
        .await
        .map_err(|e| e.into_app_error("Failed to retrieve product statistics"))?;

    Ok(ApiResponse::ok(stats, "Product statistics retrieved successfully"))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (integer or text key)")
    ),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = service
        .get_product(&ProductId::from(id.as_str()))
        .await
        .map_err(|e| e.into_app_error("Failed to retrieve product"))?;

    Ok(ApiResponse::ok(product, "Product retrieved successfully"))
}

/// Replace a product
///
/// Every field is resupplied; omitted `description`/`category` reset to defaults.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (integer or text key)")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = service
        .update_product(&ProductId::from(id.as_str()), input)
        .await
        .map_err(|e| e.into_app_error("Failed to update product"))?;

    Ok(ApiResponse::ok(product, "Product updated successfully"))
}

/// Delete a product, returning its last state
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (integer or text key)")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = service
        .delete_product(&ProductId::from(id.as_str()))
        .await
        .map_err(|e| e.into_app_error("Failed to delete product"))?;

    Ok(ApiResponse::ok(product, "Product deleted successfully"))
}

/// Probe the configured storage backend
#[utoipa::path(
    get,
    path = "/status",
    tag = "Store",
    responses(
        (status = 200, description = "Store connection successful", body = ApiResponse<StoreStatus>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn store_status<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Result<ApiResponse<StoreStatus>, AppError> {
    let status = service
        .store_status()
        .await
        .map_err(|e| e.into_app_error("Store connection failed"))?;

    Ok(ApiResponse::ok(status, "Store connection successful"))
}

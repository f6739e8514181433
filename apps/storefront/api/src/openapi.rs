use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Product catalog management over in-memory, SQL-over-HTTP and hosted table stores"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/store", api = domain_products::StoreApiDoc)
    )
)]
pub struct ApiDoc;

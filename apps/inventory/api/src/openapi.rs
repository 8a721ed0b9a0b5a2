use utoipa::OpenApi;

/// OpenAPI document served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        description = "Products stored in warehouses"
    ),
    nest(
        (path = "/api/v1/products", api = domain_products::ApiDoc)
    )
)]
pub struct ApiDoc;

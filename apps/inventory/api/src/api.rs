use axum::Router;
use domain_products::{HandlerOptions, ProductRepository, ProductService, handlers};

/// Mount point of the product routes
pub const PRODUCTS_PATH: &str = "/api/v1/products";

pub fn routes<R: ProductRepository + 'static>(
    service: ProductService<R>,
    options: HandlerOptions,
) -> Router {
    Router::new().nest(PRODUCTS_PATH, handlers::router_with_options(service, options))
}

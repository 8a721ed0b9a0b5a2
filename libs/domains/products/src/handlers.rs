use axum::{Router, extract::State, http::StatusCode, response::Response, routing::get};
use axum_helpers::{BodyRejection, IdPath, IdRejection, JsonBody, envelope};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductWarehouse, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        get_product_with_warehouse,
        update_product,
        patch_product,
        delete_product,
    ),
    components(schemas(
        ProductData,
        CreatedProductData,
        ProductWarehouseData,
        CreateProduct,
        UpdateProduct
    )),
    tags(
        (name = TAG, description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Shape of the `GET /` response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListShape {
    /// Bare JSON array, as existing clients expect
    #[default]
    Bare,
    /// Array wrapped in the standard envelope
    Enveloped,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerOptions {
    pub list_shape: ListShape,
}

struct ProductsState<R: ProductRepository> {
    service: ProductService<R>,
    options: HandlerOptions,
}

type SharedState<R> = State<Arc<ProductsState<R>>>;

/// Product fields as returned by reads and updates
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductData {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub count: i32,
    pub price: f64,
    pub warehouse_id: i32,
}

/// Product fields plus the id assigned on creation
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CreatedProductData {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub count: i32,
    pub price: f64,
    pub warehouse_id: i32,
}

/// Product fields plus its warehouse's name and address
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductWarehouseData {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub count: i32,
    pub price: f64,
    pub warehouse_id: i32,
    pub warehouse_name: String,
    pub warehouse_address: String,
}

impl From<Product> for ProductData {
    fn from(p: Product) -> Self {
        Self {
            name: p.name,
            product_type: p.product_type,
            count: p.count,
            price: p.price,
            warehouse_id: p.warehouse_id,
        }
    }
}

impl From<Product> for CreatedProductData {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            product_type: p.product_type,
            count: p.count,
            price: p.price,
            warehouse_id: p.warehouse_id,
        }
    }
}

impl From<ProductWarehouse> for ProductWarehouseData {
    fn from(p: ProductWarehouse) -> Self {
        Self {
            name: p.name,
            product_type: p.product_type,
            count: p.count,
            price: p.price,
            warehouse_id: p.warehouse_id,
            warehouse_name: p.warehouse.name,
            warehouse_address: p.warehouse.address,
        }
    }
}

/// Create the product router with default options
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    router_with_options(service, HandlerOptions::default())
}

/// Create the product router with all HTTP endpoints
pub fn router_with_options<R: ProductRepository + 'static>(
    service: ProductService<R>,
    options: HandlerOptions,
) -> Router {
    let state = Arc::new(ProductsState { service, options });

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .route("/{id}/warehouse", get(get_product_with_warehouse))
        .with_state(state)
}

/// List every product
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All products; a bare array unless the envelope is enabled", body = Vec<ProductData>),
        (status = 500, description = "internal error")
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): SharedState<R>,
) -> ProductResult<Response> {
    let products: Vec<ProductData> = state
        .service
        .list_products()
        .await?
        .into_iter()
        .map(ProductData::from)
        .collect();

    Ok(match state.options.list_shape {
        ListShape::Bare => envelope::json(StatusCode::OK, &products),
        ListShape::Enveloped => envelope::success(StatusCode::OK, products),
    })
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created, wrapped in the response envelope", body = CreatedProductData),
        (status = 400, description = "invalid json, invalid product data or product not unique"),
        (status = 500, description = "internal error")
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): SharedState<R>,
    body: Result<JsonBody<CreateProduct>, BodyRejection>,
) -> ProductResult<Response> {
    let JsonBody(input) = body?;
    let product = state.service.create_product(input).await?;

    Ok(envelope::success(
        StatusCode::CREATED,
        CreatedProductData::from(product),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found, wrapped in the response envelope", body = ProductData),
        (status = 400, description = "parameter must be int"),
        (status = 404, description = "product not found"),
        (status = 500, description = "internal error")
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): SharedState<R>,
    path: Result<IdPath, IdRejection>,
) -> ProductResult<Response> {
    let IdPath(id) = path?;
    let product = state.service.get_product(id).await?;

    Ok(envelope::success(StatusCode::OK, ProductData::from(product)))
}

/// Get a product together with its warehouse
#[utoipa::path(
    get,
    path = "/{id}/warehouse",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product and warehouse found, wrapped in the response envelope", body = ProductWarehouseData),
        (status = 400, description = "parameter must be int"),
        (status = 404, description = "product not found"),
        (status = 500, description = "internal error")
    )
)]
async fn get_product_with_warehouse<R: ProductRepository>(
    State(state): SharedState<R>,
    path: Result<IdPath, IdRejection>,
) -> ProductResult<Response> {
    let IdPath(id) = path?;
    let product = state.service.get_product_with_warehouse(id).await?;

    Ok(envelope::success(
        StatusCode::OK,
        ProductWarehouseData::from(product),
    ))
}

async fn apply_patch<R: ProductRepository>(
    state: &ProductsState<R>,
    path: Result<IdPath, IdRejection>,
    body: Result<JsonBody<UpdateProduct>, BodyRejection>,
) -> ProductResult<Response> {
    let IdPath(id) = path?;
    let JsonBody(patch) = body?;
    let product = state.service.update_product(id, patch).await?;

    Ok(envelope::success(StatusCode::OK, ProductData::from(product)))
}

/// Update a product; absent fields keep their stored values
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Merged product, wrapped in the response envelope", body = ProductData),
        (status = 400, description = "parameter must be int, invalid json, invalid product data or product not unique"),
        (status = 404, description = "product not found"),
        (status = 500, description = "internal error")
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): SharedState<R>,
    path: Result<IdPath, IdRejection>,
    body: Result<JsonBody<UpdateProduct>, BodyRejection>,
) -> ProductResult<Response> {
    apply_patch(&state, path, body).await
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Merged product, wrapped in the response envelope", body = ProductData),
        (status = 400, description = "parameter must be int, invalid json, invalid product data or product not unique"),
        (status = 404, description = "product not found"),
        (status = 500, description = "internal error")
    )
)]
async fn patch_product<R: ProductRepository>(
    State(state): SharedState<R>,
    path: Result<IdPath, IdRejection>,
    body: Result<JsonBody<UpdateProduct>, BodyRejection>,
) -> ProductResult<Response> {
    apply_patch(&state, path, body).await
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "parameter must be int"),
        (status = 404, description = "product not found"),
        (status = 500, description = "internal error")
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): SharedState<R>,
    path: Result<IdPath, IdRejection>,
) -> ProductResult<Response> {
    let IdPath(id) = path?;
    state.service.delete_product(id).await?;

    Ok(envelope::no_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WarehouseAttributes;

    #[test]
    fn test_product_data_omits_id_and_renames_type() {
        let data = ProductData::from(Product {
            id: 3,
            name: "bolt".to_string(),
            product_type: "hardware".to_string(),
            count: 10,
            price: 0.5,
            warehouse_id: 1,
        });

        let json = serde_json::to_value(data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "bolt",
                "type": "hardware",
                "count": 10,
                "price": 0.5,
                "warehouse_id": 1
            })
        );
    }

    #[test]
    fn test_warehouse_data_flattens_attributes() {
        let data = ProductWarehouseData::from(ProductWarehouse {
            id: 3,
            name: "bolt".to_string(),
            product_type: "hardware".to_string(),
            count: 10,
            price: 0.5,
            warehouse_id: 1,
            warehouse: WarehouseAttributes {
                name: "Main".to_string(),
                address: "1 Dock Street".to_string(),
            },
        });

        let json = serde_json::to_value(data).unwrap();
        assert_eq!(json["warehouse_name"], "Main");
        assert_eq!(json["warehouse_address"], "1 Dock Street");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_openapi_lists_product_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/{id}/warehouse"));
    }
}

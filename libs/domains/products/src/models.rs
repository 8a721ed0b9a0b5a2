use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product record as held by the domain.
///
/// `id` is assigned by the store on creation and never changes afterwards.
/// New products enter the system as [`CreateProduct`], which has no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub count: i32,
    pub price: f64,
    pub warehouse_id: i32,
}

/// Descriptive part of a warehouse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WarehouseAttributes {
    pub name: String,
    pub address: String,
}

/// Warehouse referenced by products. Read-only from this domain's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Warehouse {
    pub id: i32,
    pub attributes: WarehouseAttributes,
}

impl Warehouse {
    pub fn new(id: i32, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            attributes: WarehouseAttributes {
                name: name.into(),
                address: address.into(),
            },
        }
    }
}

/// Product joined with a snapshot of its warehouse.
///
/// Only ever produced by a joined read; there is no way to persist it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWarehouse {
    pub id: i32,
    pub name: String,
    pub product_type: String,
    pub count: i32,
    pub price: f64,
    pub warehouse_id: i32,
    pub warehouse: WarehouseAttributes,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(max = 255))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(max = 255))]
    pub product_type: String,
    #[validate(range(min = 0))]
    pub count: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 1))]
    pub warehouse_id: i32,
}

/// DTO for a partial update.
///
/// Each field is independently present or absent. Absent fields (and fields
/// sent as `null`) keep the stored value when merged with [`Product::apply_update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    #[validate(length(max = 255))]
    pub product_type: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub count: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub warehouse_id: Option<i32>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.product_type.is_none()
            && self.count.is_none()
            && self.price.is_none()
            && self.warehouse_id.is_none()
    }
}

impl Product {
    /// Build the stored representation of a freshly created product
    pub fn from_create(id: i32, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            product_type: input.product_type,
            count: input.count,
            price: input.price,
            warehouse_id: input.warehouse_id,
        }
    }

    /// Overlay the fields present in `update`; `id` is never touched.
    pub fn apply_update(&mut self, update: &UpdateProduct) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(product_type) = &update.product_type {
            self.product_type = product_type.clone();
        }
        if let Some(count) = update.count {
            self.count = count;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(warehouse_id) = update.warehouse_id {
            self.warehouse_id = warehouse_id;
        }
    }
}

use sea_orm::ActiveValue::{self, NotSet, Set};
use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;

use super::NullPolicy;
use crate::models::{CreateProduct, Product, ProductWarehouse, UpdateProduct, WarehouseAttributes};

/// Sea-ORM Entity for Products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: Option<String>,
    #[sea_orm(column_name = "type")]
    pub product_type: Option<String>,
    pub count: Option<i32>,
    pub price: Option<f64>,
    pub warehouse_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name.unwrap_or_default(),
            product_type: model.product_type.unwrap_or_default(),
            count: model.count.unwrap_or_default(),
            price: model.price.unwrap_or_default(),
            warehouse_id: model.warehouse_id.unwrap_or_default(),
        }
    }
}

/// Insert model for a new product; the id is left to the database sequence.
pub fn insert_model(input: CreateProduct, policy: NullPolicy) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(policy.encode(input.name)),
        product_type: Set(policy.encode(input.product_type)),
        count: Set(policy.encode(input.count)),
        price: Set(policy.encode(input.price)),
        warehouse_id: Set(policy.encode(input.warehouse_id)),
    }
}

/// Column values for a patch. Fields absent from `patch` stay `NotSet`, so
/// the stored value (NULL included) is left as it is.
pub fn patch_model(patch: &UpdateProduct, policy: NullPolicy) -> ActiveModel {
    fn column<T>(value: Option<T>, policy: NullPolicy) -> ActiveValue<Option<T>>
    where
        T: Default + PartialEq + Into<Value>,
        Option<T>: Into<Value>,
    {
        match value {
            Some(value) => Set(policy.encode(value)),
            None => NotSet,
        }
    }

    ActiveModel {
        id: NotSet,
        name: column(patch.name.clone(), policy),
        product_type: column(patch.product_type.clone(), policy),
        count: column(patch.count, policy),
        price: column(patch.price, policy),
        warehouse_id: column(patch.warehouse_id, policy),
    }
}

/// Row shape of the products/warehouses inner join.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ProductWarehouseRow {
    pub id: i32,
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub count: Option<i32>,
    pub price: Option<f64>,
    pub warehouse_id: Option<i32>,
    pub warehouse_name: Option<String>,
    pub warehouse_address: Option<String>,
}

impl From<ProductWarehouseRow> for ProductWarehouse {
    fn from(row: ProductWarehouseRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            product_type: row.product_type.unwrap_or_default(),
            count: row.count.unwrap_or_default(),
            price: row.price.unwrap_or_default(),
            warehouse_id: row.warehouse_id.unwrap_or_default(),
            warehouse: WarehouseAttributes {
                name: row.warehouse_name.unwrap_or_default(),
                address: row.warehouse_address.unwrap_or_default(),
            },
        }
    }
}

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, Product, ProductWarehouse, UpdateProduct, Warehouse, WarehouseAttributes,
};

/// Storage contract for products.
///
/// Every failure is a classified [`ProductError`]. Writes affect exactly one
/// row: a by-id write that matches nothing is `NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch a product by id
    async fn get_one(&self, id: i32) -> ProductResult<Product>;

    /// Fetch every product, ordered by id
    async fn get_all(&self) -> ProductResult<Vec<Product>>;

    /// Fetch a product together with its warehouse.
    ///
    /// Returns `NotFound` when either side of the join is missing.
    async fn get_one_with_warehouse(&self, id: i32) -> ProductResult<ProductWarehouse>;

    /// Insert a new product and return it with its assigned id
    async fn store(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Write the fields present in `patch` to the product identified by `id`.
    ///
    /// Columns absent from the patch keep their stored value, NULL included.
    async fn update(&self, id: i32, patch: &UpdateProduct) -> ProductResult<()>;

    /// Delete a product by id
    async fn delete(&self, id: i32) -> ProductResult<()>;
}

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<i32, Product>,
    warehouses: HashMap<i32, WarehouseAttributes>,
    next_id: i32,
}

impl Tables {
    fn check_unique(&self, name: &str, except: Option<i32>) -> ProductResult<()> {
        let taken = self
            .products
            .values()
            .any(|p| p.name == name && Some(p.id) != except);

        if taken {
            return Err(ProductError::NotUnique(format!(
                "product name '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn check_warehouse(&self, warehouse_id: i32) -> ProductResult<()> {
        if !self.warehouses.contains_key(&warehouse_id) {
            return Err(ProductError::Relation(format!(
                "warehouse {} does not exist",
                warehouse_id
            )));
        }
        Ok(())
    }
}

/// In-memory implementation of ProductRepository (for development/testing).
///
/// Enforces the same unique-name and warehouse-reference rules as the
/// relational schema.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fixed set of warehouses
    pub fn with_warehouses(warehouses: impl IntoIterator<Item = Warehouse>) -> Self {
        let tables = Tables {
            warehouses: warehouses
                .into_iter()
                .map(|w| (w.id, w.attributes))
                .collect(),
            ..Default::default()
        };

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_one(&self, id: i32) -> ProductResult<Product> {
        let tables = self.tables.read().await;
        tables
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(format!("product {}", id)))
    }

    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().cloned().collect())
    }

    async fn get_one_with_warehouse(&self, id: i32) -> ProductResult<ProductWarehouse> {
        let tables = self.tables.read().await;

        let product = tables.products.get(&id);
        let warehouse = product.and_then(|p| tables.warehouses.get(&p.warehouse_id));

        match (product, warehouse) {
            (Some(p), Some(w)) => Ok(ProductWarehouse {
                id: p.id,
                name: p.name.clone(),
                product_type: p.product_type.clone(),
                count: p.count,
                price: p.price,
                warehouse_id: p.warehouse_id,
                warehouse: w.clone(),
            }),
            _ => Err(ProductError::NotFound(format!(
                "product {} with warehouse",
                id
            ))),
        }
    }

    async fn store(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut tables = self.tables.write().await;

        tables.check_unique(&input.name, None)?;
        tables.check_warehouse(input.warehouse_id)?;

        tables.next_id += 1;
        let product = Product::from_create(tables.next_id, input);
        tables.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i32, patch: &UpdateProduct) -> ProductResult<()> {
        let mut tables = self.tables.write().await;

        let mut product = tables
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(format!("product {}", id)))?;

        if let Some(name) = &patch.name {
            tables.check_unique(name, Some(id))?;
        }
        if let Some(warehouse_id) = patch.warehouse_id {
            tables.check_warehouse(warehouse_id)?;
        }

        product.apply_update(patch);
        tables.products.insert(id, product);

        tracing::info!(product_id = id, "Updated product");
        Ok(())
    }

    async fn delete(&self, id: i32) -> ProductResult<()> {
        let mut tables = self.tables.write().await;

        if tables.products.remove(&id).is_none() {
            return Err(ProductError::NotFound(format!("product {}", id)));
        }

        tracing::info!(product_id = id, "Deleted product");
        Ok(())
    }
}

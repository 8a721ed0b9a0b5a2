//! Product Service - Business logic layer

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductWarehouse, UpdateProduct};
use crate::repository::ProductRepository;

/// Storage deadline applied when none is configured
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Product service providing business logic operations
///
/// Validates input, runs the read-modify-write update protocol and bounds
/// every storage call by a deadline.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    storage_timeout: Duration,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage_timeout(mut self, storage_timeout: Duration) -> Self {
        self.storage_timeout = storage_timeout;
        self
    }

    async fn within_deadline<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = ProductResult<T>>,
    ) -> ProductResult<T> {
        tokio::time::timeout(self.storage_timeout, call)
            .await
            .map_err(|_| {
                ProductError::Internal(format!(
                    "{} exceeded storage deadline of {:?}",
                    operation, self.storage_timeout
                ))
            })?
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.within_deadline("get_one", self.repository.get_one(id))
            .await
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.within_deadline("get_all", self.repository.get_all())
            .await
    }

    /// Get a product joined with its warehouse
    #[instrument(skip(self))]
    pub async fn get_product_with_warehouse(&self, id: i32) -> ProductResult<ProductWarehouse> {
        self.within_deadline(
            "get_one_with_warehouse",
            self.repository.get_one_with_warehouse(id),
        )
        .await
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.within_deadline("store", self.repository.store(input))
            .await
    }

    /// Update an existing product.
    ///
    /// Fetches the stored record, writes only the fields present in `patch`
    /// and returns the stored record with the patch overlaid. Columns the
    /// patch leaves out are never rewritten, so stored NULLs survive.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: i32, patch: UpdateProduct) -> ProductResult<Product> {
        patch
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let mut product = self.get_product(id).await?;
        if patch.is_empty() {
            return Ok(product);
        }

        self.within_deadline("update", self.repository.update(id, &patch))
            .await?;

        product.apply_update(&patch);
        Ok(product)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        self.within_deadline("delete", self.repository.delete(id))
            .await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            storage_timeout: self.storage_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repository::MockProductRepository;
    use async_trait::async_trait;
    use mockall::predicate::eq;

    fn bolt(id: i32) -> Product {
        Product {
            id,
            name: "bolt".to_string(),
            product_type: "hardware".to_string(),
            count: 10,
            price: 0.5,
            warehouse_id: 1,
        }
    }

    fn bolt_input() -> CreateProduct {
        CreateProduct {
            name: "bolt".to_string(),
            product_type: "hardware".to_string(),
            count: 10,
            price: 0.5,
            warehouse_id: 1,
        }
    }

    #[tokio::test]
    async fn test_get_product_delegates() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_one()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(bolt(id)));

        let service = ProductService::new(repo);
        assert_eq!(service.get_product(1).await.unwrap(), bolt(1));
    }

    #[tokio::test]
    async fn test_get_product_not_found_passes_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_one()
            .returning(|id| Err(ProductError::NotFound(format!("product {}", id))));

        let service = ProductService::new(repo);
        let err = service.get_product(999).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input_without_storage_call() {
        let mut repo = MockProductRepository::new();
        repo.expect_store().times(0);

        let service = ProductService::new(repo);
        let err = service
            .create_product(CreateProduct {
                price: -1.0,
                ..bolt_input()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_product_returns_stored_record() {
        let mut repo = MockProductRepository::new();
        repo.expect_store()
            .withf(|input| input.name == "bolt")
            .times(1)
            .returning(|input| Ok(Product::from_create(12, input)));

        let service = ProductService::new(repo);
        let product = service.create_product(bolt_input()).await.unwrap();
        assert_eq!(product.id, 12);
    }

    #[tokio::test]
    async fn test_update_product_writes_patch_and_returns_merged_record() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_one().returning(|id| Ok(bolt(id)));
        repo.expect_update()
            .withf(|id, patch| {
                *id == 4
                    && patch.count == Some(0)
                    && patch.name.is_none()
                    && patch.warehouse_id.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProductService::new(repo);
        let updated = service
            .update_product(
                4,
                UpdateProduct {
                    count: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.count, 0);
        assert_eq!(updated.product_type, "hardware");
        assert_eq!(updated.price, 0.5);
    }

    #[tokio::test]
    async fn test_update_product_missing_record_skips_write() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_one()
            .returning(|id| Err(ProductError::NotFound(format!("product {}", id))));
        repo.expect_update().times(0);

        let service = ProductService::new(repo);
        let err = service
            .update_product(
                4,
                UpdateProduct {
                    count: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_product_empty_patch_skips_write() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_one().returning(|id| Ok(bolt(id)));
        repo.expect_update().times(0);

        let service = ProductService::new(repo);
        let product = service
            .update_product(4, UpdateProduct::default())
            .await
            .unwrap();
        assert_eq!(product, bolt(4));
    }

    #[tokio::test]
    async fn test_update_product_surfaces_not_unique() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_one().returning(|id| Ok(bolt(id)));
        repo.expect_update()
            .returning(|_, _| Err(ProductError::NotUnique("name".into())));

        let service = ProductService::new(repo);
        let err = service
            .update_product(
                4,
                UpdateProduct {
                    name: Some("nut".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotUnique);
    }

    #[tokio::test]
    async fn test_delete_product_delegates() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().with(eq(3)).times(1).returning(|_| Ok(()));

        let service = ProductService::new(repo);
        assert!(service.delete_product(3).await.is_ok());
    }

    struct SlowRepository;

    #[async_trait]
    impl ProductRepository for SlowRepository {
        async fn get_one(&self, id: i32) -> ProductResult<Product> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(bolt(id))
        }

        async fn get_all(&self) -> ProductResult<Vec<Product>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn get_one_with_warehouse(&self, id: i32) -> ProductResult<ProductWarehouse> {
            Err(ProductError::NotFound(format!("product {}", id)))
        }

        async fn store(&self, input: CreateProduct) -> ProductResult<Product> {
            Ok(Product::from_create(1, input))
        }

        async fn update(&self, _id: i32, _patch: &UpdateProduct) -> ProductResult<()> {
            Ok(())
        }

        async fn delete(&self, _id: i32) -> ProductResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_storage_deadline_expiry_is_internal() {
        let service =
            ProductService::new(SlowRepository).with_storage_timeout(Duration::from_millis(20));

        let err = service.list_products().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("get_all"));
    }
}

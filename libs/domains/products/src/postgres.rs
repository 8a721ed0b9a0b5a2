use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, UpdateMany,
};
use std::sync::Arc;

use crate::{
    classify::{ErrorClassifier, SqlErrClassifier},
    entity::{NullPolicy, product, warehouse},
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, ProductWarehouse, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of [`ProductRepository`] on top of Sea-ORM.
///
/// Backend errors go through the configured [`ErrorClassifier`]; zero values
/// are written according to the configured [`NullPolicy`].
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
    classifier: Arc<dyn ErrorClassifier>,
    null_policy: NullPolicy,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            classifier: Arc::new(SqlErrClassifier),
            null_policy: NullPolicy::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: impl ErrorClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn with_null_policy(mut self, null_policy: NullPolicy) -> Self {
        self.null_policy = null_policy;
        self
    }

    fn classify(&self, err: DbErr) -> ProductError {
        self.classifier.to_product_error(err)
    }
}

/// Writes by primary key must touch exactly one row.
fn expect_single_row(rows_affected: u64, id: i32, operation: &str) -> ProductResult<()> {
    match rows_affected {
        1 => Ok(()),
        0 => Err(ProductError::NotFound(format!(
            "{} matched no product with id {}",
            operation, id
        ))),
        n => Err(ProductError::Internal(format!(
            "{} of product {} affected {} rows",
            operation, id, n
        ))),
    }
}

/// `UPDATE products SET <patched columns> WHERE id = $id`
fn update_statement(
    id: i32,
    patch: &UpdateProduct,
    policy: NullPolicy,
) -> UpdateMany<product::Entity> {
    product::Entity::update_many()
        .set(product::patch_model(patch, policy))
        .filter(product::Column::Id.eq(id))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_one(&self, id: i32) -> ProductResult<Product> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| self.classify(e))?;

        model
            .map(Product::from)
            .ok_or_else(|| ProductError::NotFound(format!("product {}", id)))
    }

    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| self.classify(e))?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn get_one_with_warehouse(&self, id: i32) -> ProductResult<ProductWarehouse> {
        let row = product::Entity::find_by_id(id)
            .select_only()
            .column_as(product::Column::Id, "id")
            .column_as(product::Column::Name, "name")
            .column_as(product::Column::ProductType, "product_type")
            .column_as(product::Column::Count, "count")
            .column_as(product::Column::Price, "price")
            .column_as(product::Column::WarehouseId, "warehouse_id")
            .column_as(warehouse::Column::Name, "warehouse_name")
            .column_as(warehouse::Column::Address, "warehouse_address")
            .join(JoinType::InnerJoin, product::Relation::Warehouse.def())
            .into_model::<product::ProductWarehouseRow>()
            .one(&self.db)
            .await
            .map_err(|e| self.classify(e))?;

        row.map(ProductWarehouse::from).ok_or_else(|| {
            ProductError::NotFound(format!("product {} with warehouse", id))
        })
    }

    async fn store(&self, input: CreateProduct) -> ProductResult<Product> {
        let model = product::insert_model(input, self.null_policy)
            .insert(&self.db)
            .await
            .map_err(|e| self.classify(e))?;

        if model.id <= 0 {
            return Err(ProductError::Internal(format!(
                "store returned invalid id {}",
                model.id
            )));
        }

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i32, patch: &UpdateProduct) -> ProductResult<()> {
        if patch.is_empty() {
            // nothing to write, but a missing product is still NotFound
            return self.get_one(id).await.map(|_| ());
        }

        let result = update_statement(id, patch, self.null_policy)
            .exec(&self.db)
            .await
            .map_err(|e| self.classify(e))?;

        expect_single_row(result.rows_affected, id, "update")?;

        tracing::info!(product_id = id, "Updated product");
        Ok(())
    }

    async fn delete(&self, id: i32) -> ProductResult<()> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| self.classify(e))?;

        expect_single_row(result.rows_affected, id, "delete")?;

        tracing::info!(product_id = id, "Deleted product");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait, Value};
    use std::collections::BTreeMap;

    fn bolt_model(id: i32) -> product::Model {
        product::Model {
            id,
            name: Some("bolt".to_string()),
            product_type: Some("hardware".to_string()),
            count: Some(10),
            price: Some(0.5),
            warehouse_id: Some(1),
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

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn mock() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    /// Treats every backend error as a duplicate key
    struct AlwaysNotUnique;

    impl ErrorClassifier for AlwaysNotUnique {
        fn classify(&self, _err: &DbErr) -> ErrorKind {
            ErrorKind::NotUnique
        }
    }

    #[tokio::test]
    async fn test_get_one_decodes_row() {
        let db = mock()
            .append_query_results([vec![bolt_model(1)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.get_one(1).await.unwrap();
        assert_eq!(product, Product::from_create(1, bolt_input()));
    }

    #[tokio::test]
    async fn test_get_one_null_columns_decode_to_zero() {
        let db = mock()
            .append_query_results([vec![product::Model {
                id: 3,
                name: Some("spring".to_string()),
                product_type: None,
                count: None,
                price: None,
                warehouse_id: Some(1),
            }]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.get_one(3).await.unwrap();
        assert_eq!(product.product_type, "");
        assert_eq!(product.count, 0);
        assert_eq!(product.price, 0.0);
    }

    #[tokio::test]
    async fn test_get_one_no_row_is_not_found() {
        let db = mock()
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.get_one(999).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_one_backend_failure_is_internal() {
        let db = mock()
            .append_query_errors([DbErr::Custom("connection reset by peer".into())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.get_one(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("connection reset by peer"));
    }

    #[tokio::test]
    async fn test_get_all_empty() {
        let db = mock()
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_maps_every_row() {
        let db = mock()
            .append_query_results([vec![bolt_model(1), bolt_model(2)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let products = repo.get_all().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, 2);
    }

    #[tokio::test]
    async fn test_get_one_with_warehouse_decodes_join_row() {
        let row = BTreeMap::from([
            ("id", Value::from(1)),
            ("name", Value::from("bolt")),
            ("product_type", Value::from("hardware")),
            ("count", Value::from(10)),
            ("price", Value::from(0.5_f64)),
            ("warehouse_id", Value::from(1)),
            ("warehouse_name", Value::from("Main")),
            ("warehouse_address", Value::from(None::<String>)),
        ]);
        let db = mock().append_query_results([vec![row]]).into_connection();
        let repo = PgProductRepository::new(db);

        let joined = repo.get_one_with_warehouse(1).await.unwrap();
        assert_eq!(joined.name, "bolt");
        assert_eq!(joined.product_type, "hardware");
        assert_eq!(joined.warehouse.name, "Main");
        assert_eq!(joined.warehouse.address, "");
    }

    #[tokio::test]
    async fn test_get_one_with_warehouse_no_row_is_not_found() {
        let db = mock()
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.get_one_with_warehouse(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_store_returns_assigned_id() {
        let db = mock()
            .append_query_results([vec![bolt_model(15)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.store(bolt_input()).await.unwrap();
        assert_eq!(product.id, 15);
        assert_eq!(product.name, "bolt");
    }

    #[tokio::test]
    async fn test_store_non_positive_id_is_internal() {
        let db = mock()
            .append_query_results([vec![bolt_model(0)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.store(bolt_input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_store_uses_injected_classifier() {
        let db = mock()
            .append_query_errors([DbErr::Custom("duplicate key".into())])
            .into_connection();
        let repo = PgProductRepository::new(db).with_classifier(AlwaysNotUnique);

        let err = repo.store(bolt_input()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotUnique);
        assert!(err.to_string().contains("duplicate key"));
    }

    fn count_patch(count: i32) -> UpdateProduct {
        UpdateProduct {
            count: Some(count),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_statement_sets_only_patched_columns() {
        let statement =
            update_statement(1, &count_patch(5), NullPolicy::Explicit).build(DatabaseBackend::Postgres);

        assert!(statement.sql.contains(r#""count" = $1"#));
        for untouched in [r#""name""#, r#""type""#, r#""price""#, r#""warehouse_id""#] {
            assert!(
                !statement.sql.contains(untouched),
                "{} written by {}",
                untouched,
                statement.sql
            );
        }
    }

    #[tokio::test]
    async fn test_update_single_row() {
        let db = mock().append_exec_results([exec(1)]).into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.update(1, &count_patch(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_no_row_is_not_found() {
        let db = mock().append_exec_results([exec(0)]).into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.update(5, &count_patch(5)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_many_rows_is_internal() {
        let db = mock().append_exec_results([exec(2)]).into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.update(5, &count_patch(5)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_empty_update_only_checks_existence() {
        let db = mock()
            .append_query_results([vec![bolt_model(1)], Vec::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.update(1, &UpdateProduct::default()).await.is_ok());

        let err = repo.update(2, &UpdateProduct::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_single_row() {
        let db = mock().append_exec_results([exec(1)]).into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_no_row_is_not_found() {
        let db = mock().append_exec_results([exec(0)]).into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.delete(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_backend_failure_is_internal() {
        let db = mock()
            .append_exec_errors([DbErr::Custom("statement timeout".into())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.delete(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_expect_single_row() {
        assert!(expect_single_row(1, 1, "update").is_ok());
        assert_eq!(
            expect_single_row(0, 1, "delete").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            expect_single_row(3, 1, "update").unwrap_err().kind(),
            ErrorKind::Internal
        );
    }
}

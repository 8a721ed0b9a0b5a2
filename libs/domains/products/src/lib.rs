//! Products Domain
//!
//! Product and warehouse records of the inventory service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response shapes, envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, read-modify-write update, storage deadline
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Storage contract (trait + Postgres / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Entities   │  ← Nullable columns, NullPolicy, error classification
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     models::Warehouse,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let repository = InMemoryProductRepository::with_warehouses([
//!     Warehouse::new(1, "Main", "1 Dock Street"),
//! ]);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod classify;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use classify::{ErrorClassifier, SqlErrClassifier, SqlStateClassifier};
pub use config::ProductsConfig;
pub use entity::NullPolicy;
pub use error::{ErrorKind, ProductError, ProductResult};
pub use handlers::{ApiDoc, HandlerOptions, ListShape};
pub use models::{
    CreateProduct, Product, ProductWarehouse, UpdateProduct, Warehouse, WarehouseAttributes,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;

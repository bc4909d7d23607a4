use async_trait::async_trait;
use models::{NewProduct, Product, ProductPatch};

use crate::errors::ServiceError;

/// Trait abstraction for product catalog storage.
/// The HTTP layer only sees this; the file-backed store is one implementation.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_by_id(&self, id: u64) -> Result<Option<Product>, ServiceError>;
    async fn insert(&self, candidate: NewProduct) -> Result<Product, ServiceError>;
    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError>;
    async fn delete(&self, id: u64) -> Result<usize, ServiceError>;
}

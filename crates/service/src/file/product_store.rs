use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use models::{NewProduct, Product, ProductPatch};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::catalog::ProductCatalog;
use crate::errors::ServiceError;
use crate::metrics;
use crate::storage::json_file::{JsonFile, LoadError};
use crate::validation::{self, ValidationPolicy};

/// How the store reads, validates and writes its file.
#[derive(Clone, Debug)]
pub struct StoreOptions {
    /// Indentation of the written JSON; a tab by default.
    pub indent: String,
    /// Surface an unparsable file as [`ServiceError::CorruptStore`] instead of an empty catalog.
    pub strict_decode: bool,
    pub policy: ValidationPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { indent: "\t".to_string(), strict_decode: false, policy: ValidationPolicy::default() }
    }
}

/// File storage for the product catalog: a JSON array persisted as a whole.
///
/// Every operation re-reads the file, so edits made by other tools are seen on
/// the next call. Mutations hold the write lock for the whole
/// read-modify-write cycle, so two writers in this process never interleave.
/// Other processes writing the same file are not coordinated with.
#[derive(Debug)]
pub struct ProductStore {
    // Last collection this store wrote; the file stays authoritative.
    products: RwLock<Vec<Product>>,
    file: JsonFile<Product>,
    options: StoreOptions,
}

impl ProductStore {
    /// Open the store at `path`. A missing file is an empty catalog and is
    /// only created by the first successful write.
    pub async fn new<P: Into<PathBuf>>(path: P, options: StoreOptions) -> Result<Arc<Self>, ServiceError> {
        let file = JsonFile::new(path, options.indent.clone());
        let store = Self { products: RwLock::new(Vec::new()), file, options };
        let initial = store.read_collection().await?;
        info!(path = %store.path().display(), products = initial.len(), "product store opened");
        *store.products.write().await = initial;
        Ok(Arc::new(store))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Copy of the in-memory mirror.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    async fn read_collection(&self) -> Result<Vec<Product>, ServiceError> {
        match self.file.load().await {
            Ok(products) => {
                debug!(path = %self.path().display(), products = products.len(), "catalog read");
                Ok(products)
            }
            Err(LoadError::Missing) => {
                debug!(path = %self.path().display(), "catalog file not found; treating as empty");
                Ok(Vec::new())
            }
            Err(LoadError::Corrupt(e)) if self.options.strict_decode => {
                Err(ServiceError::CorruptStore(format!("{}: {e}", self.path().display())))
            }
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "catalog unavailable; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, mirror: &mut Vec<Product>, products: Vec<Product>) -> Result<(), ServiceError> {
        let timer = metrics::STORE_WRITE_DURATION.start_timer();
        self.file.save(&products).await?;
        timer.observe_duration();
        *mirror = products;
        Ok(())
    }

    /// All products in file order.
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let _guard = self.products.read().await;
        let result = self.read_collection().await;
        metrics::record("list", &result);
        result
    }

    /// First product with `id`, or `None`.
    pub async fn get_by_id(&self, id: u64) -> Result<Option<Product>, ServiceError> {
        let _guard = self.products.read().await;
        let result = self
            .read_collection()
            .await
            .map(|products| products.into_iter().find(|p| p.id == id));
        metrics::record("get", &result);
        result
    }

    /// Validate `candidate`, assign the next id and append it.
    pub async fn insert(&self, candidate: NewProduct) -> Result<Product, ServiceError> {
        let result = self.insert_inner(candidate).await;
        metrics::record("insert", &result);
        result
    }

    async fn insert_inner(&self, candidate: NewProduct) -> Result<Product, ServiceError> {
        let mut mirror = self.products.write().await;
        let mut products = self.read_collection().await?;
        let id = validation::next_id(&products)?;

        if let Err(e) = validation::check_new(&candidate, &products, &self.options.policy) {
            info!(id, error = %e, "product rejected");
            return Err(e);
        }
        let product = candidate.into_product(id)?;

        products.push(product.clone());
        self.persist(&mut mirror, products).await?;
        info!(id, code = %product.code, "product created");
        Ok(product)
    }

    /// Positional form of [`ProductStore::insert`].
    pub async fn add_product(
        &self,
        title: &str,
        description: &str,
        price: f64,
        thumbnail: &str,
        code: &str,
        stock: f64,
    ) -> Result<Product, ServiceError> {
        self.insert(NewProduct::new(title, description, price, thumbnail, code, stock))
            .await
    }

    /// Merge `patch` over product `id`. Only the supplied fields are validated.
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        let result = self.update_inner(id, patch).await;
        metrics::record("update", &result);
        result
    }

    async fn update_inner(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        let mut mirror = self.products.write().await;
        let mut products = self.read_collection().await?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(ServiceError::NotFound(id))?;

        if let Err(e) = validation::check_patch(&patch, id, &products, &self.options.policy) {
            info!(id, error = %e, "update rejected");
            return Err(e);
        }

        let mut updated = products[index].clone();
        if patch.is_empty() {
            debug!(id, "empty patch; file left as is");
            return Ok(updated);
        }
        patch.apply_to(&mut updated);
        products[index] = updated.clone();

        self.persist(&mut mirror, products).await?;
        info!(id, "product updated");
        Ok(updated)
    }

    /// Remove product `id`; returns how many records were dropped.
    pub async fn delete(&self, id: u64) -> Result<usize, ServiceError> {
        let result = self.delete_inner(id).await;
        metrics::record("delete", &result);
        result
    }

    async fn delete_inner(&self, id: u64) -> Result<usize, ServiceError> {
        let mut mirror = self.products.write().await;
        let mut products = self.read_collection().await?;
        let before = products.len();
        products.retain(|p| p.id != id);

        let removed = before - products.len();
        if removed == 0 {
            return Err(ServiceError::NotFound(id));
        }
        self.persist(&mut mirror, products).await?;
        info!(id, removed, "product deleted");
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl ProductCatalog for ProductStore {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> { self.list().await }
    async fn get_by_id(&self, id: u64) -> Result<Option<Product>, ServiceError> { self.get_by_id(id).await }
    async fn insert(&self, candidate: NewProduct) -> Result<Product, ServiceError> { self.insert(candidate).await }
    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: u64) -> Result<usize, ServiceError> { self.delete(id).await }
}

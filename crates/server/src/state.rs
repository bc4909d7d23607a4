use std::sync::Arc;

use service::{ProductCatalog, ProductStore, StoreOptions, ValidationPolicy};

/// Shared handler state. The catalog is built once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ProductCatalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }
}

/// Translate the `[store]` config section into store options.
pub fn store_options(cfg: &configs::StoreConfig) -> StoreOptions {
    StoreOptions {
        indent: cfg.indent.clone(),
        strict_decode: cfg.strict_decode,
        policy: ValidationPolicy {
            reject_zero_numbers: cfg.reject_zero_numbers,
            exclude_self_on_update: cfg.exclude_self_on_update,
        },
    }
}

/// Open the file-backed catalog described by `cfg`.
pub async fn build_state(cfg: &configs::StoreConfig) -> anyhow::Result<AppState> {
    let store = ProductStore::new(cfg.path.clone(), store_options(cfg)).await?;
    Ok(AppState::new(store))
}

//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the catalog file's directory exists before the store opens it.
pub async fn ensure_env(store_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_store_dir(store_file).await
}

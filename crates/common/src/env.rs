//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the store is opened.

use std::path::Path;

use tracing::{info, warn};

/// Make sure the directory that will hold `store_file` exists.
///
/// The file itself is not created: a missing catalog file is a valid empty
/// catalog and is only materialised on the first write.
pub async fn ensure_store_dir(store_file: &Path) -> anyhow::Result<()> {
    if let Some(dir) = store_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }

    match tokio::fs::metadata(store_file).await {
        Ok(meta) if meta.is_dir() => {
            anyhow::bail!("{} is a directory, expected a JSON file", store_file.display())
        }
        Ok(meta) => info!(path = %store_file.display(), bytes = meta.len(), "catalog file found"),
        Err(_) => warn!(path = %store_file.display(), "catalog file not found; starting with an empty catalog"),
    }
    Ok(())
}

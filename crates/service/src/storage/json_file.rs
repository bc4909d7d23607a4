use std::{
    ffi::OsString,
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio::{fs, io::AsyncWriteExt};

use crate::errors::ServiceError;

/// Why a collection could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// The file does not exist yet.
    Missing,
    /// The file exists but could not be read.
    Unreadable(io::Error),
    /// The file was read but is not a JSON array of `T`.
    Corrupt(serde_json::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Missing => f.write_str("file not found"),
            LoadError::Unreadable(e) => write!(f, "unreadable: {e}"),
            LoadError::Corrupt(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

/// JSON file holding an ordered `Vec<T>`.
///
/// Every save serializes the whole collection, writes it next to the target
/// as `<file>.tmp` and renames it into place, so readers see either the old
/// or the new contents and never a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    indent: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P, indent: impl Into<String>) -> Self {
        Self { path: path.into(), indent: indent.into(), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => {
                let mut tmp = OsString::from(name);
                tmp.push(".tmp");
                self.path.with_file_name(tmp)
            }
            None => self.path.with_extension("tmp"),
        }
    }

    /// Read and decode the whole collection.
    pub async fn load(&self) -> Result<Vec<T>, LoadError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadError::Missing),
            Err(e) => return Err(LoadError::Unreadable(e)),
        };
        serde_json::from_slice(&bytes).map_err(LoadError::Corrupt)
    }

    /// Serialize with the configured indentation, without touching disk.
    pub fn encode(&self, items: &[T]) -> Result<Vec<u8>, ServiceError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        items
            .serialize(&mut ser)
            .map_err(|e| ServiceError::Storage(format!("encode {}: {e}", self.path.display())))?;
        Ok(buf)
    }

    /// Replace the file contents with `items` atomically.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = self.encode(items)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("create {}: {e}", parent.display())))?;
        }

        let tmp = self.tmp_path();
        let written = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(&data).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::Storage(format!("write {}: {e}", self.path.display())));
        }
        Ok(())
    }
}

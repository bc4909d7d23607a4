use models::Field;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product {0} not found")]
    NotFound(u64),
    #[error("all fields are required: `{0}` is missing or empty")]
    MissingField(Field),
    #[error("a product with code `{0}` already exists")]
    DuplicateCode(String),
    #[error("catalog file is corrupt: {0}")]
    CorruptStore(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("no id left after {0}")]
    IdExhausted(u64),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::MissingField(_) => "missing_field",
            ServiceError::DuplicateCode(_) => "duplicate_code",
            ServiceError::CorruptStore(_) => "corrupt_store",
            ServiceError::Storage(_) => "storage",
            ServiceError::IdExhausted(_) => "id_exhausted",
            ServiceError::Model(_) => "model",
        }
    }

    /// Rejections of a candidate, as opposed to lookup or I/O failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ServiceError::MissingField(_) | ServiceError::DuplicateCode(_) | ServiceError::Model(_)
        )
    }
}

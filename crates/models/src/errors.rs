use thiserror::Error;

use crate::product::Field;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing value for field `{0}`")]
    Missing(Field),
}

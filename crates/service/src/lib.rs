//! Service layer for the product catalog.
//! - `file::product_store` owns the JSON file and every mutation of it.
//! - `validation` holds the candidate rules shared by insert and update.
//! - `catalog` is the trait the HTTP layer is written against.

pub mod errors;
pub mod catalog;
pub mod runtime;
pub mod storage;
pub mod file;
pub mod validation;
pub mod pagination;
pub mod metrics;

pub use catalog::ProductCatalog;
pub use file::product_store::{ProductStore, StoreOptions};
pub use validation::ValidationPolicy;

//! Catalog entities: the stored [`product::Product`] record and the
//! candidate shapes accepted for inserts and partial updates.

pub mod errors;
pub mod product;

pub use product::{Field, NewProduct, Product, ProductPatch};

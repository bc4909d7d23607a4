//! File-backed stores.

pub mod product_store;

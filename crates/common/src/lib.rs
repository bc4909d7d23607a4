//! Shared plumbing for the catalog workspace: logging setup, startup
//! environment checks and the small response types every crate agrees on.

pub mod env;
pub mod types;
pub mod utils;

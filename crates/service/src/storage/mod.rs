//! Storage abstractions for service layer
//!
//! File codecs shared by the file-backed stores.

pub mod json_file;

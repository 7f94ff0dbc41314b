//! emtprep-store — hosted document-store integration.
//!
//! Implements the core store traits against an Appwrite-style hosted
//! backend over HTTP, plus an in-memory store for tests.

pub mod appwrite;
pub mod config;
pub mod error;
pub mod files;
pub mod mock;

pub use appwrite::AppwriteStore;
pub use config::{load_config, load_config_from, AppConfig};
pub use error::StoreError;
pub use mock::MemoryStore;

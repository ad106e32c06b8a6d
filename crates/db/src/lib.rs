//! Catalog documents, the store contract handlers depend on, and the
//! in-memory backend used by the application and its tests.

pub mod memory;
pub mod models;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use store::{CatalogStore, StoreError, StoreResult};

/// Store handle shared by every handler.
pub type SharedStore = std::sync::Arc<dyn CatalogStore>;

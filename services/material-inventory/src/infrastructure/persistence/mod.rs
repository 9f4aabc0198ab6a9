//! 持久化实现

mod memory;

pub use memory::{InMemoryCatalogRepository, InMemoryStorageRepository};

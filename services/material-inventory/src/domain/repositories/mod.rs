//! 仓储接口模块

mod catalog_repository;
mod storage_repository;

pub use catalog_repository::{CatalogRepository, CatalogRow};
pub use storage_repository::StorageRepository;

#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use storage_repository::MockStorageRepository;

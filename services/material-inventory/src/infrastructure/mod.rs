//! 基础设施层

pub mod exchange;
pub mod observability;
pub mod persistence;

pub use exchange::{ExchangeError, TextExchange};
pub use persistence::{InMemoryCatalogRepository, InMemoryStorageRepository};

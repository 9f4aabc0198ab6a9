//! Material inventory service library
//!
//! 建材目录与库存：变体模型、校验规则、规格编解码与按规格去重的入库协议

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::InventoryService;
pub use error::{InventoryError, InventoryResult};

//! 值对象

pub mod attribute;
mod ids;

pub use attribute::{
    AttributeDef, AttributeDescriptor, AttributeError, AttributeKind, AttributeValue,
    Specification,
};
pub use ids::{MaterialId, StorageLocationId};

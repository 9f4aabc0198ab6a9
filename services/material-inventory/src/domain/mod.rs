//! 领域层
//!
//! 校验规则、枚举、值对象、材料实体、变体注册表、规格编解码器与仓储接口

pub mod codec;
pub mod entities;
pub mod enums;
pub mod registry;
pub mod repositories;
pub mod rules;
pub mod value_objects;

pub use codec::*;
pub use entities::*;
pub use enums::*;
pub use registry::*;
pub use repositories::*;
pub use value_objects::*;

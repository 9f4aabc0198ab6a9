//! 强类型 ID 定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 物料 ID
///
/// 0 表示尚未持久化的临时物料
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct MaterialId(pub u64);

impl MaterialId {
    /// 未持久化
    pub const TRANSIENT: MaterialId = MaterialId(0);

    pub fn is_transient(&self) -> bool {
        self.0 == 0
    }
}

impl Default for MaterialId {
    fn default() -> Self {
        Self::TRANSIENT
    }
}

/// 仓储位置 ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct StorageLocationId(pub u64);

//! 仓储位置与库存条目

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{MaterialId, StorageLocationId};

/// 仓储位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub id: StorageLocationId,
    pub name: String,
}

/// 库存条目
///
/// 某位置上某材料的数量。数量降到 0 及以下的条目会被删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingEntry {
    pub location_id: StorageLocationId,
    pub material_id: MaterialId,
    pub quantity: i64,
}

impl HoldingEntry {
    pub fn new(location_id: StorageLocationId, material_id: MaterialId, quantity: i64) -> Self {
        Self {
            location_id,
            material_id,
            quantity,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.quantity <= 0
    }
}

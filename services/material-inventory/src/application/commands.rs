//! Inventory commands

use crate::domain::entities::{AttributeEdits, Material};
use crate::domain::value_objects::{MaterialId, StorageLocationId};
use crate::error::{InventoryError, InventoryResult};

/// 入库命令：按规格去重后增加数量
#[derive(Debug, Clone)]
pub struct AddMaterialCommand {
    pub location_id: StorageLocationId,
    /// 临时材料 (id = 0)；id 由去重协议解析
    pub material: Material,
    pub quantity: i64,
}

impl AddMaterialCommand {
    pub fn validate(&self) -> InventoryResult<()> {
        if self.quantity <= 0 {
            return Err(InventoryError::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }
}

/// 出库命令：减少数量，降到 0 及以下时删除条目
#[derive(Debug, Clone)]
pub struct RemoveMaterialCommand {
    pub location_id: StorageLocationId,
    pub material_id: MaterialId,
    pub quantity: i64,
}

impl RemoveMaterialCommand {
    pub fn validate(&self) -> InventoryResult<()> {
        if self.quantity <= 0 {
            return Err(InventoryError::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }
}

/// 直接设置数量，0 表示删除条目
#[derive(Debug, Clone)]
pub struct SetQuantityCommand {
    pub location_id: StorageLocationId,
    pub material_id: MaterialId,
    pub quantity: i64,
}

impl SetQuantityCommand {
    pub fn validate(&self) -> InventoryResult<()> {
        if self.quantity < 0 {
            return Err(InventoryError::NegativeQuantity(self.quantity));
        }
        Ok(())
    }
}

/// 更新已入目录的材料（名称、价格、税率、规格）
#[derive(Debug, Clone)]
pub struct UpdateMaterialCommand {
    pub material: Material,
}

impl UpdateMaterialCommand {
    pub fn validate(&self) -> InventoryResult<()> {
        if self.material.is_transient() {
            return Err(InventoryError::MaterialNotFound(self.material.id()));
        }
        Ok(())
    }
}

/// 应用编辑器回写的属性修改
#[derive(Debug, Clone)]
pub struct EditMaterialCommand {
    pub material_id: MaterialId,
    pub edits: AttributeEdits,
}

/// 导入交换文本并入库
#[derive(Debug, Clone)]
pub struct ImportExchangeCommand {
    pub location_id: StorageLocationId,
    pub text: String,
    pub quantity: i64,
}

impl ImportExchangeCommand {
    pub fn validate(&self) -> InventoryResult<()> {
        if self.quantity <= 0 {
            return Err(InventoryError::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }
}

//! 仓储位置与库存条目仓储接口

use errors::AppResult;

use crate::domain::entities::{HoldingEntry, StorageLocation};
use crate::domain::value_objects::{MaterialId, StorageLocationId};

/// 仓储位置仓储接口
#[cfg_attr(test, mockall::automock)]
pub trait StorageRepository: Send + Sync {
    fn list_locations(&self) -> AppResult<Vec<StorageLocation>>;

    fn find_location(&self, id: StorageLocationId) -> AppResult<Option<StorageLocation>>;

    /// 按名称查找
    fn find_location_by_name(&self, name: &str) -> AppResult<Option<StorageLocation>>;

    /// 创建位置，返回分配的 id
    fn create_location(&self, name: &str) -> AppResult<StorageLocation>;

    fn find_entry(
        &self,
        location_id: StorageLocationId,
        material_id: MaterialId,
    ) -> AppResult<Option<HoldingEntry>>;

    fn entries_for_location(&self, location_id: StorageLocationId) -> AppResult<Vec<HoldingEntry>>;

    fn entries_for_material(&self, material_id: MaterialId) -> AppResult<Vec<HoldingEntry>>;

    /// 新建或覆盖条目
    fn save_entry(&self, entry: &HoldingEntry) -> AppResult<()>;

    fn delete_entry(&self, location_id: StorageLocationId, material_id: MaterialId)
    -> AppResult<()>;
}

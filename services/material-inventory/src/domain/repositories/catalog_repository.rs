//! 材料目录仓储接口

use errors::AppResult;

use crate::domain::codec::{EncodedMaterial, SpecificationKey};
use crate::domain::value_objects::MaterialId;

/// 目录行
///
/// 共享字段加编码后的规格文本，每种材料一行
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub id: MaterialId,
    pub name: String,
    pub tag: String,
    pub unit_price: f64,
    pub vat_percent: f64,
    pub spec_text: String,
}

/// 材料目录仓储接口
///
/// `insert` 不返回生成的 id，调用方按规格键重新查询。
/// 实现必须保证 (标签, 规格文本) 唯一，重复插入返回 `AppError::Conflict`。
#[cfg_attr(test, mockall::automock)]
pub trait CatalogRepository: Send + Sync {
    /// 按规格键查找
    fn find_by_specification(&self, key: &SpecificationKey) -> AppResult<Option<CatalogRow>>;

    /// 根据 ID 查找
    fn find_by_id(&self, id: MaterialId) -> AppResult<Option<CatalogRow>>;

    /// 全部目录行（按 id 升序）
    fn list(&self) -> AppResult<Vec<CatalogRow>>;

    /// 插入新行
    fn insert(&self, material: &EncodedMaterial) -> AppResult<()>;

    /// 更新已有行
    fn update(&self, id: MaterialId, material: &EncodedMaterial) -> AppResult<()>;

    /// 删除
    fn delete(&self, id: MaterialId) -> AppResult<()>;
}

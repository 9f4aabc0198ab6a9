//! Business logic handler

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::codec::SpecificationCodec;
use crate::domain::entities::{HoldingEntry, Material, StorageLocation};
use crate::domain::repositories::{CatalogRepository, CatalogRow, StorageRepository};
use crate::domain::rules::RuleBook;
use crate::domain::value_objects::{MaterialId, StorageLocationId};
use crate::error::{InventoryError, InventoryResult};
use crate::infrastructure::exchange::TextExchange;
use crate::infrastructure::observability::metrics;

use super::commands::*;
use super::queries::*;

/// 去重结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 目录中已有相同规格
    Matched(MaterialId),
    /// 新插入的目录行
    Created(MaterialId),
}

impl UpsertOutcome {
    pub fn id(&self) -> MaterialId {
        match self {
            UpsertOutcome::Matched(id) | UpsertOutcome::Created(id) => *id,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertOutcome::Matched(_) => "matched",
            UpsertOutcome::Created(_) => "created",
        }
    }
}

/// 库存变动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementAction {
    AddNew,
    UpdateExisting,
    Remove,
    SetQuantity,
}

impl MovementAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementAction::AddNew => "ADD_NEW",
            MovementAction::UpdateExisting => "UPDATE_EXISTING",
            MovementAction::Remove => "REMOVE",
            MovementAction::SetQuantity => "SET_QUANTITY",
        }
    }
}

/// 入库结果
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub upsert: UpsertOutcome,
    pub entry: HoldingEntry,
}

pub struct InventoryService {
    catalog: Arc<dyn CatalogRepository>,
    storage: Arc<dyn StorageRepository>,
    codec: SpecificationCodec,
    exchange: TextExchange,
    /// 串行化去重插入与数量调整
    write_lock: Mutex<()>,
}

impl InventoryService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        storage: Arc<dyn StorageRepository>,
        rules: Arc<RuleBook>,
    ) -> Self {
        Self {
            catalog,
            storage,
            codec: SpecificationCodec::new(Arc::clone(&rules)),
            exchange: TextExchange::new(rules),
            write_lock: Mutex::new(()),
        }
    }

    pub fn codec(&self) -> &SpecificationCodec {
        &self.codec
    }

    pub fn exchange(&self) -> &TextExchange {
        &self.exchange
    }

    // ========== 去重协议 ==========

    /// 按规格匹配已有目录行，没有则插入
    pub fn upsert(&self, material: &Material) -> InventoryResult<UpsertOutcome> {
        let _guard = self.write_lock.lock();
        self.resolve_or_create(material)
    }

    /// 调用方必须持有 `write_lock`
    fn resolve_or_create(&self, material: &Material) -> InventoryResult<UpsertOutcome> {
        let encoded = self.codec.encode(material);
        let key = encoded.key();

        let outcome = match self.catalog.find_by_specification(&key)? {
            Some(row) => {
                debug!(material_id = %row.id, tag = %key.tag, "Specification matched");
                UpsertOutcome::Matched(row.id)
            }
            None => {
                self.catalog.insert(&encoded)?;
                // 插入后按规格重新解析 id，不信任插入的返回值
                match self.catalog.find_by_specification(&key)? {
                    Some(row) => {
                        info!(material_id = %row.id, tag = %key.tag, "Material cataloged");
                        UpsertOutcome::Created(row.id)
                    }
                    None => {
                        warn!(tag = %key.tag, spec = %key.spec_text, "Insert verification failed");
                        return Err(InventoryError::InsertVerificationFailed { tag: key.tag });
                    }
                }
            }
        };

        metrics::record_upsert(outcome.as_str(), &key.tag);
        Ok(outcome)
    }

    // ========== 库存变动 ==========

    /// 入库：去重后创建或增加条目
    pub fn add_material(&self, cmd: AddMaterialCommand) -> InventoryResult<AddOutcome> {
        cmd.validate()?;
        let _timer = metrics::OperationTimer::new("add_material");
        let _guard = self.write_lock.lock();

        self.require_location(cmd.location_id)?;
        let upsert = self.resolve_or_create(&cmd.material)?;
        let material_id = upsert.id();

        let (entry, action) = match self.storage.find_entry(cmd.location_id, material_id)? {
            Some(existing) => {
                let quantity = existing.quantity.checked_add(cmd.quantity).ok_or(
                    InventoryError::QuantityOverflow {
                        location_id: cmd.location_id,
                        material_id,
                    },
                )?;
                (
                    HoldingEntry::new(cmd.location_id, material_id, quantity),
                    MovementAction::UpdateExisting,
                )
            }
            None => (
                HoldingEntry::new(cmd.location_id, material_id, cmd.quantity),
                MovementAction::AddNew,
            ),
        };
        if let Err(err) = self.storage.save_entry(&entry) {
            // 新建的目录行不能没有库存条目
            if let UpsertOutcome::Created(id) = upsert {
                if let Err(rollback) = self.cascade_delete(id) {
                    warn!(material_id = %id, error = %rollback, "Catalog rollback failed");
                }
            }
            return Err(err.into());
        }

        self.log_movement(action, &entry, cmd.material.name(), cmd.quantity);
        Ok(AddOutcome { upsert, entry })
    }

    /// 出库：剩余数量 ≤ 0 时删除条目，最后一个条目删除时级联删除目录行
    pub fn remove_material(
        &self,
        cmd: RemoveMaterialCommand,
    ) -> InventoryResult<Option<HoldingEntry>> {
        cmd.validate()?;
        let _guard = self.write_lock.lock();

        let existing = self
            .storage
            .find_entry(cmd.location_id, cmd.material_id)?
            .ok_or(InventoryError::HoldingNotFound {
                location_id: cmd.location_id,
                material_id: cmd.material_id,
            })?;
        let name = self.material_name(cmd.material_id)?;

        let remaining = existing.quantity.saturating_sub(cmd.quantity);
        let entry = HoldingEntry::new(cmd.location_id, cmd.material_id, remaining);
        self.log_movement(MovementAction::Remove, &entry, &name, cmd.quantity);

        if entry.is_depleted() {
            self.storage.delete_entry(cmd.location_id, cmd.material_id)?;
            self.cascade_delete(cmd.material_id)?;
            return Ok(None);
        }
        self.storage.save_entry(&entry)?;
        Ok(Some(entry))
    }

    /// 直接设置数量；0 删除条目并级联
    pub fn set_quantity(&self, cmd: SetQuantityCommand) -> InventoryResult<Option<HoldingEntry>> {
        cmd.validate()?;
        let _guard = self.write_lock.lock();

        self.require_location(cmd.location_id)?;
        let name = self.material_name(cmd.material_id)?;
        let entry = HoldingEntry::new(cmd.location_id, cmd.material_id, cmd.quantity);
        self.log_movement(MovementAction::SetQuantity, &entry, &name, cmd.quantity);

        if entry.is_depleted() {
            if self
                .storage
                .find_entry(cmd.location_id, cmd.material_id)?
                .is_some()
            {
                self.storage.delete_entry(cmd.location_id, cmd.material_id)?;
            }
            self.cascade_delete(cmd.material_id)?;
            return Ok(None);
        }
        self.storage.save_entry(&entry)?;
        Ok(Some(entry))
    }

    /// 导入交换文本并入库
    pub fn import_exchange(&self, cmd: ImportExchangeCommand) -> InventoryResult<AddOutcome> {
        cmd.validate()?;
        let material = match self.exchange.import(&cmd.text) {
            Ok(material) => {
                metrics::record_import(true);
                material
            }
            Err(e) => {
                metrics::record_import(false);
                return Err(e.into());
            }
        };

        self.add_material(AddMaterialCommand {
            location_id: cmd.location_id,
            material,
            quantity: cmd.quantity,
        })
    }

    // ========== 目录维护 ==========

    /// 持久化修改后的材料；新规格已属于其他目录行时拒绝
    pub fn update_material(&self, cmd: UpdateMaterialCommand) -> InventoryResult<()> {
        cmd.validate()?;
        let _guard = self.write_lock.lock();
        self.persist_update(&cmd.material)
    }

    /// 应用编辑器修改并持久化，返回修改后的材料
    pub fn edit_material(&self, cmd: EditMaterialCommand) -> InventoryResult<Material> {
        let _guard = self.write_lock.lock();

        let mut material = self.load_material(cmd.material_id)?;
        material
            .apply_edits(&cmd.edits)
            .map_err(InventoryError::InvalidAttributes)?;
        self.persist_update(&material)?;

        info!(material_id = %material.id(), edits = cmd.edits.len(), "Material edited");
        Ok(material)
    }

    fn persist_update(&self, material: &Material) -> InventoryResult<()> {
        let id = material.id();
        if self.catalog.find_by_id(id)?.is_none() {
            return Err(InventoryError::MaterialNotFound(id));
        }

        let encoded = self.codec.encode(material);
        if let Some(owner) = self.catalog.find_by_specification(&encoded.key())? {
            if owner.id != id {
                return Err(InventoryError::SpecificationTaken(owner.id));
            }
        }
        self.catalog.update(id, &encoded)?;
        info!(material_id = %id, tag = %encoded.tag, "Material updated");
        Ok(())
    }

    // ========== 查询 ==========

    pub fn get_material(&self, id: MaterialId) -> InventoryResult<Material> {
        self.load_material(id)
    }

    pub fn list_materials(&self) -> InventoryResult<Vec<Material>> {
        let rows = self.catalog.list()?;
        metrics::set_catalog_size(rows.len());
        rows.iter().map(|row| self.decode(row)).collect()
    }

    pub fn filter_materials(&self, filter: &MaterialFilter) -> InventoryResult<Vec<Material>> {
        Ok(self
            .list_materials()?
            .into_iter()
            .filter(|material| filter.matches(material))
            .collect())
    }

    /// 导出为交换文本
    pub fn export_material(&self, id: MaterialId) -> InventoryResult<String> {
        let material = self.load_material(id)?;
        Ok(self.exchange.export(&material)?)
    }

    // ========== 仓储位置 ==========

    pub fn list_locations(&self) -> InventoryResult<Vec<StorageLocation>> {
        Ok(self.storage.list_locations()?)
    }

    pub fn create_location(&self, name: &str) -> InventoryResult<StorageLocation> {
        let location = self.storage.create_location(name)?;
        info!(location_id = %location.id, name = %location.name, "Storage location created");
        Ok(location)
    }

    /// 确保给定名称的位置都存在（启动时播种）
    pub fn ensure_locations(&self, names: &[String]) -> InventoryResult<Vec<StorageLocation>> {
        names
            .iter()
            .map(|name| -> InventoryResult<StorageLocation> {
                match self.storage.find_location_by_name(name.trim())? {
                    Some(location) => Ok(location),
                    None => self.create_location(name),
                }
            })
            .collect()
    }

    /// 位置内容：(材料, 数量)
    pub fn location_content(
        &self,
        location_id: StorageLocationId,
    ) -> InventoryResult<Vec<HeldMaterial>> {
        self.require_location(location_id)?;
        self.storage
            .entries_for_location(location_id)?
            .into_iter()
            .map(|entry| -> InventoryResult<HeldMaterial> {
                Ok(HeldMaterial {
                    material: self.load_material(entry.material_id)?,
                    quantity: entry.quantity,
                })
            })
            .collect()
    }

    /// 位置总价值：Σ 含税价 × 数量
    pub fn location_value(&self, location_id: StorageLocationId) -> InventoryResult<f64> {
        Ok(self
            .location_content(location_id)?
            .iter()
            .map(HeldMaterial::value)
            .sum())
    }

    // ========== 内部辅助 ==========

    fn require_location(&self, id: StorageLocationId) -> InventoryResult<StorageLocation> {
        self.storage
            .find_location(id)?
            .ok_or(InventoryError::LocationNotFound(id))
    }

    fn load_material(&self, id: MaterialId) -> InventoryResult<Material> {
        let row = self
            .catalog
            .find_by_id(id)?
            .ok_or(InventoryError::MaterialNotFound(id))?;
        self.decode(&row)
    }

    fn material_name(&self, id: MaterialId) -> InventoryResult<String> {
        self.catalog
            .find_by_id(id)?
            .map(|row| row.name)
            .ok_or(InventoryError::MaterialNotFound(id))
    }

    fn decode(&self, row: &CatalogRow) -> InventoryResult<Material> {
        self.codec.decode(row).map_err(|e| {
            metrics::record_decode_failure(e.kind());
            warn!(material_id = %row.id, tag = %row.tag, error = %e, "Catalog row failed to decode");
            InventoryError::from(e)
        })
    }

    /// 材料不再有任何库存条目时删除目录行
    fn cascade_delete(&self, material_id: MaterialId) -> InventoryResult<()> {
        if !self.storage.entries_for_material(material_id)?.is_empty() {
            return Ok(());
        }
        if self.catalog.find_by_id(material_id)?.is_some() {
            self.catalog.delete(material_id)?;
            metrics::record_cascade_delete();
            info!(material_id = %material_id, "Material removed from catalog with its last holding");
        }
        Ok(())
    }

    fn log_movement(&self, action: MovementAction, entry: &HoldingEntry, name: &str, quantity: i64) {
        metrics::record_movement(action.as_str(), quantity);
        info!(
            action = action.as_str(),
            location_id = %entry.location_id,
            material_id = %entry.material_id,
            material = %name,
            quantity,
            resulting_quantity = entry.quantity,
            "Inventory movement"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Brick, MaterialVariant};
    use crate::domain::enums::BrickForm;
    use crate::domain::repositories::{MockCatalogRepository, MockStorageRepository};
    use crate::infrastructure::persistence::{InMemoryCatalogRepository, InMemoryStorageRepository};

    fn rules() -> Arc<RuleBook> {
        Arc::new(RuleBook::default())
    }

    fn brick(thickness: f64, price: f64) -> Material {
        let variant = MaterialVariant::Brick(Brick {
            form: BrickForm::Solid,
            thickness,
        });
        Material::new(rules(), variant, price, 27.0).unwrap()
    }

    #[test]
    fn test_insert_verification_failure_aborts() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_by_specification()
            .times(2)
            .returning(|_| Ok(None));
        catalog.expect_insert().times(1).returning(|_| Ok(()));

        let storage = Arc::new(InMemoryStorageRepository::new());
        let location = storage.create_location("Yard").unwrap();
        let service = InventoryService::new(Arc::new(catalog), storage.clone(), rules());

        let err = service
            .add_material(AddMaterialCommand {
                location_id: location.id,
                material: brick(15.0, 1000.0),
                quantity: 5,
            })
            .unwrap_err();
        assert!(matches!(err, InventoryError::InsertVerificationFailed { ref tag } if tag == "Brick"));
        assert!(storage.entries_for_location(location.id).unwrap().is_empty());
    }

    #[test]
    fn test_match_does_not_insert() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_by_specification().returning(|key| {
            Ok(Some(CatalogRow {
                id: MaterialId(42),
                name: "Brick".into(),
                tag: key.tag.clone(),
                unit_price: 1.0,
                vat_percent: 0.0,
                spec_text: key.spec_text.clone(),
            }))
        });
        catalog.expect_insert().never();

        let service = InventoryService::new(
            Arc::new(catalog),
            Arc::new(InMemoryStorageRepository::new()),
            rules(),
        );
        assert_eq!(
            service.upsert(&brick(15.0, 1000.0)).unwrap(),
            UpsertOutcome::Matched(MaterialId(42))
        );
    }

    #[test]
    fn test_add_to_unknown_location_leaves_catalog_untouched() {
        let catalog = Arc::new(InMemoryCatalogRepository::new());
        let service = InventoryService::new(
            catalog.clone(),
            Arc::new(InMemoryStorageRepository::new()),
            rules(),
        );
        let err = service
            .add_material(AddMaterialCommand {
                location_id: StorageLocationId(99),
                material: brick(15.0, 1000.0),
                quantity: 1,
            })
            .unwrap_err();
        assert!(matches!(err, InventoryError::LocationNotFound(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_failed_holding_write_rolls_back_created_row() {
        let catalog = Arc::new(InMemoryCatalogRepository::new());
        let mut storage = MockStorageRepository::new();
        storage.expect_find_location().returning(|id| {
            Ok(Some(StorageLocation {
                id,
                name: "Yard".into(),
            }))
        });
        storage.expect_find_entry().returning(|_, _| Ok(None));
        storage
            .expect_save_entry()
            .times(1)
            .returning(|_| Err(errors::AppError::storage("disk full")));
        storage
            .expect_entries_for_material()
            .returning(|_| Ok(Vec::new()));

        let service = InventoryService::new(catalog.clone(), Arc::new(storage), rules());
        let err = service
            .add_material(AddMaterialCommand {
                location_id: StorageLocationId(1),
                material: brick(15.0, 1000.0),
                quantity: 3,
            })
            .unwrap_err();
        assert!(matches!(err, InventoryError::Storage(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_non_positive_quantity_rejected_before_any_lookup() {
        let catalog = MockCatalogRepository::new();
        let service = InventoryService::new(
            Arc::new(catalog),
            Arc::new(InMemoryStorageRepository::new()),
            rules(),
        );
        let err = service
            .add_material(AddMaterialCommand {
                location_id: StorageLocationId(1),
                material: brick(15.0, 1000.0),
                quantity: 0,
            })
            .unwrap_err();
        assert!(matches!(err, InventoryError::NonPositiveQuantity(0)));
    }
}

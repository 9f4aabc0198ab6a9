//! 内存仓储实现
//!
//! 目录行与库存条目保存在进程内，`parking_lot::RwLock` 保护内部状态。

use std::collections::{BTreeMap, HashMap};

use errors::{AppError, AppResult};
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::codec::{EncodedMaterial, SpecificationKey};
use crate::domain::entities::{HoldingEntry, StorageLocation};
use crate::domain::enums::SpecEnum;
use crate::domain::repositories::{CatalogRepository, CatalogRow, StorageRepository};
use crate::domain::value_objects::{MaterialId, StorageLocationId};

/// 目录内部状态
struct CatalogState {
    rows: BTreeMap<MaterialId, CatalogRow>,
    /// (标签, 规格文本) 唯一索引
    by_key: HashMap<SpecificationKey, MaterialId>,
    next_id: u64,
}

/// 内存材料目录
pub struct InMemoryCatalogRepository {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                rows: BTreeMap::new(),
                by_key: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// 当前行数
    pub fn len(&self) -> usize {
        self.state.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().rows.is_empty()
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn row_from(id: MaterialId, material: &EncodedMaterial) -> CatalogRow {
    CatalogRow {
        id,
        name: material.name.clone(),
        tag: material.tag.as_str().to_string(),
        unit_price: material.unit_price,
        vat_percent: material.vat_percent,
        spec_text: material.spec_text.clone(),
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn find_by_specification(&self, key: &SpecificationKey) -> AppResult<Option<CatalogRow>> {
        let state = self.state.read();
        Ok(state
            .by_key
            .get(key)
            .and_then(|id| state.rows.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: MaterialId) -> AppResult<Option<CatalogRow>> {
        Ok(self.state.read().rows.get(&id).cloned())
    }

    fn list(&self) -> AppResult<Vec<CatalogRow>> {
        Ok(self.state.read().rows.values().cloned().collect())
    }

    fn insert(&self, material: &EncodedMaterial) -> AppResult<()> {
        let key = material.key();
        let mut state = self.state.write();
        if let Some(existing) = state.by_key.get(&key) {
            return Err(AppError::conflict(format!(
                "{} specification already cataloged as {}",
                key.tag, existing
            )));
        }

        let id = MaterialId(state.next_id);
        state.next_id += 1;
        state.by_key.insert(key, id);
        state.rows.insert(id, row_from(id, material));
        debug!(material_id = %id, tag = %material.tag, "Catalog row inserted");
        Ok(())
    }

    fn update(&self, id: MaterialId, material: &EncodedMaterial) -> AppResult<()> {
        let key = material.key();
        let mut state = self.state.write();
        let old_key = match state.rows.get(&id) {
            Some(row) => row.key(),
            None => return Err(AppError::not_found(format!("catalog row {}", id))),
        };
        if let Some(owner) = state.by_key.get(&key) {
            if *owner != id {
                return Err(AppError::conflict(format!(
                    "{} specification already cataloged as {}",
                    key.tag, owner
                )));
            }
        }

        state.by_key.remove(&old_key);
        state.by_key.insert(key, id);
        state.rows.insert(id, row_from(id, material));
        Ok(())
    }

    fn delete(&self, id: MaterialId) -> AppResult<()> {
        let mut state = self.state.write();
        match state.rows.remove(&id) {
            Some(row) => {
                state.by_key.remove(&row.key());
                debug!(material_id = %id, "Catalog row deleted");
                Ok(())
            }
            None => Err(AppError::not_found(format!("catalog row {}", id))),
        }
    }
}

/// 位置与库存条目内部状态
#[derive(Default)]
struct StorageState {
    locations: BTreeMap<StorageLocationId, StorageLocation>,
    entries: BTreeMap<(StorageLocationId, MaterialId), HoldingEntry>,
    next_location_id: u64,
}

/// 内存仓储位置与库存
#[derive(Default)]
pub struct InMemoryStorageRepository {
    state: RwLock<StorageState>,
}

impl InMemoryStorageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageRepository for InMemoryStorageRepository {
    fn list_locations(&self) -> AppResult<Vec<StorageLocation>> {
        Ok(self.state.read().locations.values().cloned().collect())
    }

    fn find_location(&self, id: StorageLocationId) -> AppResult<Option<StorageLocation>> {
        Ok(self.state.read().locations.get(&id).cloned())
    }

    fn find_location_by_name(&self, name: &str) -> AppResult<Option<StorageLocation>> {
        Ok(self
            .state
            .read()
            .locations
            .values()
            .find(|location| location.name == name)
            .cloned())
    }

    fn create_location(&self, name: &str) -> AppResult<StorageLocation> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("storage location name must not be empty"));
        }

        let mut state = self.state.write();
        if state.locations.values().any(|location| location.name == name) {
            return Err(AppError::conflict(format!(
                "storage location {} already exists",
                name
            )));
        }

        state.next_location_id += 1;
        let location = StorageLocation {
            id: StorageLocationId(state.next_location_id),
            name: name.to_string(),
        };
        state.locations.insert(location.id, location.clone());
        Ok(location)
    }

    fn find_entry(
        &self,
        location_id: StorageLocationId,
        material_id: MaterialId,
    ) -> AppResult<Option<HoldingEntry>> {
        Ok(self
            .state
            .read()
            .entries
            .get(&(location_id, material_id))
            .cloned())
    }

    fn entries_for_location(&self, location_id: StorageLocationId) -> AppResult<Vec<HoldingEntry>> {
        Ok(self
            .state
            .read()
            .entries
            .values()
            .filter(|entry| entry.location_id == location_id)
            .cloned()
            .collect())
    }

    fn entries_for_material(&self, material_id: MaterialId) -> AppResult<Vec<HoldingEntry>> {
        Ok(self
            .state
            .read()
            .entries
            .values()
            .filter(|entry| entry.material_id == material_id)
            .cloned()
            .collect())
    }

    fn save_entry(&self, entry: &HoldingEntry) -> AppResult<()> {
        let mut state = self.state.write();
        if !state.locations.contains_key(&entry.location_id) {
            return Err(AppError::not_found(format!(
                "storage location {}",
                entry.location_id
            )));
        }
        state
            .entries
            .insert((entry.location_id, entry.material_id), entry.clone());
        Ok(())
    }

    fn delete_entry(
        &self,
        location_id: StorageLocationId,
        material_id: MaterialId,
    ) -> AppResult<()> {
        match self
            .state
            .write()
            .entries
            .remove(&(location_id, material_id))
        {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "holding entry {}/{}",
                location_id, material_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::VariantTag;

    fn encoded(spec_text: &str, price: f64) -> EncodedMaterial {
        EncodedMaterial {
            tag: VariantTag::Brick,
            name: "Brick".to_string(),
            unit_price: price,
            vat_percent: 27.0,
            spec_text: spec_text.to_string(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryCatalogRepository::new();
        repo.insert(&encoded(r#"{"a":1.0}"#, 1.0)).unwrap();
        repo.insert(&encoded(r#"{"a":2.0}"#, 1.0)).unwrap();

        let ids: Vec<_> = repo.list().unwrap().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![MaterialId(1), MaterialId(2)]);
    }

    #[test]
    fn test_duplicate_specification_conflicts() {
        let repo = InMemoryCatalogRepository::new();
        repo.insert(&encoded(r#"{"a":1.0}"#, 1.0)).unwrap();
        let err = repo.insert(&encoded(r#"{"a":1.0}"#, 99.0)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_moves_key_index() {
        let repo = InMemoryCatalogRepository::new();
        let first = encoded(r#"{"a":1.0}"#, 1.0);
        repo.insert(&first).unwrap();
        repo.insert(&encoded(r#"{"a":2.0}"#, 1.0)).unwrap();

        let moved = encoded(r#"{"a":3.0}"#, 5.0);
        repo.update(MaterialId(1), &moved).unwrap();
        assert!(repo.find_by_specification(&first.key()).unwrap().is_none());
        assert_eq!(
            repo.find_by_specification(&moved.key()).unwrap().map(|row| row.id),
            Some(MaterialId(1))
        );

        let taken = encoded(r#"{"a":2.0}"#, 1.0);
        assert!(matches!(
            repo.update(MaterialId(1), &taken),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_delete_frees_specification() {
        let repo = InMemoryCatalogRepository::new();
        let material = encoded(r#"{"a":1.0}"#, 1.0);
        repo.insert(&material).unwrap();
        repo.delete(MaterialId(1)).unwrap();
        assert!(repo.is_empty());
        assert!(repo.find_by_specification(&material.key()).unwrap().is_none());
        assert!(matches!(repo.delete(MaterialId(1)), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_locations_and_entries() {
        let repo = InMemoryStorageRepository::new();
        let yard = repo.create_location("Yard").unwrap();
        assert_eq!(yard.id, StorageLocationId(1));
        assert!(matches!(repo.create_location("Yard"), Err(AppError::Conflict(_))));

        let entry = HoldingEntry::new(yard.id, MaterialId(4), 10);
        repo.save_entry(&entry).unwrap();
        assert_eq!(repo.find_entry(yard.id, MaterialId(4)).unwrap(), Some(entry));
        assert_eq!(repo.entries_for_material(MaterialId(4)).unwrap().len(), 1);

        let orphan = HoldingEntry::new(StorageLocationId(9), MaterialId(4), 1);
        assert!(matches!(repo.save_entry(&orphan), Err(AppError::NotFound(_))));

        repo.delete_entry(yard.id, MaterialId(4)).unwrap();
        assert!(repo.entries_for_location(yard.id).unwrap().is_empty());
    }
}

//! Inventory queries

use serde::{Deserialize, Serialize};

use crate::domain::entities::Material;
use crate::domain::enums::MaterialKind;

/// 材料过滤条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialFilter {
    /// 名称包含（不区分大小写）
    pub name_contains: Option<String>,
    /// 最低净价
    pub min_unit_price: Option<f64>,
    /// 最高净价
    pub max_unit_price: Option<f64>,
    pub kind: Option<MaterialKind>,
}

impl MaterialFilter {
    pub fn matches(&self, material: &Material) -> bool {
        if let Some(needle) = &self.name_contains {
            if !material
                .name()
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = self.min_unit_price {
            if material.unit_price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_unit_price {
            if material.unit_price() > max {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if material.kind() != kind {
                return false;
            }
        }
        true
    }
}

/// 位置内容中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct HeldMaterial {
    pub material: Material,
    pub quantity: i64,
}

impl HeldMaterial {
    /// 含税价 × 数量
    pub fn value(&self) -> f64 {
        self.material.gross_price() * self.quantity as f64
    }
}

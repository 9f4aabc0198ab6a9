//! 共享字段规则

use serde::{Deserialize, Serialize};

use super::{Bounds, RuleSet, ValidationError};
use crate::domain::value_objects::MaterialId;
use crate::domain::value_objects::attribute::names;

/// 材料共享字段规则
///
/// - id ≥ 0
/// - 名称去除首尾空白后非空
/// - 净价不低于配置的下限（默认 0）
/// - 增值税率位于 [0, 50]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMaterialRules", into = "RawMaterialRules")]
pub struct MaterialRules {
    unit_price: Bounds,
    vat_percent: Bounds,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawMaterialRules {
    min_unit_price: f64,
    vat_percent: Bounds,
}

impl Default for RawMaterialRules {
    fn default() -> Self {
        let rules = MaterialRules::default();
        Self {
            min_unit_price: rules.unit_price.min(),
            vat_percent: rules.vat_percent,
        }
    }
}

impl TryFrom<RawMaterialRules> for MaterialRules {
    type Error = ValidationError;

    fn try_from(raw: RawMaterialRules) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_price: Bounds::at_least(raw.min_unit_price)?,
            vat_percent: raw.vat_percent,
        })
    }
}

impl From<MaterialRules> for RawMaterialRules {
    fn from(rules: MaterialRules) -> Self {
        Self {
            min_unit_price: rules.unit_price.min(),
            vat_percent: rules.vat_percent,
        }
    }
}

impl Default for MaterialRules {
    fn default() -> Self {
        Self {
            unit_price: Bounds::fixed(0.0, f64::MAX),
            vat_percent: Bounds::fixed(0.0, 50.0),
        }
    }
}

impl MaterialRules {
    pub fn parse_id(&self, id: i64) -> Result<MaterialId, ValidationError> {
        u64::try_from(id)
            .map(MaterialId)
            .map_err(|_| ValidationError::NegativeId(id))
    }

    pub fn parse_name(&self, name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(trimmed.to_string())
    }

    pub fn parse_unit_price(&self, value: f64) -> Result<f64, ValidationError> {
        self.unit_price.check(names::UNIT_PRICE, value)
    }

    pub fn parse_vat(&self, value: f64) -> Result<f64, ValidationError> {
        self.vat_percent.check(names::VAT_PERCENT, value)
    }

    pub fn min_unit_price(&self) -> f64 {
        self.unit_price.min()
    }

    pub fn min_vat_percent(&self) -> f64 {
        self.vat_percent.min()
    }
}

impl RuleSet for MaterialRules {
    fn bounds(&self, field: &str) -> Option<Bounds> {
        match field {
            names::UNIT_PRICE => Some(self.unit_price),
            names::VAT_PERCENT => Some(self.vat_percent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id() {
        let rules = MaterialRules::default();
        assert_eq!(rules.parse_id(0), Ok(MaterialId(0)));
        assert_eq!(rules.parse_id(42), Ok(MaterialId(42)));
        assert_eq!(rules.parse_id(-1), Err(ValidationError::NegativeId(-1)));
    }

    #[test]
    fn test_name_is_trimmed() {
        let rules = MaterialRules::default();
        assert_eq!(rules.parse_name("  Tégla  ").unwrap(), "Tégla");
        assert_eq!(rules.parse_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(rules.parse_name(""), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_price_and_vat() {
        let rules = MaterialRules::default();
        assert_eq!(rules.parse_unit_price(0.0), Ok(0.0));
        assert!(rules.parse_unit_price(-0.01).is_err());
        assert_eq!(rules.parse_vat(0.0), Ok(0.0));
        assert_eq!(rules.parse_vat(50.0), Ok(50.0));
        assert!(rules.parse_vat(50.01).is_err());
        assert!(rules.parse_vat(-0.01).is_err());
    }

    #[test]
    fn test_deserialize_with_custom_floor() {
        let rules: MaterialRules =
            serde_json::from_str(r#"{"min_unit_price": 100.0}"#).unwrap();
        assert_eq!(rules.min_unit_price(), 100.0);
        assert!(rules.parse_unit_price(99.0).is_err());
        assert_eq!(rules.parse_vat(27.0), Ok(27.0));
    }
}

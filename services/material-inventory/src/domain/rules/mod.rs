//! 校验规则
//!
//! 每种变体一个规则集，持有可配置的数值边界。规则集不可变，
//! 通过 `Arc<RuleBook>` 在实例之间只读共享。

mod material;
mod rule_book;
mod variants;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use material::MaterialRules;
pub use rule_book::RuleBook;
pub use variants::{
    AeratedBlockRules, BeamRules, BrickRules, CrushedStoneRules, FoamBoardRules, MineralWoolRules,
    PlankRules, ReadyMixConcreteRules,
};

/// 校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} 的值 {value} 小于下限 {min}")]
    BelowMinimum { field: String, value: f64, min: f64 },
    #[error("{field} 的值 {value} 大于上限 {max}")]
    AboveMaximum { field: String, value: f64, max: f64 },
    #[error("{field} 必须是有限数值")]
    NotFinite { field: String },
    #[error("ID 不能为负数: {0}")]
    NegativeId(i64),
    #[error("名称不能为空")]
    EmptyName,
    #[error("未知属性: {0}")]
    UnknownField(String),
    #[error("{field} 类型不匹配: 期望 {expected}, 实际 {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{field} 不是有效的枚举成员: {value}")]
    UnknownEnumMember { field: String, value: String },
    #[error("无效的边界: min={min}, max={max}")]
    InvalidBounds { min: f64, max: f64 },
}

impl ValidationError {
    pub fn type_mismatch(field: &str, expected: &'static str, found: &'static str) -> Self {
        ValidationError::TypeMismatch {
            field: field.to_string(),
            expected,
            found,
        }
    }

    /// 违反的字段名（如果有）
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::BelowMinimum { field, .. }
            | ValidationError::AboveMaximum { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::UnknownEnumMember { field, .. } => Some(field),
            ValidationError::UnknownField(field) => Some(field),
            ValidationError::NegativeId(_) => Some("id"),
            ValidationError::EmptyName => Some("name"),
            ValidationError::InvalidBounds { .. } => None,
        }
    }
}

/// 闭区间数值边界
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    min: f64,
    max: f64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = ValidationError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Bounds::new(raw.min, raw.max)
    }
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ValidationError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// 只有下限的边界
    pub fn at_least(min: f64) -> Result<Self, ValidationError> {
        Self::new(min, f64::MAX)
    }

    pub(crate) const fn fixed(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// 含端点校验，通过时原样返回
    pub fn check(&self, field: &str, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.to_string(),
            });
        }
        if value < self.min {
            return Err(ValidationError::BelowMinimum {
                field: field.to_string(),
                value,
                min: self.min,
            });
        }
        if value > self.max {
            return Err(ValidationError::AboveMaximum {
                field: field.to_string(),
                value,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// 规则集
pub trait RuleSet {
    /// 字段的边界；不受该规则集约束的字段返回 None
    fn bounds(&self, field: &str) -> Option<Bounds>;

    fn validate(&self, field: &str, value: f64) -> Result<f64, ValidationError> {
        match self.bounds(field) {
            Some(bounds) => bounds.check(field, value),
            None => Err(ValidationError::UnknownField(field.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        let bounds = Bounds::new(10.0, 40.0).unwrap();
        assert_eq!(bounds.check("thickness", 10.0), Ok(10.0));
        assert_eq!(bounds.check("thickness", 40.0), Ok(40.0));
        assert!(matches!(
            bounds.check("thickness", 9.999),
            Err(ValidationError::BelowMinimum { min, .. }) if min == 10.0
        ));
        assert!(matches!(
            bounds.check("thickness", 40.001),
            Err(ValidationError::AboveMaximum { max, .. }) if max == 40.0
        ));
    }

    #[test]
    fn test_bounds_reject_non_finite_values() {
        let bounds = Bounds::new(0.0, 1.0).unwrap();
        assert!(matches!(
            bounds.check("x", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            bounds.check("x", f64::INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(Bounds::new(5.0, 1.0).is_err());
        assert!(Bounds::new(f64::NAN, 1.0).is_err());
        assert!(Bounds::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserialize_rejects_inverted_bounds() {
        let ok: Bounds = serde_json::from_str(r#"{"min": 1.0, "max": 2.0}"#).unwrap();
        assert_eq!(ok.min(), 1.0);
        assert!(serde_json::from_str::<Bounds>(r#"{"min": 3.0, "max": 2.0}"#).is_err());
    }

    #[test]
    fn test_error_names_field() {
        let bounds = Bounds::new(2.0, 8.0).unwrap();
        let err = bounds.check("length", 9.0).unwrap_err();
        assert_eq!(err.field(), Some("length"));
        assert!(err.to_string().contains("length"));
    }
}

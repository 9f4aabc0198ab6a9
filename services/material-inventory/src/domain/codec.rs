//! 规格编解码器
//!
//! 把变体的规范规格编码为稳定的文本（JSON 对象，键排序，枚举写成成员名），
//! 并从目录行解码回材料。相同的物理规格总是得到逐字节相同的文本，
//! 去重协议依赖这一点判断是否为同一种材料。

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::entities::Material;
use crate::domain::enums::{SpecEnum, UnknownTagError, VariantTag};
use crate::domain::registry::VariantRegistry;
use crate::domain::repositories::CatalogRow;
use crate::domain::rules::{RuleBook, ValidationError};
use crate::domain::value_objects::AttributeValue;

/// 解码错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    UnknownTag(#[from] UnknownTagError),
    #[error("规格文本格式错误: {0}")]
    Malformed(String),
    #[error("缺少字段: {0}")]
    MissingField(String),
    #[error("字段 {field} 类型不匹配: 期望 {expected}, 实际 {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    #[error("多余字段: {0}")]
    UnexpectedField(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DecodeError {
    pub(crate) fn type_mismatch(field: &str, expected: &str, found: &Value) -> Self {
        DecodeError::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::UnknownTag(_) => "unknown_tag",
            DecodeError::Malformed(_) => "malformed",
            DecodeError::MissingField(_) => "missing_field",
            DecodeError::TypeMismatch { .. } => "type_mismatch",
            DecodeError::UnexpectedField(_) => "unexpected_field",
            DecodeError::Validation(_) => "validation",
        }
    }
}

/// 去重键：标签 + 规格文本。价格与税率不参与比较
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecificationKey {
    pub tag: String,
    pub spec_text: String,
}

/// 编码后的材料（不含 id）
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedMaterial {
    pub tag: VariantTag,
    pub name: String,
    pub unit_price: f64,
    pub vat_percent: f64,
    pub spec_text: String,
}

impl EncodedMaterial {
    pub fn key(&self) -> SpecificationKey {
        SpecificationKey {
            tag: self.tag.as_str().to_string(),
            spec_text: self.spec_text.clone(),
        }
    }
}

impl CatalogRow {
    pub fn key(&self) -> SpecificationKey {
        SpecificationKey {
            tag: self.tag.clone(),
            spec_text: self.spec_text.clone(),
        }
    }
}

fn to_json(value: &AttributeValue) -> Value {
    match value {
        // -0.0 与 0.0 视为同一规格
        AttributeValue::Number(n) if *n == 0.0 => Value::from(0.0),
        AttributeValue::Number(n) => Value::from(*n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Enum(member) => Value::String((*member).to_string()),
        AttributeValue::Text(text) => Value::String(text.clone()),
    }
}

/// 规格编解码器
#[derive(Debug, Clone)]
pub struct SpecificationCodec {
    registry: VariantRegistry,
}

impl SpecificationCodec {
    pub fn new(rules: Arc<RuleBook>) -> Self {
        Self {
            registry: VariantRegistry::new(rules),
        }
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// 规格文本：键排序的 JSON 对象
    pub fn spec_text(&self, material: &Material) -> String {
        let sorted: BTreeMap<&str, Value> = material
            .canonical_specification()
            .iter()
            .map(|(name, value)| (name, to_json(value)))
            .collect();
        let object: Map<String, Value> = sorted
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Value::Object(object).to_string()
    }

    pub fn encode(&self, material: &Material) -> EncodedMaterial {
        EncodedMaterial {
            tag: material.tag(),
            name: material.name().to_string(),
            unit_price: material.unit_price(),
            vat_percent: material.vat_percent(),
            spec_text: self.spec_text(material),
        }
    }

    /// 从目录行解码，规格文本必须是 JSON 对象
    pub fn decode(&self, row: &CatalogRow) -> Result<Material, DecodeError> {
        let spec = match serde_json::from_str::<Value>(&row.spec_text) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(DecodeError::Malformed(format!(
                    "期望 JSON 对象, 实际为 {}",
                    crate::domain::registry::json_kind(&other)
                )));
            }
            Err(e) => return Err(DecodeError::Malformed(e.to_string())),
        };

        self.registry.construct(
            &row.tag,
            row.id,
            &row.name,
            row.unit_price,
            row.vat_percent,
            &spec,
        )
    }
}

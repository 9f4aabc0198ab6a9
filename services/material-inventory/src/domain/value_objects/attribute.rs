//! 属性值对象
//!
//! 每个变体静态声明其有序属性表，编辑器、交换格式与编解码器都从这里取得属性名与类型。

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::enums::SpecEnum;
use crate::domain::rules::{Bounds, ValidationError};

/// 规范属性名
pub mod names {
    pub const TAG: &str = "tag";
    pub const MATERIAL_KIND: &str = "materialKind";
    pub const NAME: &str = "name";
    pub const UNIT_PRICE: &str = "unitPrice";
    pub const VAT_PERCENT: &str = "vatPercent";

    pub const FORM: &str = "form";
    pub const THICKNESS: &str = "thickness";
    pub const TYPE: &str = "type";
    pub const LENGTH: &str = "length";
    pub const DIAMETER: &str = "diameter";
    pub const INSECT_TREATED: &str = "insectTreated";
    pub const SIZE: &str = "size";
    pub const CEMENT_CONTENT: &str = "cementContent";
    pub const CONSISTENCY: &str = "consistency";
    pub const AGGREGATE: &str = "aggregate";
    pub const GRAIN_SIZE: &str = "grainSize";
    pub const DECORATIVE: &str = "decorative";
    pub const DENSITY: &str = "density";
    pub const STEP_RESISTANT: &str = "stepResistant";
    pub const BOARD_SIZE: &str = "boardSize";
}

/// 属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeKind {
    Text,
    Number,
    Bool,
    /// 枚举属性，携带全部成员的规范字符串
    Enum(&'static [&'static str]),
}

impl AttributeKind {
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Text => "text",
            AttributeKind::Number => "number",
            AttributeKind::Bool => "bool",
            AttributeKind::Enum(_) => "enum",
        }
    }
}

/// 静态属性定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDef {
    pub name: &'static str,
    pub kind: AttributeKind,
}

impl AttributeDef {
    pub const fn number(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeKind::Number,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeKind::Bool,
        }
    }

    pub const fn enumeration(name: &'static str, members: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: AttributeKind::Enum(members),
        }
    }
}

/// 属性值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// 枚举成员的规范字符串
    Enum(&'static str),
}

impl AttributeValue {
    /// 枚举成员
    pub fn member<E: SpecEnum>(member: E) -> Self {
        AttributeValue::Enum(member.as_str())
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::Number(_) => "number",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Enum(_) => "enum",
        }
    }

    pub fn as_number(&self, field: &str) -> Result<f64, ValidationError> {
        match self {
            AttributeValue::Number(value) => Ok(*value),
            other => Err(ValidationError::type_mismatch(field, "number", other.kind_label())),
        }
    }

    pub fn as_bool(&self, field: &str) -> Result<bool, ValidationError> {
        match self {
            AttributeValue::Bool(value) => Ok(*value),
            other => Err(ValidationError::type_mismatch(field, "bool", other.kind_label())),
        }
    }

    pub fn as_text(&self, field: &str) -> Result<&str, ValidationError> {
        match self {
            AttributeValue::Text(value) => Ok(value),
            other => Err(ValidationError::type_mismatch(field, "text", other.kind_label())),
        }
    }

    /// 编辑器可能回传枚举成员或原始文本，两者都按规范字符串严格匹配
    pub fn as_enum<E: SpecEnum>(&self, field: &str) -> Result<E, ValidationError> {
        let raw = match self {
            AttributeValue::Enum(value) => *value,
            AttributeValue::Text(value) => value.as_str(),
            other => {
                return Err(ValidationError::type_mismatch(field, "enum", other.kind_label()));
            }
        };
        E::parse(raw).ok_or_else(|| ValidationError::UnknownEnumMember {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(value) => f.write_str(value),
            AttributeValue::Number(value) => write!(f, "{}", value),
            AttributeValue::Bool(value) => write!(f, "{}", value),
            AttributeValue::Enum(value) => f.write_str(value),
        }
    }
}

/// 规范规格
///
/// 变体独有属性的有序投影（声明顺序），不含共享字段。
/// 仅用于展示和作为编解码器输入；判等请使用编解码器的规范编码。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Specification {
    entries: Vec<(&'static str, AttributeValue)>,
}

impl Specification {
    pub fn new(entries: Vec<(&'static str, AttributeValue)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 编辑器属性描述
///
/// (属性名, 当前值, 类型, 校验边界)，外部编辑器据此渲染输入控件并回写修改
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub value: AttributeValue,
    pub kind: AttributeKind,
    pub bounds: Option<Bounds>,
}

/// 单个属性的编辑失败
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{attribute}: {error}")]
pub struct AttributeError {
    pub attribute: String,
    pub error: ValidationError,
}

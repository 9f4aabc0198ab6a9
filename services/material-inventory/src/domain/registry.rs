//! 变体注册表
//!
//! 标签到构造器的静态分发表。构造器从规格键值对与共享字段构建材料，
//! 严格检查缺失字段、类型不符与多余字段，从不回退到默认值。

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::codec::DecodeError;
use crate::domain::entities::{
    AeratedBlock, Beam, Brick, CrushedStoneAggregate, FoamBoard, Material, MaterialVariant,
    MineralWool, Plank, ReadyMixConcrete,
};
use crate::domain::enums::{SpecEnum, VariantTag};
use crate::domain::rules::RuleBook;
use crate::domain::value_objects::MaterialId;
use crate::domain::value_objects::attribute::names;

/// 规格键值对中的 JSON 类型名
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 跟踪已读取字段的规格访问器
struct SpecFields<'a> {
    map: &'a Map<String, Value>,
    consumed: Vec<&'static str>,
}

impl<'a> SpecFields<'a> {
    fn new(map: &'a Map<String, Value>) -> Self {
        Self {
            map,
            consumed: Vec::with_capacity(map.len()),
        }
    }

    fn value(&mut self, field: &'static str) -> Result<&'a Value, DecodeError> {
        self.consumed.push(field);
        self.map
            .get(field)
            .ok_or_else(|| DecodeError::MissingField(field.to_string()))
    }

    fn number(&mut self, field: &'static str) -> Result<f64, DecodeError> {
        let value = self.value(field)?;
        value
            .as_f64()
            .ok_or_else(|| DecodeError::type_mismatch(field, "number", value))
    }

    fn boolean(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        let value = self.value(field)?;
        value
            .as_bool()
            .ok_or_else(|| DecodeError::type_mismatch(field, "bool", value))
    }

    fn enumeration<E: SpecEnum>(&mut self, field: &'static str) -> Result<E, DecodeError> {
        let value = self.value(field)?;
        value
            .as_str()
            .and_then(E::parse)
            .ok_or_else(|| DecodeError::type_mismatch(field, &E::NAMES.join("|"), value))
    }

    /// 全部字段读取完毕后，检查是否有多余字段
    fn finish(self) -> Result<(), DecodeError> {
        match self
            .map
            .keys()
            .find(|key| !self.consumed.iter().any(|field| *field == key.as_str()))
        {
            Some(key) => Err(DecodeError::UnexpectedField(key.clone())),
            None => Ok(()),
        }
    }
}

/// 变体注册表
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    rules: Arc<RuleBook>,
}

impl VariantRegistry {
    pub fn new(rules: Arc<RuleBook>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Arc<RuleBook> {
        &self.rules
    }

    /// 全部已知标签
    pub fn tags(&self) -> &'static [&'static str] {
        VariantTag::NAMES
    }

    /// 按标签构造材料
    ///
    /// 标签大小写敏感；未知标签直接返回 `DecodeError::UnknownTag`。
    pub fn construct(
        &self,
        tag: &str,
        id: MaterialId,
        name: &str,
        unit_price: f64,
        vat_percent: f64,
        spec: &Map<String, Value>,
    ) -> Result<Material, DecodeError> {
        let tag: VariantTag = tag.parse()?;
        let mut fields = SpecFields::new(spec);

        let variant = match tag {
            VariantTag::Brick => MaterialVariant::Brick(Brick {
                form: fields.enumeration(names::FORM)?,
                thickness: fields.number(names::THICKNESS)?,
            }),
            VariantTag::AeratedBlock => MaterialVariant::AeratedBlock(AeratedBlock {
                block_type: fields.enumeration(names::TYPE)?,
                thickness: fields.number(names::THICKNESS)?,
                length: fields.number(names::LENGTH)?,
            }),
            VariantTag::Beam => MaterialVariant::Beam(Beam {
                diameter: fields.number(names::DIAMETER)?,
                length: fields.number(names::LENGTH)?,
                insect_treated: fields.boolean(names::INSECT_TREATED)?,
            }),
            VariantTag::Plank => MaterialVariant::Plank(Plank {
                size: fields.enumeration(names::SIZE)?,
                length: fields.number(names::LENGTH)?,
                insect_treated: fields.boolean(names::INSECT_TREATED)?,
            }),
            VariantTag::ReadyMixConcrete => MaterialVariant::ReadyMixConcrete(ReadyMixConcrete {
                cement_content: fields.number(names::CEMENT_CONTENT)?,
                consistency: fields.enumeration(names::CONSISTENCY)?,
                aggregate: fields.enumeration(names::AGGREGATE)?,
            }),
            VariantTag::CrushedStoneAggregate => {
                MaterialVariant::CrushedStoneAggregate(CrushedStoneAggregate {
                    grain_size: fields.number(names::GRAIN_SIZE)?,
                    decorative: fields.boolean(names::DECORATIVE)?,
                    density: fields.number(names::DENSITY)?,
                })
            }
            VariantTag::MineralWool => MaterialVariant::MineralWool(MineralWool {
                thickness: fields.number(names::THICKNESS)?,
                form: fields.enumeration(names::FORM)?,
            }),
            VariantTag::FoamBoard => MaterialVariant::FoamBoard(FoamBoard {
                thickness: fields.number(names::THICKNESS)?,
                step_resistant: fields.boolean(names::STEP_RESISTANT)?,
                board_size: fields.enumeration(names::BOARD_SIZE)?,
            }),
        };
        fields.finish()?;

        let material = Material::restore(
            Arc::clone(&self.rules),
            id,
            name,
            variant,
            unit_price,
            vat_percent,
        )?;
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::enums::BrickForm;

    fn registry() -> VariantRegistry {
        VariantRegistry::new(Arc::new(RuleBook::default()))
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_construct_brick() {
        let spec = object(json!({"form": "AirCell", "thickness": 25.0}));
        let material = registry()
            .construct("Brick", MaterialId(7), "Tégla", 1000.0, 27.0, &spec)
            .unwrap();
        assert_eq!(material.id(), MaterialId(7));
        assert_eq!(
            material.variant(),
            &MaterialVariant::Brick(Brick {
                form: BrickForm::AirCell,
                thickness: 25.0
            })
        );
    }

    #[test]
    fn test_integer_json_numbers_are_accepted() {
        let spec = object(json!({"form": "Solid", "thickness": 15}));
        assert!(registry()
            .construct("Brick", MaterialId(1), "Brick", 1.0, 0.0, &spec)
            .is_ok());
    }

    #[test]
    fn test_unknown_tag_regardless_of_other_inputs() {
        let spec = object(json!({"form": "Solid", "thickness": 15.0}));
        for tag in ["", "brick", "BRICK", "Tile", "Brick ", "MaterialBase"] {
            let err = registry()
                .construct(tag, MaterialId(1), "", -5.0, 900.0, &spec)
                .unwrap_err();
            assert!(matches!(err, DecodeError::UnknownTag(_)), "{tag}");
        }
    }

    #[test]
    fn test_missing_field_is_named() {
        let spec = object(json!({"thickness": 15.0, "stepResistant": true}));
        let err = registry()
            .construct("FoamBoard", MaterialId(1), "x", 1.0, 1.0, &spec)
            .unwrap_err();
        assert_eq!(err, DecodeError::MissingField("boardSize".to_string()));
    }

    #[test]
    fn test_bool_field_rejects_strings() {
        let spec = object(json!({"diameter": 12.0, "length": 3.0, "insectTreated": "true"}));
        let err = registry()
            .construct("Beam", MaterialId(1), "x", 1.0, 1.0, &spec)
            .unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { ref field, .. } if field == "insectTreated"));
    }

    #[test]
    fn test_unexpected_field() {
        let spec = object(json!({"thickness": 8.0, "form": "Rolled", "color": "yellow"}));
        let err = registry()
            .construct("MineralWool", MaterialId(1), "x", 1.0, 1.0, &spec)
            .unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedField("color".to_string()));
    }

    #[test]
    fn test_out_of_range_value_is_validation_error() {
        let spec = object(json!({"grainSize": 50.0, "decorative": false, "density": 1500.0}));
        let err = registry()
            .construct("CrushedStoneAggregate", MaterialId(1), "x", 1.0, 1.0, &spec)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Validation(_)));
    }
}

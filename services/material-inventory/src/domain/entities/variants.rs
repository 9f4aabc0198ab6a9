//! 材料变体
//!
//! 八种固定形态的独有属性。载荷结构体本身不做校验，
//! 校验在 `MaterialVariant::validate` 与各 setter 中按规则册进行。

use serde::{Deserialize, Serialize};

use crate::domain::enums::{
    AeratedBlockType, Aggregate, BoardSize, BrickForm, Consistency, MineralWoolForm, PlankSize,
    VariantTag,
};
use crate::domain::rules::{RuleBook, RuleSet, ValidationError};
use crate::domain::value_objects::attribute::names;
use crate::domain::value_objects::{AttributeValue, Specification};

/// 砖
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub form: BrickForm,
    /// 厚度 (cm)
    pub thickness: f64,
}

/// 加气砌块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AeratedBlock {
    pub block_type: AeratedBlockType,
    /// 厚度 (cm)
    pub thickness: f64,
    /// 长度 (cm)
    pub length: f64,
}

/// 梁（按延米计价）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    /// 直径 (cm)
    pub diameter: f64,
    /// 长度 (m)
    pub length: f64,
    pub insect_treated: bool,
}

/// 板材（按延米计价）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plank {
    pub size: PlankSize,
    /// 长度 (m)
    pub length: f64,
    pub insect_treated: bool,
}

/// 商品混凝土
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyMixConcrete {
    /// 水泥含量 (%)
    pub cement_content: f64,
    pub consistency: Consistency,
    pub aggregate: Aggregate,
}

/// 碎石骨料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrushedStoneAggregate {
    /// 粒径 (mm)
    pub grain_size: f64,
    pub decorative: bool,
    /// 密度 (kg/m³)
    pub density: f64,
}

/// 矿棉
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralWool {
    /// 厚度 (cm)
    pub thickness: f64,
    pub form: MineralWoolForm,
}

/// 泡沫板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoamBoard {
    /// 厚度 (cm)
    pub thickness: f64,
    pub step_resistant: bool,
    pub board_size: BoardSize,
}

/// 材料变体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialVariant {
    Brick(Brick),
    AeratedBlock(AeratedBlock),
    Beam(Beam),
    Plank(Plank),
    ReadyMixConcrete(ReadyMixConcrete),
    CrushedStoneAggregate(CrushedStoneAggregate),
    MineralWool(MineralWool),
    FoamBoard(FoamBoard),
}

fn number(value: f64) -> AttributeValue {
    AttributeValue::Number(value)
}

fn flag(value: bool) -> AttributeValue {
    AttributeValue::Bool(value)
}

impl MaterialVariant {
    pub fn tag(&self) -> VariantTag {
        match self {
            MaterialVariant::Brick(_) => VariantTag::Brick,
            MaterialVariant::AeratedBlock(_) => VariantTag::AeratedBlock,
            MaterialVariant::Beam(_) => VariantTag::Beam,
            MaterialVariant::Plank(_) => VariantTag::Plank,
            MaterialVariant::ReadyMixConcrete(_) => VariantTag::ReadyMixConcrete,
            MaterialVariant::CrushedStoneAggregate(_) => VariantTag::CrushedStoneAggregate,
            MaterialVariant::MineralWool(_) => VariantTag::MineralWool,
            MaterialVariant::FoamBoard(_) => VariantTag::FoamBoard,
        }
    }

    /// 占位变体：数值取下限，枚举取第一个成员，布尔为 false
    pub fn placeholder(tag: VariantTag, book: &RuleBook) -> Self {
        let rules = book.for_tag(tag);
        let min = |field: &str| rules.bounds(field).map(|b| b.min()).unwrap_or_default();
        match tag {
            VariantTag::Brick => MaterialVariant::Brick(Brick {
                form: BrickForm::default(),
                thickness: min(names::THICKNESS),
            }),
            VariantTag::AeratedBlock => MaterialVariant::AeratedBlock(AeratedBlock {
                block_type: AeratedBlockType::default(),
                thickness: min(names::THICKNESS),
                length: min(names::LENGTH),
            }),
            VariantTag::Beam => MaterialVariant::Beam(Beam {
                diameter: min(names::DIAMETER),
                length: min(names::LENGTH),
                insect_treated: false,
            }),
            VariantTag::Plank => MaterialVariant::Plank(Plank {
                size: PlankSize::default(),
                length: min(names::LENGTH),
                insect_treated: false,
            }),
            VariantTag::ReadyMixConcrete => MaterialVariant::ReadyMixConcrete(ReadyMixConcrete {
                cement_content: min(names::CEMENT_CONTENT),
                consistency: Consistency::default(),
                aggregate: Aggregate::default(),
            }),
            VariantTag::CrushedStoneAggregate => {
                MaterialVariant::CrushedStoneAggregate(CrushedStoneAggregate {
                    grain_size: min(names::GRAIN_SIZE),
                    decorative: false,
                    density: min(names::DENSITY),
                })
            }
            VariantTag::MineralWool => MaterialVariant::MineralWool(MineralWool {
                thickness: min(names::THICKNESS),
                form: MineralWoolForm::default(),
            }),
            VariantTag::FoamBoard => MaterialVariant::FoamBoard(FoamBoard {
                thickness: min(names::THICKNESS),
                step_resistant: false,
                board_size: BoardSize::default(),
            }),
        }
    }

    /// 规范规格（声明顺序）
    pub fn specification(&self) -> Specification {
        let entries = match self {
            MaterialVariant::Brick(v) => vec![
                (names::FORM, AttributeValue::member(v.form)),
                (names::THICKNESS, number(v.thickness)),
            ],
            MaterialVariant::AeratedBlock(v) => vec![
                (names::TYPE, AttributeValue::member(v.block_type)),
                (names::THICKNESS, number(v.thickness)),
                (names::LENGTH, number(v.length)),
            ],
            MaterialVariant::Beam(v) => vec![
                (names::DIAMETER, number(v.diameter)),
                (names::LENGTH, number(v.length)),
                (names::INSECT_TREATED, flag(v.insect_treated)),
            ],
            MaterialVariant::Plank(v) => vec![
                (names::SIZE, AttributeValue::member(v.size)),
                (names::LENGTH, number(v.length)),
                (names::INSECT_TREATED, flag(v.insect_treated)),
            ],
            MaterialVariant::ReadyMixConcrete(v) => vec![
                (names::CEMENT_CONTENT, number(v.cement_content)),
                (names::CONSISTENCY, AttributeValue::member(v.consistency)),
                (names::AGGREGATE, AttributeValue::member(v.aggregate)),
            ],
            MaterialVariant::CrushedStoneAggregate(v) => vec![
                (names::GRAIN_SIZE, number(v.grain_size)),
                (names::DECORATIVE, flag(v.decorative)),
                (names::DENSITY, number(v.density)),
            ],
            MaterialVariant::MineralWool(v) => vec![
                (names::THICKNESS, number(v.thickness)),
                (names::FORM, AttributeValue::member(v.form)),
            ],
            MaterialVariant::FoamBoard(v) => vec![
                (names::THICKNESS, number(v.thickness)),
                (names::STEP_RESISTANT, flag(v.step_resistant)),
                (names::BOARD_SIZE, AttributeValue::member(v.board_size)),
            ],
        };
        Specification::new(entries)
    }

    /// 按声明顺序校验全部数值属性，遇到第一个错误即返回
    pub fn validate(&self, book: &RuleBook) -> Result<(), ValidationError> {
        let rules = book.for_tag(self.tag());
        for (name, value) in self.specification().iter() {
            if let AttributeValue::Number(value) = value {
                rules.validate(name, *value)?;
            }
        }
        Ok(())
    }

    /// 线性长度 (m)，仅按延米计价的变体有
    pub fn running_length(&self) -> Option<f64> {
        match self {
            MaterialVariant::Beam(v) => Some(v.length),
            MaterialVariant::Plank(v) => Some(v.length),
            _ => None,
        }
    }

    /// 校验后写入单个独有属性；失败时不修改任何字段
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: &AttributeValue,
        book: &RuleBook,
    ) -> Result<(), ValidationError> {
        let rules = book.for_tag(self.tag());
        let bounded = |field: &str| value.as_number(field).and_then(|v| rules.validate(field, v));
        let unknown = || ValidationError::UnknownField(name.to_string());

        match self {
            MaterialVariant::Brick(v) => match name {
                names::FORM => v.form = value.as_enum(name)?,
                names::THICKNESS => v.thickness = bounded(name)?,
                _ => return Err(unknown()),
            },
            MaterialVariant::AeratedBlock(v) => match name {
                names::TYPE => v.block_type = value.as_enum(name)?,
                names::THICKNESS => v.thickness = bounded(name)?,
                names::LENGTH => v.length = bounded(name)?,
                _ => return Err(unknown()),
            },
            MaterialVariant::Beam(v) => match name {
                names::DIAMETER => v.diameter = bounded(name)?,
                names::LENGTH => v.length = bounded(name)?,
                names::INSECT_TREATED => v.insect_treated = value.as_bool(name)?,
                _ => return Err(unknown()),
            },
            MaterialVariant::Plank(v) => match name {
                names::SIZE => v.size = value.as_enum(name)?,
                names::LENGTH => v.length = bounded(name)?,
                names::INSECT_TREATED => v.insect_treated = value.as_bool(name)?,
                _ => return Err(unknown()),
            },
            MaterialVariant::ReadyMixConcrete(v) => match name {
                names::CEMENT_CONTENT => v.cement_content = bounded(name)?,
                names::CONSISTENCY => v.consistency = value.as_enum(name)?,
                names::AGGREGATE => v.aggregate = value.as_enum(name)?,
                _ => return Err(unknown()),
            },
            MaterialVariant::CrushedStoneAggregate(v) => match name {
                names::GRAIN_SIZE => v.grain_size = bounded(name)?,
                names::DECORATIVE => v.decorative = value.as_bool(name)?,
                names::DENSITY => v.density = bounded(name)?,
                _ => return Err(unknown()),
            },
            MaterialVariant::MineralWool(v) => match name {
                names::THICKNESS => v.thickness = bounded(name)?,
                names::FORM => v.form = value.as_enum(name)?,
                _ => return Err(unknown()),
            },
            MaterialVariant::FoamBoard(v) => match name {
                names::THICKNESS => v.thickness = bounded(name)?,
                names::STEP_RESISTANT => v.step_resistant = value.as_bool(name)?,
                names::BOARD_SIZE => v.board_size = value.as_enum(name)?,
                _ => return Err(unknown()),
            },
        }
        Ok(())
    }
}

/// 属性定义与实际规格是否一致（仅供测试使用）
#[cfg(test)]
pub(crate) fn specification_matches_definitions(variant: &MaterialVariant) -> bool {
    use crate::domain::value_objects::AttributeKind;

    let spec = variant.specification();
    let defs = variant.tag().attributes();
    spec.len() == defs.len()
        && spec.iter().zip(defs).all(|((name, value), def)| {
            name == def.name
                && match (def.kind, value) {
                    (AttributeKind::Number, AttributeValue::Number(_)) => true,
                    (AttributeKind::Bool, AttributeValue::Bool(_)) => true,
                    (AttributeKind::Enum(members), AttributeValue::Enum(member)) => {
                        members.contains(member)
                    }
                    _ => false,
                }
        })
}

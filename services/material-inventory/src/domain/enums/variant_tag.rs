//! 变体标签
//!
//! 封闭的八种材料变体。标签字符串用于持久化与交换格式中的判别字段。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    AeratedBlockType, Aggregate, BoardSize, BrickForm, Consistency, MaterialKind, MineralWoolForm,
    PlankSize, SpecEnum,
};
use crate::domain::value_objects::AttributeDef;
use crate::domain::value_objects::attribute::names;

/// 未知标签
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未知的材料类型标签: {0}")]
pub struct UnknownTagError(pub String);

/// 变体标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariantTag {
    Brick,
    AeratedBlock,
    Beam,
    Plank,
    ReadyMixConcrete,
    CrushedStoneAggregate,
    MineralWool,
    FoamBoard,
}

const BRICK_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::enumeration(names::FORM, BrickForm::NAMES),
    AttributeDef::number(names::THICKNESS),
];

const AERATED_BLOCK_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::enumeration(names::TYPE, AeratedBlockType::NAMES),
    AttributeDef::number(names::THICKNESS),
    AttributeDef::number(names::LENGTH),
];

const BEAM_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::number(names::DIAMETER),
    AttributeDef::number(names::LENGTH),
    AttributeDef::boolean(names::INSECT_TREATED),
];

const PLANK_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::enumeration(names::SIZE, PlankSize::NAMES),
    AttributeDef::number(names::LENGTH),
    AttributeDef::boolean(names::INSECT_TREATED),
];

const READY_MIX_CONCRETE_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::number(names::CEMENT_CONTENT),
    AttributeDef::enumeration(names::CONSISTENCY, Consistency::NAMES),
    AttributeDef::enumeration(names::AGGREGATE, Aggregate::NAMES),
];

const CRUSHED_STONE_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::number(names::GRAIN_SIZE),
    AttributeDef::boolean(names::DECORATIVE),
    AttributeDef::number(names::DENSITY),
];

const MINERAL_WOOL_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::number(names::THICKNESS),
    AttributeDef::enumeration(names::FORM, MineralWoolForm::NAMES),
];

const FOAM_BOARD_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::number(names::THICKNESS),
    AttributeDef::boolean(names::STEP_RESISTANT),
    AttributeDef::enumeration(names::BOARD_SIZE, BoardSize::NAMES),
];

impl VariantTag {
    /// 材料大类
    pub fn kind(&self) -> MaterialKind {
        match self {
            VariantTag::Brick
            | VariantTag::AeratedBlock
            | VariantTag::ReadyMixConcrete
            | VariantTag::CrushedStoneAggregate => MaterialKind::Hard,
            VariantTag::Beam | VariantTag::Plank => MaterialKind::Wood,
            VariantTag::MineralWool | VariantTag::FoamBoard => MaterialKind::Insulation,
        }
    }

    /// 独有属性定义（声明顺序）
    pub fn attributes(&self) -> &'static [AttributeDef] {
        match self {
            VariantTag::Brick => BRICK_ATTRIBUTES,
            VariantTag::AeratedBlock => AERATED_BLOCK_ATTRIBUTES,
            VariantTag::Beam => BEAM_ATTRIBUTES,
            VariantTag::Plank => PLANK_ATTRIBUTES,
            VariantTag::ReadyMixConcrete => READY_MIX_CONCRETE_ATTRIBUTES,
            VariantTag::CrushedStoneAggregate => CRUSHED_STONE_ATTRIBUTES,
            VariantTag::MineralWool => MINERAL_WOOL_ATTRIBUTES,
            VariantTag::FoamBoard => FOAM_BOARD_ATTRIBUTES,
        }
    }

    /// 按名称查找独有属性定义
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeDef> {
        self.attributes().iter().find(|def| def.name == name)
    }

    /// 价格按延米计算的变体
    pub fn priced_per_meter(&self) -> bool {
        matches!(self, VariantTag::Beam | VariantTag::Plank)
    }
}

impl SpecEnum for VariantTag {
    const ALL: &'static [Self] = &[
        VariantTag::Brick,
        VariantTag::AeratedBlock,
        VariantTag::Beam,
        VariantTag::Plank,
        VariantTag::ReadyMixConcrete,
        VariantTag::CrushedStoneAggregate,
        VariantTag::MineralWool,
        VariantTag::FoamBoard,
    ];
    const NAMES: &'static [&'static str] = &[
        "Brick",
        "AeratedBlock",
        "Beam",
        "Plank",
        "ReadyMixConcrete",
        "CrushedStoneAggregate",
        "MineralWool",
        "FoamBoard",
    ];

    fn as_str(&self) -> &'static str {
        match self {
            VariantTag::Brick => "Brick",
            VariantTag::AeratedBlock => "AeratedBlock",
            VariantTag::Beam => "Beam",
            VariantTag::Plank => "Plank",
            VariantTag::ReadyMixConcrete => "ReadyMixConcrete",
            VariantTag::CrushedStoneAggregate => "CrushedStoneAggregate",
            VariantTag::MineralWool => "MineralWool",
            VariantTag::FoamBoard => "FoamBoard",
        }
    }
}

impl FromStr for VariantTag {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownTagError(s.to_string()))
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

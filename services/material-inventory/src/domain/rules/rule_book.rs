//! 规则册

use serde::{Deserialize, Serialize};

use super::{
    AeratedBlockRules, BeamRules, BrickRules, CrushedStoneRules, FoamBoardRules, MaterialRules,
    MineralWoolRules, PlankRules, ReadyMixConcreteRules, RuleSet,
};
use crate::domain::enums::VariantTag;

/// 全部规则集
///
/// 由配置 `[inventory.rules]` 构建，构建后不可变。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBook {
    pub material: MaterialRules,
    pub brick: BrickRules,
    pub aerated_block: AeratedBlockRules,
    pub beam: BeamRules,
    pub plank: PlankRules,
    pub ready_mix_concrete: ReadyMixConcreteRules,
    pub crushed_stone: CrushedStoneRules,
    pub mineral_wool: MineralWoolRules,
    pub foam_board: FoamBoardRules,
}

impl RuleBook {
    /// 变体对应的规则集
    pub fn for_tag(&self, tag: VariantTag) -> &dyn RuleSet {
        match tag {
            VariantTag::Brick => &self.brick,
            VariantTag::AeratedBlock => &self.aerated_block,
            VariantTag::Beam => &self.beam,
            VariantTag::Plank => &self.plank,
            VariantTag::ReadyMixConcrete => &self.ready_mix_concrete,
            VariantTag::CrushedStoneAggregate => &self.crushed_stone,
            VariantTag::MineralWool => &self.mineral_wool,
            VariantTag::FoamBoard => &self.foam_board,
        }
    }
}

//! 实体

mod material;
mod storage;
mod variants;

pub use material::{AttributeEdits, Material};
pub use storage::{HoldingEntry, StorageLocation};
pub use variants::{
    AeratedBlock, Beam, Brick, CrushedStoneAggregate, FoamBoard, MaterialVariant, MineralWool,
    Plank, ReadyMixConcrete,
};

#[cfg(test)]
pub(crate) use variants::specification_matches_definitions;

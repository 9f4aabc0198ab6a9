//! 枚举模块

mod concrete;
mod insulation;
mod masonry;
mod material_kind;
mod spec_enum;
mod timber;
mod variant_tag;

pub use concrete::{Aggregate, Consistency};
pub use insulation::{BoardSize, MineralWoolForm};
pub use masonry::{AeratedBlockType, BrickForm};
pub use material_kind::MaterialKind;
pub use spec_enum::SpecEnum;
pub use timber::PlankSize;
pub use variant_tag::{UnknownTagError, VariantTag};

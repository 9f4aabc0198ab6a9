//! 材料大类枚举

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SpecEnum;

/// 材料大类
///
/// 粗粒度的结构分类，与变体标签相互独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// 保温材料
    Insulation,
    /// 木材
    Wood,
    /// 硬质材料（砌体、混凝土、碎石）
    Hard,
}

impl SpecEnum for MaterialKind {
    const ALL: &'static [Self] = &[MaterialKind::Insulation, MaterialKind::Wood, MaterialKind::Hard];
    const NAMES: &'static [&'static str] = &["Insulation", "Wood", "Hard"];

    fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Insulation => "Insulation",
            MaterialKind::Wood => "Wood",
            MaterialKind::Hard => "Hard",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

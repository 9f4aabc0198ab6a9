//! 保温材料枚举（矿棉、泡沫板）

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SpecEnum;

/// 矿棉形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MineralWoolForm {
    /// 卷材
    #[default]
    Rolled,
    /// 板材
    Board,
}

impl SpecEnum for MineralWoolForm {
    const ALL: &'static [Self] = &[MineralWoolForm::Rolled, MineralWoolForm::Board];
    const NAMES: &'static [&'static str] = &["Rolled", "Board"];

    fn as_str(&self) -> &'static str {
        match self {
            MineralWoolForm::Rolled => "Rolled",
            MineralWoolForm::Board => "Board",
        }
    }
}

impl fmt::Display for MineralWoolForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 泡沫板幅面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BoardSize {
    /// 50×50 cm
    #[default]
    #[serde(rename = "50x50cm")]
    Cm50By50,
    /// 100×50 cm
    #[serde(rename = "100x50cm")]
    Cm100By50,
    /// 100×100 cm
    #[serde(rename = "100x100cm")]
    Cm100By100,
}

impl SpecEnum for BoardSize {
    const ALL: &'static [Self] = &[BoardSize::Cm50By50, BoardSize::Cm100By50, BoardSize::Cm100By100];
    const NAMES: &'static [&'static str] = &["50x50cm", "100x50cm", "100x100cm"];

    fn as_str(&self) -> &'static str {
        match self {
            BoardSize::Cm50By50 => "50x50cm",
            BoardSize::Cm100By50 => "100x50cm",
            BoardSize::Cm100By100 => "100x100cm",
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! 预拌混凝土枚举

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SpecEnum;

/// 稠度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Consistency {
    #[default]
    Wet,
    Dry,
}

impl SpecEnum for Consistency {
    const ALL: &'static [Self] = &[Consistency::Wet, Consistency::Dry];
    const NAMES: &'static [&'static str] = &["Wet", "Dry"];

    fn as_str(&self) -> &'static str {
        match self {
            Consistency::Wet => "Wet",
            Consistency::Dry => "Dry",
        }
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 骨料
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Aggregate {
    /// 细砾石
    #[default]
    SmallGravel,
    /// 粗砾石
    LargeGravel,
    /// 碎石
    CrushedStone,
}

impl SpecEnum for Aggregate {
    const ALL: &'static [Self] = &[
        Aggregate::SmallGravel,
        Aggregate::LargeGravel,
        Aggregate::CrushedStone,
    ];
    const NAMES: &'static [&'static str] = &["SmallGravel", "LargeGravel", "CrushedStone"];

    fn as_str(&self) -> &'static str {
        match self {
            Aggregate::SmallGravel => "SmallGravel",
            Aggregate::LargeGravel => "LargeGravel",
            Aggregate::CrushedStone => "CrushedStone",
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

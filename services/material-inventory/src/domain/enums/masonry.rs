//! 砌体材料枚举（砖、加气砌块）

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SpecEnum;

/// 砖的形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrickForm {
    /// 实心砖
    #[default]
    Solid,
    /// 多孔砖
    AirCell,
}

impl SpecEnum for BrickForm {
    const ALL: &'static [Self] = &[BrickForm::Solid, BrickForm::AirCell];
    const NAMES: &'static [&'static str] = &["Solid", "AirCell"];

    fn as_str(&self) -> &'static str {
        match self {
            BrickForm::Solid => "Solid",
            BrickForm::AirCell => "AirCell",
        }
    }
}

impl fmt::Display for BrickForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 加气砌块的接缝类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AeratedBlockType {
    /// 平面砌块
    #[default]
    Smooth,
    /// 企口砌块
    Interlocking,
}

impl SpecEnum for AeratedBlockType {
    const ALL: &'static [Self] = &[AeratedBlockType::Smooth, AeratedBlockType::Interlocking];
    const NAMES: &'static [&'static str] = &["Smooth", "Interlocking"];

    fn as_str(&self) -> &'static str {
        match self {
            AeratedBlockType::Smooth => "Smooth",
            AeratedBlockType::Interlocking => "Interlocking",
        }
    }
}

impl fmt::Display for AeratedBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::spec_enum::assert_names_consistent;

    #[test]
    fn test_names_consistent() {
        assert_names_consistent::<BrickForm>();
        assert_names_consistent::<AeratedBlockType>();
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(BrickForm::parse("AirCell"), Some(BrickForm::AirCell));
        assert_eq!(BrickForm::parse("aircell"), None);
        assert_eq!(BrickForm::parse("Triangular"), None);
    }
}

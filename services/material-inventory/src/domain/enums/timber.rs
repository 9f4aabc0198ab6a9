//! 木材枚举

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SpecEnum;

/// 木板截面尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlankSize {
    /// 5×10 cm
    #[default]
    #[serde(rename = "5x10cm")]
    Cm5By10,
    /// 5×15 cm
    #[serde(rename = "5x15cm")]
    Cm5By15,
    /// 7.5×15 cm
    #[serde(rename = "7.5x15cm")]
    Cm7HalfBy15,
    /// 7.5×20 cm
    #[serde(rename = "7.5x20cm")]
    Cm7HalfBy20,
}

impl SpecEnum for PlankSize {
    const ALL: &'static [Self] = &[
        PlankSize::Cm5By10,
        PlankSize::Cm5By15,
        PlankSize::Cm7HalfBy15,
        PlankSize::Cm7HalfBy20,
    ];
    const NAMES: &'static [&'static str] = &["5x10cm", "5x15cm", "7.5x15cm", "7.5x20cm"];

    fn as_str(&self) -> &'static str {
        match self {
            PlankSize::Cm5By10 => "5x10cm",
            PlankSize::Cm5By15 => "5x15cm",
            PlankSize::Cm7HalfBy15 => "7.5x15cm",
            PlankSize::Cm7HalfBy20 => "7.5x20cm",
        }
    }
}

impl fmt::Display for PlankSize {
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
        assert_names_consistent::<PlankSize>();
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&PlankSize::Cm7HalfBy20).unwrap();
        assert_eq!(json, "\"7.5x20cm\"");
    }
}

//! 各变体的独有属性规则

use serde::{Deserialize, Serialize};

use super::{Bounds, RuleSet};
use crate::domain::value_objects::attribute::names;

macro_rules! rule_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($field:ident: $attribute:expr => ($min:expr, $max:expr)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(pub $field: Bounds,)+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: Bounds::fixed($min, $max),)+
                }
            }
        }

        impl RuleSet for $name {
            fn bounds(&self, field: &str) -> Option<Bounds> {
                $(
                    if field == $attribute {
                        return Some(self.$field);
                    }
                )+
                None
            }
        }
    };
}

rule_set! {
    /// 砖：厚度 (cm)
    BrickRules {
        thickness: names::THICKNESS => (10.0, 40.0),
    }
}

rule_set! {
    /// 加气砌块：厚度、长度 (cm)
    AeratedBlockRules {
        thickness: names::THICKNESS => (10.0, 30.0),
        length: names::LENGTH => (40.0, 110.0),
    }
}

rule_set! {
    /// 梁：直径 (cm)、长度 (m)
    BeamRules {
        diameter: names::DIAMETER => (10.0, 25.0),
        length: names::LENGTH => (2.0, 8.0),
    }
}

rule_set! {
    /// 板材：长度 (m)
    PlankRules {
        length: names::LENGTH => (1.0, 6.0),
    }
}

rule_set! {
    /// 商品混凝土：水泥含量 (%)
    ReadyMixConcreteRules {
        cement_content: names::CEMENT_CONTENT => (10.0, 32.0),
    }
}

rule_set! {
    /// 碎石骨料：粒径 (mm)、密度 (kg/m³)
    CrushedStoneRules {
        grain_size: names::GRAIN_SIZE => (5.0, 40.0),
        density: names::DENSITY => (1200.0, 2400.0),
    }
}

rule_set! {
    /// 矿棉：厚度 (cm)
    MineralWoolRules {
        thickness: names::THICKNESS => (5.0, 20.0),
    }
}

rule_set! {
    /// 泡沫板：厚度 (cm)
    FoamBoardRules {
        thickness: names::THICKNESS => (5.0, 20.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::ValidationError;

    #[test]
    fn test_default_bounds_are_inclusive() {
        let cases: [(&dyn RuleSet, &str, f64, f64); 10] = [
            (&BrickRules::default(), names::THICKNESS, 10.0, 40.0),
            (&AeratedBlockRules::default(), names::THICKNESS, 10.0, 30.0),
            (&AeratedBlockRules::default(), names::LENGTH, 40.0, 110.0),
            (&BeamRules::default(), names::DIAMETER, 10.0, 25.0),
            (&BeamRules::default(), names::LENGTH, 2.0, 8.0),
            (&PlankRules::default(), names::LENGTH, 1.0, 6.0),
            (&ReadyMixConcreteRules::default(), names::CEMENT_CONTENT, 10.0, 32.0),
            (&CrushedStoneRules::default(), names::GRAIN_SIZE, 5.0, 40.0),
            (&CrushedStoneRules::default(), names::DENSITY, 1200.0, 2400.0),
            (&MineralWoolRules::default(), names::THICKNESS, 5.0, 20.0),
        ];
        let epsilon = 1e-6;
        for (rules, field, min, max) in cases {
            assert_eq!(rules.validate(field, min), Ok(min), "{field} min");
            assert_eq!(rules.validate(field, max), Ok(max), "{field} max");
            assert!(
                matches!(
                    rules.validate(field, min - epsilon),
                    Err(ValidationError::BelowMinimum { .. })
                ),
                "{field} below min"
            );
            assert!(
                matches!(
                    rules.validate(field, max + epsilon),
                    Err(ValidationError::AboveMaximum { .. })
                ),
                "{field} above max"
            );
        }
    }

    #[test]
    fn test_unknown_field() {
        let rules = PlankRules::default();
        assert_eq!(
            rules.validate(names::THICKNESS, 1.0),
            Err(ValidationError::UnknownField("thickness".to_string()))
        );
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let rules: AeratedBlockRules =
            serde_json::from_str(r#"{"length": {"min": 50.0, "max": 60.0}}"#).unwrap();
        assert_eq!(rules.length.min(), 50.0);
        assert_eq!(rules.thickness, AeratedBlockRules::default().thickness);
    }
}

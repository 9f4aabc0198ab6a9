//! 校验边界与含税价测试

use std::sync::Arc;

use material_inventory::domain::rules::{RuleBook, ValidationError};
use material_inventory::domain::{
    AttributeValue, Beam, Brick, BrickForm, Material, MaterialVariant, Plank, PlankSize, SpecEnum,
    VariantTag,
};

const EPSILON: f64 = 1e-6;

fn rules() -> Arc<RuleBook> {
    Arc::new(RuleBook::default())
}

/// (标签, 属性, 下限, 上限)
const BOUNDED_FIELDS: &[(VariantTag, &str, f64, f64)] = &[
    (VariantTag::Brick, "thickness", 10.0, 40.0),
    (VariantTag::AeratedBlock, "thickness", 10.0, 30.0),
    (VariantTag::AeratedBlock, "length", 40.0, 110.0),
    (VariantTag::Beam, "diameter", 10.0, 25.0),
    (VariantTag::Beam, "length", 2.0, 8.0),
    (VariantTag::Plank, "length", 1.0, 6.0),
    (VariantTag::ReadyMixConcrete, "cementContent", 10.0, 32.0),
    (VariantTag::CrushedStoneAggregate, "grainSize", 5.0, 40.0),
    (VariantTag::CrushedStoneAggregate, "density", 1200.0, 2400.0),
    (VariantTag::MineralWool, "thickness", 5.0, 20.0),
    (VariantTag::FoamBoard, "thickness", 5.0, 20.0),
];

#[test]
fn test_every_bounded_field_accepts_limits_and_rejects_beyond() {
    for &(tag, field, min, max) in BOUNDED_FIELDS {
        let mut material = Material::placeholder(rules(), tag);

        for value in [min, max] {
            material
                .set_attribute(field, &AttributeValue::Number(value))
                .unwrap_or_else(|e| panic!("{tag}.{field} = {value}: {e}"));
        }

        let before = material.clone();
        let below = material
            .set_attribute(field, &AttributeValue::Number(min - EPSILON))
            .unwrap_err();
        assert!(
            matches!(below, ValidationError::BelowMinimum { field: ref name, .. } if name == field),
            "{tag}.{field}: {below:?}"
        );
        let above = material
            .set_attribute(field, &AttributeValue::Number(max + EPSILON))
            .unwrap_err();
        assert!(
            matches!(above, ValidationError::AboveMaximum { .. }),
            "{tag}.{field}: {above:?}"
        );
        assert_eq!(material, before, "{tag}.{field} was partially applied");
    }
}

#[test]
fn test_bounded_fields_cover_all_numeric_attributes() {
    let numeric: usize = VariantTag::ALL
        .iter()
        .map(|tag| {
            tag.attributes()
                .iter()
                .filter(|def| def.kind.label() == "number")
                .count()
        })
        .sum();
    assert_eq!(numeric, BOUNDED_FIELDS.len());
}

#[test]
fn test_shared_field_rules() {
    let brick = || {
        MaterialVariant::Brick(Brick {
            form: BrickForm::Solid,
            thickness: 15.0,
        })
    };
    assert!(Material::with_identity(rules(), 0, "Brick", brick(), 0.0, 0.0).is_ok());
    assert!(Material::with_identity(rules(), 1, "Brick", brick(), 0.0, 50.0).is_ok());
    assert_eq!(
        Material::with_identity(rules(), -3, "Brick", brick(), 0.0, 0.0).unwrap_err(),
        ValidationError::NegativeId(-3)
    );
    assert_eq!(
        Material::with_identity(rules(), 1, " \t", brick(), 0.0, 0.0).unwrap_err(),
        ValidationError::EmptyName
    );
    assert!(matches!(
        Material::with_identity(rules(), 1, "Brick", brick(), -EPSILON, 0.0).unwrap_err(),
        ValidationError::BelowMinimum { .. }
    ));
    assert!(matches!(
        Material::with_identity(rules(), 1, "Brick", brick(), 0.0, 50.0 + EPSILON).unwrap_err(),
        ValidationError::AboveMaximum { .. }
    ));
}

#[test]
fn test_configured_bounds_replace_defaults() {
    let mut book = RuleBook::default();
    book.brick.thickness = material_inventory::domain::rules::Bounds::new(20.0, 25.0).unwrap();
    let book = Arc::new(book);

    let thin = MaterialVariant::Brick(Brick {
        form: BrickForm::Solid,
        thickness: 15.0,
    });
    assert!(Material::new(Arc::clone(&book), thin.clone(), 1.0, 1.0).is_err());
    assert!(Material::new(rules(), thin, 1.0, 1.0).is_ok());
}

#[test]
fn test_gross_price_brick() {
    let material = Material::new(
        rules(),
        MaterialVariant::Brick(Brick {
            form: BrickForm::Solid,
            thickness: 15.0,
        }),
        1000.0,
        27.0,
    )
    .unwrap();
    assert!((material.gross_price() - 1270.0).abs() < 1e-9);
}

#[test]
fn test_gross_price_beam_is_per_running_meter() {
    let material = Material::new(
        rules(),
        MaterialVariant::Beam(Beam {
            diameter: 15.0,
            length: 4.0,
            insect_treated: false,
        }),
        1000.0,
        27.0,
    )
    .unwrap();
    assert!((material.gross_price() - 5080.0).abs() < 1e-9);
}

#[test]
fn test_gross_price_plank_is_per_running_meter() {
    let material = Material::new(
        rules(),
        MaterialVariant::Plank(Plank {
            size: PlankSize::Cm5By15,
            length: 2.5,
            insect_treated: true,
        }),
        400.0,
        0.0,
    )
    .unwrap();
    assert!((material.gross_price() - 1000.0).abs() < 1e-9);
}

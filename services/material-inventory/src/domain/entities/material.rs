//! 材料实体

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::enums::{MaterialKind, SpecEnum, VariantTag};
use crate::domain::rules::{RuleBook, RuleSet, ValidationError};
use crate::domain::value_objects::attribute::names;
use crate::domain::value_objects::{
    AttributeDescriptor, AttributeError, AttributeKind, AttributeValue, MaterialId, Specification,
};

use super::MaterialVariant;

/// 编辑器回写的属性修改（属性名 -> 新值）
pub type AttributeEdits = BTreeMap<String, AttributeValue>;

/// 材料
///
/// 共享字段 (id, 名称, 净价, 增值税率) 加一个变体载荷。
/// 所有字段在构造与每次修改时校验，非法值不会被部分写入。
#[derive(Debug, Clone)]
pub struct Material {
    id: MaterialId,
    name: String,
    unit_price: f64,
    vat_percent: f64,
    variant: MaterialVariant,
    rules: Arc<RuleBook>,
}

impl Material {
    /// 创建临时材料（id = 0，名称为变体标签）
    pub fn new(
        rules: Arc<RuleBook>,
        variant: MaterialVariant,
        unit_price: f64,
        vat_percent: f64,
    ) -> Result<Self, ValidationError> {
        let name = variant.tag().as_str();
        Self::with_identity(rules, 0, name, variant, unit_price, vat_percent)
    }

    /// 由完整的原始输入构造，按 id、名称、净价、税率、独有属性的顺序校验
    pub fn with_identity(
        rules: Arc<RuleBook>,
        id: i64,
        name: &str,
        variant: MaterialVariant,
        unit_price: f64,
        vat_percent: f64,
    ) -> Result<Self, ValidationError> {
        let id = rules.material.parse_id(id)?;
        Self::restore(rules, id, name, variant, unit_price, vat_percent)
    }

    /// 以已分配的 id 重建材料（id 来自仓储，其余字段照常校验）
    pub fn restore(
        rules: Arc<RuleBook>,
        id: MaterialId,
        name: &str,
        variant: MaterialVariant,
        unit_price: f64,
        vat_percent: f64,
    ) -> Result<Self, ValidationError> {
        let name = rules.material.parse_name(name)?;
        let unit_price = rules.material.parse_unit_price(unit_price)?;
        let vat_percent = rules.material.parse_vat(vat_percent)?;
        variant.validate(&rules)?;

        Ok(Self {
            id,
            name,
            unit_price,
            vat_percent,
            variant,
            rules,
        })
    }

    /// 选定变体之前的占位材料
    pub fn placeholder(rules: Arc<RuleBook>, tag: VariantTag) -> Self {
        let variant = MaterialVariant::placeholder(tag, &rules);
        Self {
            id: MaterialId::TRANSIENT,
            name: tag.as_str().to_string(),
            unit_price: rules.material.min_unit_price(),
            vat_percent: rules.material.min_vat_percent(),
            variant,
            rules,
        }
    }

    pub fn id(&self) -> MaterialId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn vat_percent(&self) -> f64 {
        self.vat_percent
    }

    pub fn variant(&self) -> &MaterialVariant {
        &self.variant
    }

    pub fn tag(&self) -> VariantTag {
        self.variant.tag()
    }

    pub fn kind(&self) -> MaterialKind {
        self.variant.tag().kind()
    }

    pub fn rules(&self) -> &Arc<RuleBook> {
        &self.rules
    }

    pub fn is_transient(&self) -> bool {
        self.id.is_transient()
    }

    /// 持久化后由仓储分配的 id
    pub fn assign_id(&mut self, id: MaterialId) {
        self.id = id;
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = self.rules.material.parse_name(name)?;
        Ok(())
    }

    pub fn set_unit_price(&mut self, value: f64) -> Result<(), ValidationError> {
        self.unit_price = self.rules.material.parse_unit_price(value)?;
        Ok(())
    }

    pub fn set_vat_percent(&mut self, value: f64) -> Result<(), ValidationError> {
        self.vat_percent = self.rules.material.parse_vat(value)?;
        Ok(())
    }

    /// 按属性名写入，共享字段与独有属性都经过各自的 setter
    pub fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> Result<(), ValidationError> {
        match name {
            names::NAME => self.set_name(value.as_text(name)?),
            names::UNIT_PRICE => self.set_unit_price(value.as_number(name)?),
            names::VAT_PERCENT => self.set_vat_percent(value.as_number(name)?),
            _ => {
                let rules = Arc::clone(&self.rules);
                self.variant.set_attribute(name, value, &rules)
            }
        }
    }

    /// 应用编辑器回写的全部修改
    ///
    /// 每个修改都会尝试，收集全部失败；只要有一个失败，材料保持原样。
    pub fn apply_edits(&mut self, edits: &AttributeEdits) -> Result<(), Vec<AttributeError>> {
        let mut working = self.clone();
        let errors: Vec<AttributeError> = edits
            .iter()
            .filter_map(|(attribute, value)| {
                working
                    .set_attribute(attribute, value)
                    .err()
                    .map(|error| AttributeError {
                        attribute: attribute.clone(),
                        error,
                    })
            })
            .collect();

        if !errors.is_empty() {
            return Err(errors);
        }
        *self = working;
        Ok(())
    }

    /// 含税价；梁和板材再乘以长度（按延米报价）
    pub fn gross_price(&self) -> f64 {
        let gross = self.unit_price * (1.0 + self.vat_percent / 100.0);
        match self.variant.running_length() {
            Some(length) => gross * length,
            None => gross,
        }
    }

    pub fn canonical_specification(&self) -> Specification {
        self.variant.specification()
    }

    /// 编辑器属性描述：共享字段在前，独有属性按声明顺序在后
    pub fn descriptors(&self) -> Vec<AttributeDescriptor> {
        let material_rules = &self.rules.material;
        let mut descriptors = vec![
            AttributeDescriptor {
                name: names::NAME,
                value: AttributeValue::Text(self.name.clone()),
                kind: AttributeKind::Text,
                bounds: None,
            },
            AttributeDescriptor {
                name: names::UNIT_PRICE,
                value: AttributeValue::Number(self.unit_price),
                kind: AttributeKind::Number,
                bounds: material_rules.bounds(names::UNIT_PRICE),
            },
            AttributeDescriptor {
                name: names::VAT_PERCENT,
                value: AttributeValue::Number(self.vat_percent),
                kind: AttributeKind::Number,
                bounds: material_rules.bounds(names::VAT_PERCENT),
            },
        ];

        let tag = self.tag();
        let variant_rules = self.rules.for_tag(tag);
        let specification = self.variant.specification();
        descriptors.extend(specification.iter().zip(tag.attributes()).map(
            |((name, value), def)| AttributeDescriptor {
                name,
                value: value.clone(),
                kind: def.kind,
                bounds: variant_rules.bounds(name),
            },
        ));
        descriptors
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.unit_price == other.unit_price
            && self.vat_percent == other.vat_percent
            && self.variant == other.variant
    }
}

//! 文本交换格式
//!
//! 每种材料一对以 `;` 分隔的表头行与数值行：
//!
//! ```text
//! tag;name;unitPrice;vatPercent;materialKind;form;thickness
//! Brick;Kisméretű tégla;1000;27;Hard;Solid;15
//! ```
//!
//! 导入时按表头名取值，列顺序不限，但列集合必须与该变体完全一致。
//! 含 `;` 或换行的值无法表示，导出时拒绝。

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::Material;
use crate::domain::enums::{MaterialKind, SpecEnum, UnknownTagError, VariantTag};
use crate::domain::rules::{RuleBook, ValidationError};
use crate::domain::value_objects::attribute::names;
use crate::domain::value_objects::{AttributeKind, AttributeValue};

const DELIMITER: &str = ";";

/// 交换格式错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    #[error("交换文本需要表头行和数值行")]
    MissingLines,
    #[error("列数不一致: 表头 {headers} 列, 数值 {values} 列")]
    ColumnCountMismatch { headers: usize, values: usize },
    #[error("缺少列: {0}")]
    MissingColumn(String),
    #[error("重复列: {0}")]
    DuplicateColumn(String),
    #[error("多余列: {0}")]
    UnexpectedColumn(String),
    #[error("列 {column} 的值无法解析: {value}")]
    InvalidValue { column: String, value: String },
    #[error("列 {column} 的值含分隔符或换行，无法导出: {value:?}")]
    UnencodableValue { column: String, value: String },
    #[error("材料大类不符: {tag} 属于 {expected}, 文件中为 {found}")]
    KindMismatch {
        tag: VariantTag,
        expected: MaterialKind,
        found: String,
    },
    #[error(transparent)]
    UnknownTag(#[from] UnknownTagError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// 文本交换适配器
#[derive(Debug, Clone)]
pub struct TextExchange {
    rules: Arc<RuleBook>,
}

impl TextExchange {
    pub fn new(rules: Arc<RuleBook>) -> Self {
        Self { rules }
    }

    /// 导出为表头行 + 数值行（以换行结尾）
    pub fn export(&self, material: &Material) -> Result<String, ExchangeError> {
        let tag = material.tag();
        let mut headers = vec![
            names::TAG,
            names::NAME,
            names::UNIT_PRICE,
            names::VAT_PERCENT,
            names::MATERIAL_KIND,
        ];
        let mut values = vec![
            tag.as_str().to_string(),
            material.name().to_string(),
            material.unit_price().to_string(),
            material.vat_percent().to_string(),
            material.kind().as_str().to_string(),
        ];

        for (name, value) in material.canonical_specification().iter() {
            headers.push(name);
            values.push(value.to_string());
        }

        if let Some((column, value)) = headers
            .iter()
            .zip(&values)
            .find(|(_, value)| value.contains(DELIMITER) || value.contains(['\n', '\r']))
        {
            return Err(ExchangeError::UnencodableValue {
                column: column.to_string(),
                value: value.clone(),
            });
        }

        Ok(format!(
            "{}\n{}\n",
            headers.join(DELIMITER),
            values.join(DELIMITER)
        ))
    }

    /// 导入为临时材料 (id = 0)
    pub fn import(&self, text: &str) -> Result<Material, ExchangeError> {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let (header_line, value_line) = match (lines.next(), lines.next()) {
            (Some(headers), Some(values)) => (headers, values),
            _ => return Err(ExchangeError::MissingLines),
        };

        let headers: Vec<&str> = header_line.split(DELIMITER).map(str::trim).collect();
        let values: Vec<&str> = value_line.split(DELIMITER).map(str::trim).collect();
        if headers.len() != values.len() {
            return Err(ExchangeError::ColumnCountMismatch {
                headers: headers.len(),
                values: values.len(),
            });
        }

        let mut row = Row::default();
        for (header, value) in headers.into_iter().zip(values) {
            if row.cells.insert(header, value).is_some() {
                return Err(ExchangeError::DuplicateColumn(header.to_string()));
            }
        }

        let tag: VariantTag = row.take(names::TAG)?.parse()?;
        let kind = row.take(names::MATERIAL_KIND)?;
        if MaterialKind::parse(kind) != Some(tag.kind()) {
            return Err(ExchangeError::KindMismatch {
                tag,
                expected: tag.kind(),
                found: kind.to_string(),
            });
        }

        let mut material = Material::placeholder(Arc::clone(&self.rules), tag);
        material.set_name(row.take(names::NAME)?)?;
        material.set_unit_price(row.number(names::UNIT_PRICE)?)?;
        material.set_vat_percent(row.number(names::VAT_PERCENT)?)?;

        for def in tag.attributes() {
            let value = match def.kind {
                AttributeKind::Number => AttributeValue::Number(row.number(def.name)?),
                AttributeKind::Bool => AttributeValue::Bool(row.boolean(def.name)?),
                AttributeKind::Enum(_) | AttributeKind::Text => {
                    AttributeValue::Text(row.take(def.name)?.to_string())
                }
            };
            material.set_attribute(def.name, &value)?;
        }

        row.finish()?;
        Ok(material)
    }
}

/// 表头名 -> 单元格
#[derive(Default)]
struct Row<'a> {
    cells: HashMap<&'a str, &'a str>,
}

impl<'a> Row<'a> {
    fn take(&mut self, column: &str) -> Result<&'a str, ExchangeError> {
        self.cells
            .remove(column)
            .ok_or_else(|| ExchangeError::MissingColumn(column.to_string()))
    }

    fn number(&mut self, column: &str) -> Result<f64, ExchangeError> {
        let cell = self.take(column)?;
        cell.parse::<f64>()
            .map_err(|_| ExchangeError::InvalidValue {
                column: column.to_string(),
                value: cell.to_string(),
            })
    }

    fn boolean(&mut self, column: &str) -> Result<bool, ExchangeError> {
        let cell = self.take(column)?;
        if cell.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if cell.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ExchangeError::InvalidValue {
                column: column.to_string(),
                value: cell.to_string(),
            })
        }
    }

    fn finish(self) -> Result<(), ExchangeError> {
        let mut leftover: Vec<&str> = self.cells.into_keys().collect();
        leftover.sort_unstable();
        match leftover.first() {
            Some(column) => Err(ExchangeError::UnexpectedColumn(column.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Beam, MaterialVariant};

    fn exchange() -> TextExchange {
        TextExchange::new(Arc::new(RuleBook::default()))
    }

    #[test]
    fn test_export_layout() {
        let exchange = exchange();
        let beam = MaterialVariant::Beam(Beam {
            diameter: 12.5,
            length: 4.0,
            insect_treated: true,
        });
        let material = Material::new(Arc::clone(&exchange.rules), beam, 1000.0, 27.0).unwrap();
        assert_eq!(
            exchange.export(&material).unwrap(),
            "tag;name;unitPrice;vatPercent;materialKind;diameter;length;insectTreated\n\
             Beam;Beam;1000;27;Wood;12.5;4;true\n"
        );
    }

    #[test]
    fn test_import_any_column_order() {
        let text = "thickness;form;materialKind;vatPercent;unitPrice;name;tag\n\
                    8;Board;Insulation;5;2500;Kőzetgyapot;MineralWool\n\n";
        let material = exchange().import(text).unwrap();
        assert!(material.is_transient());
        assert_eq!(material.name(), "Kőzetgyapot");
        assert_eq!(material.tag(), VariantTag::MineralWool);
        assert_eq!(
            material.canonical_specification().get("form"),
            Some(&AttributeValue::Enum("Board"))
        );
    }

    #[test]
    fn test_import_booleans_case_insensitive() {
        let text = "tag;name;unitPrice;vatPercent;materialKind;grainSize;decorative;density\n\
                    CrushedStoneAggregate;Zúzottkő;9000;27;Hard;16;TRUE;1600";
        let material = exchange().import(text).unwrap();
        assert_eq!(
            material.canonical_specification().get("decorative"),
            Some(&AttributeValue::Bool(true))
        );
    }

    #[test]
    fn test_import_errors() {
        let exchange = exchange();
        assert_eq!(exchange.import("tag;name"), Err(ExchangeError::MissingLines));
        assert!(matches!(
            exchange.import("tag;name\nBrick"),
            Err(ExchangeError::ColumnCountMismatch { headers: 2, values: 1 })
        ));
        assert!(matches!(
            exchange.import("tag;name;unitPrice;vatPercent;materialKind;form\nBrick;b;1;1;Hard;Solid"),
            Err(ExchangeError::MissingColumn(column)) if column == "thickness"
        ));
        assert!(matches!(
            exchange.import("tag;name;unitPrice;vatPercent;materialKind;form;thickness\nBrick;b;1;1;Wood;Solid;15"),
            Err(ExchangeError::KindMismatch { .. })
        ));
        assert!(matches!(
            exchange.import("tag;name;unitPrice;vatPercent;materialKind;form;thickness\nBrick;b;abc;1;Hard;Solid;15"),
            Err(ExchangeError::InvalidValue { .. })
        ));
        assert!(matches!(
            exchange.import("tag;name;unitPrice;vatPercent;materialKind;form;thickness\nTile;b;1;1;Hard;Solid;15"),
            Err(ExchangeError::UnknownTag(_))
        ));
        assert!(matches!(
            exchange.import("tag;name;unitPrice;vatPercent;materialKind;form;thickness;color\nBrick;b;1;1;Hard;Solid;15;red"),
            Err(ExchangeError::UnexpectedColumn(column)) if column == "color"
        ));
        assert!(matches!(
            exchange.import("tag;name;unitPrice;vatPercent;materialKind;form;thickness\nBrick;b;1;1;Hard;Solid;45"),
            Err(ExchangeError::Validation(ValidationError::AboveMaximum { .. }))
        ));
    }

    #[test]
    fn test_export_then_import_keeps_material() {
        let exchange = exchange();
        let text = "tag;name;unitPrice;vatPercent;materialKind;size;length;insectTreated\n\
                    Plank;Gyalult deszka;1890.5;27;Wood;7.5x15cm;3.5;false\n";
        let material = exchange.import(text).unwrap();
        assert_eq!(exchange.export(&material).unwrap(), text);
    }

    #[test]
    fn test_export_rejects_name_with_delimiter_or_newline() {
        let exchange = exchange();
        let beam = MaterialVariant::Beam(Beam {
            diameter: 12.5,
            length: 4.0,
            insect_treated: true,
        });
        for name in ["Gerenda; gyalult", "Gerenda\ngyalult"] {
            let mut material =
                Material::new(Arc::clone(&exchange.rules), beam.clone(), 1000.0, 27.0).unwrap();
            material.set_name(name).unwrap();
            assert!(matches!(
                exchange.export(&material),
                Err(ExchangeError::UnencodableValue { column, .. }) if column == "name"
            ));
        }
    }
}

//! 库存服务错误

use errors::AppError;
use thiserror::Error;

use crate::domain::codec::DecodeError;
use crate::domain::rules::ValidationError;
use crate::domain::value_objects::{AttributeError, MaterialId, StorageLocationId};
use crate::infrastructure::exchange::ExchangeError;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),
    #[error("Quantity must not be negative, got {0}")]
    NegativeQuantity(i64),
    #[error("Inserted material could not be found again by its specification ({tag})")]
    InsertVerificationFailed { tag: String },
    #[error("Storage location not found: {0}")]
    LocationNotFound(StorageLocationId),
    #[error("Material not found: {0}")]
    MaterialNotFound(MaterialId),
    #[error("Material {material_id} is not held at location {location_id}")]
    HoldingNotFound {
        location_id: StorageLocationId,
        material_id: MaterialId,
    },
    #[error("Quantity overflow at location {location_id} for material {material_id}")]
    QuantityOverflow {
        location_id: StorageLocationId,
        material_id: MaterialId,
    },
    #[error("Specification already belongs to material {0}")]
    SpecificationTaken(MaterialId),
    #[error("Invalid attributes: {}", format_attribute_errors(.0))]
    InvalidAttributes(Vec<AttributeError>),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    #[error(transparent)]
    Storage(#[from] AppError),
}

fn format_attribute_errors(errors: &[AttributeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<InventoryError> for AppError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::NonPositiveQuantity(_)
            | InventoryError::NegativeQuantity(_)
            | InventoryError::InvalidAttributes(_)
            | InventoryError::Validation(_)
            | InventoryError::Decode(_)
            | InventoryError::Exchange(_) => AppError::validation(error.to_string()),
            InventoryError::LocationNotFound(_)
            | InventoryError::MaterialNotFound(_)
            | InventoryError::HoldingNotFound { .. } => AppError::not_found(error.to_string()),
            InventoryError::SpecificationTaken(_) => AppError::conflict(error.to_string()),
            InventoryError::InsertVerificationFailed { .. }
            | InventoryError::QuantityOverflow { .. } => AppError::internal(error.to_string()),
            InventoryError::Storage(inner) => inner,
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error_kinds() {
        assert!(matches!(
            AppError::from(InventoryError::NonPositiveQuantity(0)),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(InventoryError::MaterialNotFound(MaterialId(9))),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(InventoryError::SpecificationTaken(MaterialId(2))),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(InventoryError::InsertVerificationFailed { tag: "Brick".into() }),
            AppError::Internal(_)
        ));
        let storage = AppError::storage("disk full");
        assert_eq!(AppError::from(InventoryError::Storage(storage.clone())), storage);
    }

    #[test]
    fn test_invalid_attributes_lists_every_failure() {
        let error = InventoryError::InvalidAttributes(vec![
            AttributeError {
                attribute: "thickness".into(),
                error: ValidationError::UnknownField("thickness".into()),
            },
            AttributeError {
                attribute: "name".into(),
                error: ValidationError::EmptyName,
            },
        ]);
        let message = error.to_string();
        assert!(message.contains("thickness"));
        assert!(message.contains("name"));
    }
}

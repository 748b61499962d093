use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Kitchen errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KitchenError {
    #[error("Inventory item not found: {0}")]
    ItemNotFound(i64),

    #[error("No diners today, nothing to deduct")]
    NoDiners,

    #[error("Invalid inventory item: {0}")]
    InvalidItem(String),
}

impl From<KitchenError> for AppError {
    fn from(err: KitchenError) -> Self {
        match &err {
            KitchenError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::InventoryItemNotFound, err.to_string()).with_detail("item_id", *id)
            }
            KitchenError::NoDiners => AppError::with_message(ErrorCode::InvalidGuestCount, err.to_string()),
            KitchenError::InvalidItem(_) => AppError::validation(err.to_string()),
        }
    }
}

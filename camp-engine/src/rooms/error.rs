use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Room operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room not found: {0}")]
    NotFound(String),

    #[error("Room {0} is not occupied")]
    NotOccupied(String),

    #[error("Room {code} cannot take a guest while {status}")]
    NotAvailable { code: String, status: String },

    #[error("Room {0} is already occupied")]
    Occupied(String),

    #[error("Room {code} is {status}, swap needs confirmation")]
    NeedsConfirmation { code: String, status: String },

    #[error("Cannot swap room {0} with itself")]
    SameRoom(String),
}

impl From<RoomError> for AppError {
    fn from(err: RoomError) -> Self {
        let code = match &err {
            RoomError::NotFound(_) => ErrorCode::RoomNotFound,
            RoomError::NotOccupied(_) => ErrorCode::RoomNotOccupied,
            RoomError::NotAvailable { .. } => ErrorCode::RoomNotAvailable,
            RoomError::Occupied(_) => ErrorCode::RoomOccupied,
            RoomError::NeedsConfirmation { .. } => ErrorCode::SwapNeedsConfirmation,
            RoomError::SameRoom(_) => ErrorCode::InvalidRequest,
        };
        AppError::with_message(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_room_codes() {
        let err: AppError = RoomError::NotFound("x-1".into()).into();
        assert_eq!(err.code, ErrorCode::RoomNotFound);
        assert_eq!(err.message, "Room not found: x-1");

        let err: AppError = RoomError::NeedsConfirmation {
            code: "12".into(),
            status: "待清潔".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::SwapNeedsConfirmation);
    }
}

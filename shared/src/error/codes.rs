//! Unified error codes for the Camp workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Equipment errors
//! - 5xxx: Import / backup errors
//! - 6xxx: Kitchen inventory errors
//! - 7xxx: Room errors
//! - 8xxx: Member errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the console and the
/// persisted logs agree on a single numeric vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Equipment ====================
    /// No spare blanket left in the warehouse
    WarehouseEmpty = 4001,
    /// Room has no blanket to move or mark broken
    NoBlanketInRoom = 4002,
    /// Room has no broken blanket to repair
    NoBrokenBlanket = 4003,

    // ==================== 5xxx: Import ====================
    /// Import contains no usable rows
    ImportNoRows = 5001,
    /// Occupancy sheet analysis failed
    ImportAnalysisFailed = 5002,
    /// Backup file is malformed
    BackupInvalid = 5003,

    // ==================== 6xxx: Inventory ====================
    /// Inventory item not found
    InventoryItemNotFound = 6001,
    /// Guest count must be positive
    InvalidGuestCount = 6002,

    // ==================== 7xxx: Room ====================
    /// Room not found
    RoomNotFound = 7001,
    /// Room is not occupied
    RoomNotOccupied = 7002,
    /// Room cannot accept a guest in its current status
    RoomNotAvailable = 7003,
    /// Room is already occupied
    RoomOccupied = 7004,
    /// Swap target needs explicit confirmation
    SwapNeedsConfirmation = 7005,
    /// Quick command is empty
    CommandEmpty = 7006,
    /// Quick command produced no applicable update
    CommandNothingApplied = 7007,

    // ==================== 8xxx: Member ====================
    /// Member not found
    MemberNotFound = 8001,

    // ==================== 9xxx: System ====================
    /// Snapshot storage failed
    StorageError = 9002,
    /// Network failure talking to a collaborator
    NetworkError = 9003,
    /// Collaborator returned an unusable response
    CollaboratorError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Equipment
            ErrorCode::WarehouseEmpty => "No spare blanket in the warehouse",
            ErrorCode::NoBlanketInRoom => "Room has no blanket",
            ErrorCode::NoBrokenBlanket => "Room has no broken blanket",

            // Import
            ErrorCode::ImportNoRows => "Import contains no usable rows",
            ErrorCode::ImportAnalysisFailed => "Occupancy sheet analysis failed",
            ErrorCode::BackupInvalid => "Backup file format is invalid",

            // Inventory
            ErrorCode::InventoryItemNotFound => "Inventory item not found",
            ErrorCode::InvalidGuestCount => "Guest count must be positive",

            // Room
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomNotOccupied => "Room is not occupied",
            ErrorCode::RoomNotAvailable => "Room is not available for check-in",
            ErrorCode::RoomOccupied => "Room is already occupied",
            ErrorCode::SwapNeedsConfirmation => "Swap target requires confirmation",
            ErrorCode::CommandEmpty => "Command is empty",
            ErrorCode::CommandNothingApplied => "Command produced no applicable update",

            // Member
            ErrorCode::MemberNotFound => "Member not found",

            // System
            ErrorCode::StorageError => "Snapshot storage failed",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::CollaboratorError => "Collaborator returned an invalid response",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Equipment
            4001 => Ok(ErrorCode::WarehouseEmpty),
            4002 => Ok(ErrorCode::NoBlanketInRoom),
            4003 => Ok(ErrorCode::NoBrokenBlanket),

            // Import
            5001 => Ok(ErrorCode::ImportNoRows),
            5002 => Ok(ErrorCode::ImportAnalysisFailed),
            5003 => Ok(ErrorCode::BackupInvalid),

            // Inventory
            6001 => Ok(ErrorCode::InventoryItemNotFound),
            6002 => Ok(ErrorCode::InvalidGuestCount),

            // Room
            7001 => Ok(ErrorCode::RoomNotFound),
            7002 => Ok(ErrorCode::RoomNotOccupied),
            7003 => Ok(ErrorCode::RoomNotAvailable),
            7004 => Ok(ErrorCode::RoomOccupied),
            7005 => Ok(ErrorCode::SwapNeedsConfirmation),
            7006 => Ok(ErrorCode::CommandEmpty),
            7007 => Ok(ErrorCode::CommandNothingApplied),

            // Member
            8001 => Ok(ErrorCode::MemberNotFound),

            // System
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::CollaboratorError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

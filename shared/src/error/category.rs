//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 4xxx: Equipment errors
/// - 5xxx: Import errors
/// - 6xxx: Inventory errors
/// - 7xxx: Room errors
/// - 8xxx: Member errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Equipment errors (4xxx)
    Equipment,
    /// Import errors (5xxx)
    Import,
    /// Inventory errors (6xxx)
    Inventory,
    /// Room errors (7xxx)
    Room,
    /// Member errors (8xxx)
    Member,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            4000..5000 => Self::Equipment,
            5000..6000 => Self::Import,
            6000..7000 => Self::Inventory,
            7000..8000 => Self::Room,
            8000..9000 => Self::Member,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Equipment => "equipment",
            Self::Import => "import",
            Self::Inventory => "inventory",
            Self::Room => "room",
            Self::Member => "member",
            Self::System => "system",
        }
    }

    /// Whether errors of this category are per-item input or precondition
    /// failures (as opposed to collaborator/system failures)
    pub fn is_operator_facing(&self) -> bool {
        !matches!(self, Self::System)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

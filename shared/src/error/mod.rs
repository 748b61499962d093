//! Unified error system for the Camp workspace
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Equipment (electric blanket) errors
//! - 5xxx: Import / backup errors
//! - 6xxx: Kitchen inventory errors
//! - 7xxx: Room errors
//! - 8xxx: Member errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::RoomNotFound);
//! assert_eq!(err.code.code(), 7001);
//!
//! let err = AppError::validation("guest count must be positive")
//!     .with_detail("field", "guests");
//! assert!(err.details.is_some());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};

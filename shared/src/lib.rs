//! Shared types for the Camp workspace
//!
//! Data models persisted in the resort snapshot, the unified error
//! system, and small utilities used by both `camp-engine` and
//! `camp-client`.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};

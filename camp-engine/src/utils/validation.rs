//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use super::AppError;

/// Entity names: guests, members, inventory items
pub const MAX_NAME_LEN: usize = 100;

/// Notes, reasons, booking remarks
pub const MAX_NOTE_LEN: usize = 1000;

/// Short identifiers: phone, unit, room code
pub const MAX_SHORT_TEXT_LEN: usize = 50;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a stock quantity: finite and not negative.
pub fn validate_quantity(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!("{field} must be a non-negative number"))
            .with_detail("field", field));
    }
    Ok(())
}

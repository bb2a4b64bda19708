//! Field checks shared by address and profile forms.

use crate::CommerceError;

/// Digits in a mobile number.
pub const PHONE_DIGITS: usize = 10;

/// Digits in a postal index number.
pub const PINCODE_DIGITS: usize = 6;

/// True when `value` is exactly `len` ASCII digits.
pub fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Require a non-blank field.
pub fn require(value: &str, field: &str) -> Result<(), CommerceError> {
    if value.trim().is_empty() {
        return Err(CommerceError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Require a 10-digit phone number.
pub fn require_phone(value: &str, field: &str) -> Result<(), CommerceError> {
    if !is_digits(value.trim(), PHONE_DIGITS) {
        return Err(CommerceError::validation(format!(
            "{} must be {} digits",
            field, PHONE_DIGITS
        )));
    }
    Ok(())
}

/// Require a 6-digit pincode.
pub fn require_pincode(value: &str) -> Result<(), CommerceError> {
    if !is_digits(value.trim(), PINCODE_DIGITS) {
        return Err(CommerceError::validation(format!(
            "Pincode must be {} digits",
            PINCODE_DIGITS
        )));
    }
    Ok(())
}

//! Screen-level input validation
//!
//! These checks gate the submit affordance of each auth screen. Failures
//! are logged and shown as a disabled button, never raised to the user.

use offbeat_model::{PHONE_NUMBER_LEN, PhoneNumber};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid {}-digit phone number", PHONE_NUMBER_LEN)]
    InvalidPhone,

    #[error("Please enter a valid {expected}-digit OTP")]
    IncompleteOtp { expected: usize },

    #[error("Please enter your name")]
    EmptyName,
}

pub fn validate_phone(raw: &str) -> Result<PhoneNumber, ValidationError> {
    PhoneNumber::parse(raw).map_err(|_| ValidationError::InvalidPhone)
}

pub fn validate_otp(code: &str, length: usize) -> Result<(), ValidationError> {
    let complete = code.chars().count() == length
        && code.chars().all(|c| c.is_ascii_digit());
    if complete {
        Ok(())
    } else {
        Err(ValidationError::IncompleteOtp { expected: length })
    }
}

/// Trimmed display name, rejecting blank input.
pub fn validate_full_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_must_be_ten_digits() {
        assert!(validate_phone("9876543210").is_ok());
        assert_eq!(validate_phone("98765"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn otp_must_fill_every_cell() {
        assert!(validate_otp("123456", 6).is_ok());
        assert_eq!(
            validate_otp("12345", 6),
            Err(ValidationError::IncompleteOtp { expected: 6 })
        );
        assert!(validate_otp("1234", 4).is_ok());
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(validate_full_name("  Asha ").unwrap(), "Asha");
        assert_eq!(validate_full_name(" \t"), Err(ValidationError::EmptyName));
    }

    #[test]
    fn messages_match_screen_copy() {
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Please enter a valid 10-digit phone number"
        );
        assert_eq!(
            ValidationError::IncompleteOtp { expected: 6 }.to_string(),
            "Please enter a valid 6-digit OTP"
        );
    }
}

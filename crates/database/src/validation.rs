//! Input validation for user-supplied fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid phone number format.
    InvalidPhone(String),
    /// Value outside of its allowed range.
    OutOfRange { field: String, min: i64, max: i64, actual: i64 },
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Value too short.
    TooShort { field: String, min: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidPhone(msg) => write!(f, "Invalid phone number: {}", msg),
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(f, "{} must be between {} and {} (got {})", field, min, max, actual),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::TooShort { field, min, actual } => {
                write!(f, "{} is too short ({} chars, min {})", field, actual, min)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for short text fields (names, titles).
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum allowed length for message and tip bodies.
pub const MAX_CONTENT_LENGTH: usize = 4096;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a phone number in E.164 form (`+` followed by 7 to 15 digits).
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Empty("phone".to_string()));
    }

    let digits = phone.strip_prefix('+').ok_or_else(|| {
        ValidationError::InvalidPhone("must start with + and a country code".to_string())
    })?;

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone(
            "must contain only digits after +".to_string(),
        ));
    }

    if !(7..=15).contains(&digits.len()) {
        return Err(ValidationError::InvalidPhone(format!(
            "must have 7 to 15 digits (got {})",
            digits.len()
        )));
    }

    Ok(())
}

/// Validate a required text field: non-blank and at most `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }

    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual: len,
        });
    }

    Ok(())
}

/// Validate a password for signup.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
            actual: len,
        });
    }
    Ok(())
}

/// Validate a percentage field (0..=100).
pub fn validate_percentage(field: &str, value: i64) -> Result<(), ValidationError> {
    if !(0..=100).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
            actual: value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        assert!(validate_phone("+15550001111").is_ok());
        assert!(validate_phone("+1234567").is_ok());
        assert!(validate_phone("  +447911123456  ").is_ok());
    }

    #[test]
    fn test_invalid_phones() {
        assert!(matches!(validate_phone(""), Err(ValidationError::Empty(_))));
        assert!(matches!(
            validate_phone("15550001111"),
            Err(ValidationError::InvalidPhone(_))
        ));
        assert!(matches!(
            validate_phone("+1555-000"),
            Err(ValidationError::InvalidPhone(_))
        ));
        assert!(matches!(
            validate_phone("+123"),
            Err(ValidationError::InvalidPhone(_))
        ));
        assert!(matches!(
            validate_phone("+1234567890123456"),
            Err(ValidationError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_required_field() {
        assert!(validate_required("partnerName", "Dana", MAX_NAME_LENGTH).is_ok());
        assert_eq!(
            validate_required("partnerName", "   ", MAX_NAME_LENGTH),
            Err(ValidationError::Empty("partnerName".to_string()))
        );

        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            validate_required("partnerName", &long, MAX_NAME_LENGTH),
            Err(ValidationError::TooLong { actual, .. }) if actual == MAX_NAME_LENGTH + 1
        ));
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("secret1").is_ok());
        assert!(matches!(
            validate_password("abc"),
            Err(ValidationError::TooShort { min: 6, actual: 3, .. })
        ));
    }

    #[test]
    fn test_percentage() {
        assert!(validate_percentage("responseRate", 0).is_ok());
        assert!(validate_percentage("responseRate", 100).is_ok());
        assert!(validate_percentage("responseRate", 101).is_err());
        assert!(validate_percentage("responseRate", -1).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::OutOfRange {
            field: "responseRate".to_string(),
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "responseRate must be between 0 and 100 (got 150)");
    }
}

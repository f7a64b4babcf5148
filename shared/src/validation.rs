//! Validation utilities for the RootCause Advisory Platform
//!
//! Includes India-specific validations for farmer phone numbers.

// ============================================================================
// Account Validations
// ============================================================================

/// Validate an Indian mobile phone number
/// Accepts: 9876543210, 98765-43210, +91 9876543210
pub fn validate_indian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Indian mobile: 10 digits starting with 6-9
    if digits.len() == 10 && digits.starts_with(['6', '7', '8', '9']) {
        return Ok(());
    }

    // With country code: 91 followed by the 10-digit number
    if digits.len() == 12
        && digits.starts_with("91")
        && digits[2..].starts_with(['6', '7', '8', '9'])
    {
        return Ok(());
    }

    Err("Invalid Indian mobile number")
}

/// Normalize a phone number to its bare 10-digit form
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 12 && digits.starts_with("91") {
        digits[2..].to_string()
    } else {
        digits
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if validator::validate_email(email) {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a person or organisation name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty");
    }
    if trimmed.len() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

// ============================================================================
// Prediction Input Validations
// ============================================================================

/// Validate a crop year for yield prediction
pub fn validate_crop_year(year: i32) -> Result<(), &'static str> {
    if !(1990..=2050).contains(&year) {
        return Err("Year must be between 1990 and 2050");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_indian_phones() {
        assert!(validate_indian_phone("9876543210").is_ok());
        assert!(validate_indian_phone("6012345678").is_ok());
        assert!(validate_indian_phone("98765-43210").is_ok());
        assert!(validate_indian_phone("+91 9876543210").is_ok());
    }

    #[test]
    fn invalid_indian_phones() {
        assert!(validate_indian_phone("12345").is_err()); // Too short
        assert!(validate_indian_phone("1234567890").is_err()); // Starts with 1
        assert!(validate_indian_phone("98765432101").is_err()); // 11 digits
        assert!(validate_indian_phone("+44 7700900123").is_err()); // Wrong country
    }

    #[test]
    fn phone_normalization() {
        assert_eq!(normalize_phone("+91 9876543210"), "9876543210");
        assert_eq!(normalize_phone("98765-43210"), "9876543210");
        assert_eq!(normalize_phone("9876543210"), "9876543210");
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("farmer@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn crop_year_bounds() {
        assert!(validate_crop_year(2024).is_ok());
        assert!(validate_crop_year(1990).is_ok());
        assert!(validate_crop_year(1889).is_err());
        assert!(validate_crop_year(2100).is_err());
    }
}

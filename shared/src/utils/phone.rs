//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").expect("E.164 pattern is valid")
});

/// Check if a phone number is in E.164 format (`+` and up to 15 digits)
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logging
///
/// Shows only the last 4 characters of the phone number.
///
/// ```
/// use otp_shared::phone::mask_phone_number;
/// assert_eq!(mask_phone_number("+1234567890"), "+******7890");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    if chars[0] == '+' {
        format!("+{}{}", "*".repeat(chars.len() - 5), visible)
    } else {
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+1234567890"), "+******7890");
        assert_eq!(mask_phone_number("+12345678901234"), "+**********1234");
        assert_eq!(mask_phone_number("1234567890"), "******7890");
        assert_eq!(mask_phone_number("123"), "***");
        assert_eq!(mask_phone_number("1234"), "****");
        assert_eq!(mask_phone_number(""), "");
    }

    #[test]
    fn test_is_valid_e164() {
        // Valid numbers
        assert!(is_valid_e164("+15551234567"));
        assert!(is_valid_e164("+79991234567"));
        assert!(is_valid_e164("+12"));
        assert!(is_valid_e164("+123456789012345"));

        // Invalid numbers
        assert!(!is_valid_e164("15551234567")); // No plus
        assert!(!is_valid_e164("+0123456789")); // Leading zero country code
        assert!(!is_valid_e164("+1234567890123456")); // Too long
        assert!(!is_valid_e164("+123abc4567")); // Contains letters
        assert!(!is_valid_e164("+")); // Only plus sign
    }
}

//! Phone number utilities
//!
//! All phone numbers are handled in E.164 format: a leading `+`, a country
//! code that does not start with zero, and up to 15 digits total.

use once_cell::sync::Lazy;
use regex::Regex;

/// E.164 format: `+`, then 7 to 15 digits, first digit non-zero
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is in valid E.164 format
pub fn is_valid_phone(phone: &str) -> bool {
    E164_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a phone number for logs (e.g. `+9112****7890`)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 8 {
        format!(
            "{}****{}",
            &normalized[..4],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+91 12345 67890"), "+911234567890");
        assert_eq!(normalize_phone_number("(91) 1234-567890"), "911234567890");
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+911234567890"));
        assert!(is_valid_phone("+14155552671"));
        assert!(!is_valid_phone("911234567890"));
        assert!(!is_valid_phone("+0123456789"));
        assert!(!is_valid_phone("+12"));
        assert!(!is_valid_phone("+9112345678901234567"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+911234567890"), "+911****7890");
        assert_eq!(mask_phone_number("+12"), "****");
    }
}

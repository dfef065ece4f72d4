//! Text field formats used by booking and sign-in forms

use regex::Regex;
use std::sync::OnceLock;

/// Field format validators
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Phone,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a raw form value against this format
    ///
    /// Phone numbers are checked after dropping the spaces and dashes people
    /// type as separators.
    pub fn validate(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Phone => Self::is_valid_phone(&normalize_phone(value)),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    /// Short description used in validation messages
    pub fn describe(&self) -> &'static str {
        match self {
            FieldFormat::Email => "must be a valid email address",
            FieldFormat::Phone => "must be a phone number of 8 to 15 digits",
            FieldFormat::Custom(_) => "has an invalid format",
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern is a valid regex")
        });
        regex.is_match(email)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // At least 8 digits, max 15 (E.164)
            Regex::new(r"^\+?[1-9]\d{7,14}$").expect("phone pattern is a valid regex")
        });
        regex.is_match(phone)
    }
}

/// Strip the separators a phone number is commonly typed with
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

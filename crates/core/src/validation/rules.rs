//! Field rules: pure logic, no form state.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_SERVICES: &str = "services";
pub const FIELD_TERMS_ACCEPTED: &str = "termsAccepted";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid Australian phone number";
pub const NO_SERVICES_MESSAGE: &str = "Please select at least one service";
pub const TERMS_MESSAGE: &str = "You must accept the terms and conditions";

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// `local@domain.tld` with a two-letter-or-longer alphabetic TLD.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Australian mobile or landline: `+61` or `0`, an area/mobile digit, then
/// eight digits either contiguous or grouped 4-4 with a space or hyphen.
const PHONE_PATTERN: &str = r"^(?:\+61|0)[2-478](?:[ -]?\d{4}[ -]?\d{4}|\d{8})$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// `"<Field> is required"` with the first letter of the key upper-cased.
pub fn required_message(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{}{} is required", first.to_uppercase(), chars.as_str()),
        None => "Field is required".to_string(),
    }
}

/// Check a single text field value.
///
/// Every field must be non-empty after trimming; `email` and `phone`
/// additionally have to match their format. Returns the message to show on
/// failure.
pub fn check_field(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(required_message(field));
    }

    match field {
        FIELD_EMAIL if !EMAIL_RE.is_match(value) => Err(INVALID_EMAIL_MESSAGE.to_string()),
        FIELD_PHONE if !PHONE_RE.is_match(value) => Err(INVALID_PHONE_MESSAGE.to_string()),
        _ => Ok(()),
    }
}

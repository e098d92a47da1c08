/// Contact details: email addresses and phone numbers

pub mod rules;

pub use rules::{DigitLengthPhoneRule, EmailRule, PhoneRule, SyntacticEmailRule};

use crate::error::{Result, SanitizeError};

/// Trim and lowercase an email, then apply the default syntactic rule.
pub fn sanitize_email(raw: &str) -> Result<String> {
    sanitize_email_with(raw, &SyntacticEmailRule)
}

pub fn sanitize_email_with(raw: &str, rule: &dyn EmailRule) -> Result<String> {
    let email = raw.trim().to_lowercase();

    if !rule.accepts(&email) {
        return Err(SanitizeError::InvalidEmail);
    }

    Ok(email)
}

/// Reduce a phone number to `+` and ASCII digits and check its length.
///
/// Absent or blank input is not an error and stays absent.
pub fn sanitize_phone_e164(raw: Option<&str>) -> Result<Option<String>> {
    sanitize_phone_e164_with(raw, &DigitLengthPhoneRule)
}

pub fn sanitize_phone_e164_with(raw: Option<&str>, rule: &dyn PhoneRule) -> Result<Option<String>> {
    let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let phone = keep_plus_and_digits(trimmed);
    if !rule.accepts(&phone) {
        return Err(SanitizeError::InvalidPhoneNumber);
    }

    Ok(Some(phone))
}

fn keep_plus_and_digits(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c == '+' || c.is_ascii_digit())
        .collect()
}

use regex::Regex;
use std::fmt::Debug;
use std::sync::LazyLock;

pub const EMAIL_MIN_LEN: usize = 6;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PHONE_MIN_LEN: usize = 7;
pub const PHONE_MAX_LEN: usize = 20;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern")
});

/// Structural rule applied to an already trimmed and lowercased email.
pub trait EmailRule: Send + Sync + Debug {
    fn accepts(&self, email: &str) -> bool;
}

/// Structural rule applied to a phone number reduced to `+` and digits.
pub trait PhoneRule: Send + Sync + Debug {
    fn accepts(&self, phone: &str) -> bool;
}

/// Length bounds plus a full match on the usual email grammar. This is a
/// syntactic pre-filter and says nothing about deliverability.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticEmailRule;

impl EmailRule for SyntacticEmailRule {
    fn accepts(&self, email: &str) -> bool {
        (EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&email.len())
            && email.contains('@')
            && EMAIL_PATTERN.is_match(email)
    }
}

/// Placeholder phone rule: only the length of the reduced number is checked.
/// Country codes and numbering plans are not validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitLengthPhoneRule;

impl PhoneRule for DigitLengthPhoneRule {
    fn accepts(&self, phone: &str) -> bool {
        (PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&phone.len())
    }
}

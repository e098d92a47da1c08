use crate::color::sanitize_color_format;
use crate::config::SanitizerConfig;
use crate::contact::{
    sanitize_email_with, sanitize_phone_e164_with, DigitLengthPhoneRule, EmailRule, PhoneRule,
    SyntacticEmailRule,
};
use crate::credentials::sanitize_password_policy;
use crate::error::Result;
use crate::files::{validate_file_name, validate_file_type};
use crate::identity::{sanitize_display_name, sanitize_hall_name, sanitize_username};
use crate::log_check;
use crate::observability::ValidationMetrics;
use crate::text::{sanitize_message_content, sanitize_text};
use clap::ValueEnum;
use std::time::Instant;

/// Every kind of field the sanitizer knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FieldKind {
    Username,
    HallName,
    DisplayName,
    Email,
    Phone,
    Password,
    Color,
    Text,
    Message,
    FileName,
    FileType,
}

impl FieldKind {
    pub fn operation(&self) -> &'static str {
        match self {
            FieldKind::Username => "username",
            FieldKind::HallName => "hall_name",
            FieldKind::DisplayName => "display_name",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Password => "password",
            FieldKind::Color => "color",
            FieldKind::Text => "text",
            FieldKind::Message => "message",
            FieldKind::FileName => "file_name",
            FieldKind::FileType => "file_type",
        }
    }
}

/// Shared entry point for request handlers: holds the configuration and the
/// contact rules, and logs and counts the outcome of every check.
///
/// `Sanitizer` is `Send + Sync`; share one instance behind an `Arc`.
#[derive(Debug)]
pub struct Sanitizer {
    config: SanitizerConfig,
    email_rule: Box<dyn EmailRule>,
    phone_rule: Box<dyn PhoneRule>,
    metrics: ValidationMetrics,
}

impl Sanitizer {
    pub fn new(config: SanitizerConfig) -> Result<Self> {
        Ok(Self {
            config,
            email_rule: Box::new(SyntacticEmailRule),
            phone_rule: Box::new(DigitLengthPhoneRule),
            metrics: ValidationMetrics::new()?,
        })
    }

    /// Swap in a stricter email rule. Rejections still surface as `InvalidEmail`.
    pub fn with_email_rule(mut self, rule: impl EmailRule + 'static) -> Self {
        self.email_rule = Box::new(rule);
        self
    }

    /// Swap in a stricter phone rule. Rejections still surface as `InvalidPhoneNumber`.
    pub fn with_phone_rule(mut self, rule: impl PhoneRule + 'static) -> Self {
        self.phone_rule = Box::new(rule);
        self
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &ValidationMetrics {
        &self.metrics
    }

    pub fn sanitize_username(&self, raw: &str) -> Result<String> {
        self.observe("username", sanitize_username(raw))
    }

    pub fn sanitize_hall_name(&self, raw: &str) -> Result<String> {
        self.observe("hall_name", sanitize_hall_name(raw))
    }

    pub fn sanitize_display_name(&self, raw: &str) -> Result<String> {
        self.observe("display_name", sanitize_display_name(raw))
    }

    pub fn sanitize_email(&self, raw: &str) -> Result<String> {
        self.observe("email", sanitize_email_with(raw, self.email_rule.as_ref()))
    }

    pub fn sanitize_phone_e164(&self, raw: Option<&str>) -> Result<Option<String>> {
        self.observe("phone", sanitize_phone_e164_with(raw, self.phone_rule.as_ref()))
    }

    pub fn sanitize_password_policy(&self, raw: &str) -> Result<String> {
        self.observe("password", sanitize_password_policy(raw))
    }

    pub fn sanitize_color_format(&self, raw: Option<&str>) -> Result<Option<String>> {
        self.observe("color", sanitize_color_format(raw))
    }

    pub fn sanitize_text(&self, raw: Option<&str>) -> Option<String> {
        let cleaned = sanitize_text(raw);
        self.metrics.record("text", None);
        log_check!(debug, "text", present = cleaned.is_some(), "text cleaned");
        cleaned
    }

    pub fn sanitize_message_content(&self, raw: &str) -> String {
        let cleaned = sanitize_message_content(raw);
        self.metrics.record("message", None);
        log_check!(debug, "message", chars = cleaned.chars().count(), "message cleaned");
        cleaned
    }

    pub async fn validate_file_name(&self, name: &str) -> Result<String> {
        let started = Instant::now();
        let result = validate_file_name(name, &self.config.files).await;
        self.metrics.observe_file_check(started.elapsed());
        self.observe("file_name", result)
    }

    pub fn validate_file_type(&self, declared_type: Option<&str>, url: &str) -> Result<String> {
        self.observe("file_type", validate_file_type(declared_type, url))
    }

    /// Dispatch on `field`. Required fields treat a missing value as empty;
    /// `declared_type` is only read for [`FieldKind::FileType`].
    pub async fn apply(
        &self,
        field: FieldKind,
        value: Option<&str>,
        declared_type: Option<&str>,
    ) -> Result<Option<String>> {
        let required = value.unwrap_or_default();

        match field {
            FieldKind::Username => self.sanitize_username(required).map(Some),
            FieldKind::HallName => self.sanitize_hall_name(required).map(Some),
            FieldKind::DisplayName => self.sanitize_display_name(required).map(Some),
            FieldKind::Email => self.sanitize_email(required).map(Some),
            FieldKind::Phone => self.sanitize_phone_e164(value),
            FieldKind::Password => self.sanitize_password_policy(required).map(Some),
            FieldKind::Color => self.sanitize_color_format(value),
            FieldKind::Text => Ok(self.sanitize_text(value)),
            FieldKind::Message => Ok(Some(self.sanitize_message_content(required))),
            FieldKind::FileName => self.validate_file_name(required).await.map(Some),
            FieldKind::FileType => self.validate_file_type(declared_type, required).map(Some),
        }
    }

    fn observe<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => {
                self.metrics.record(operation, None);
                log_check!(debug, operation, "input accepted");
            }
            Err(e) if e.is_rejection() => {
                self.metrics.record(operation, Some(e.kind()));
                log_check!(debug, operation, kind = %e.kind(), "input rejected");
            }
            Err(e) => {
                self.metrics.record(operation, Some(e.kind()));
                log_check!(warn, operation, error = %e, "check could not complete");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SanitizeError};

    #[derive(Debug)]
    struct StrictPhone;

    impl PhoneRule for StrictPhone {
        fn accepts(&self, phone: &str) -> bool {
            phone.starts_with('+') && (8..=16).contains(&phone.len())
        }
    }

    fn sanitizer() -> Sanitizer {
        Sanitizer::new(SanitizerConfig::default()).unwrap()
    }

    #[test]
    fn test_counts_outcomes() {
        let s = sanitizer();
        assert_eq!(s.sanitize_username(" Bob ").unwrap(), "bob");
        assert!(s.sanitize_username("!").is_err());
        assert!(s.sanitize_color_format(Some("red")).is_err());

        let metrics = s.metrics();
        assert_eq!(metrics.count("username", None), 1);
        assert_eq!(metrics.count("username", Some(ErrorKind::InvalidUsername)), 1);
        assert_eq!(metrics.count("color", Some(ErrorKind::InvalidBannerColor)), 1);
    }

    #[test]
    fn test_custom_phone_rule() {
        let s = sanitizer().with_phone_rule(StrictPhone);
        assert!(matches!(
            s.sanitize_phone_e164(Some("5551234567")),
            Err(SanitizeError::InvalidPhoneNumber)
        ));
        assert_eq!(
            s.sanitize_phone_e164(Some("+1 555 123 4567")).unwrap(),
            Some("+15551234567".to_string())
        );
    }

    #[test]
    fn test_text_paths_never_fail() {
        let s = sanitizer();
        assert_eq!(s.sanitize_text(None), None);
        assert_eq!(s.sanitize_message_content("<b>hi</b>"), "<b>hi</b>");
        assert_eq!(s.metrics().count("text", None), 1);
        assert_eq!(s.metrics().count("message", None), 1);
    }

    #[tokio::test]
    async fn test_apply_dispatch() {
        let s = sanitizer();

        assert_eq!(
            s.apply(FieldKind::Email, Some(" A@Example.com "), None).await.unwrap(),
            Some("a@example.com".to_string())
        );
        assert_eq!(s.apply(FieldKind::Color, None, None).await.unwrap(), None);
        assert_eq!(
            s.apply(FieldKind::FileType, Some("http://x/a.jpeg"), Some("image/jpeg"))
                .await
                .unwrap(),
            Some(".jpeg".to_string())
        );
        assert!(matches!(
            s.apply(FieldKind::Username, None, None).await,
            Err(SanitizeError::InvalidUsername)
        ));
        assert!(matches!(
            s.apply(FieldKind::Password, Some(" secret "), None).await,
            Err(SanitizeError::PasswordWhitespace)
        ));
    }

    #[test]
    fn test_operation_names_are_distinct() {
        let all = FieldKind::value_variants();
        let mut names: Vec<_> = all.iter().map(FieldKind::operation).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }
}

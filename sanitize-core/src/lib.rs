//! Sanitization and validation of untrusted user input.
//!
//! Every check is a plain function that either returns the canonical form of
//! its input or a [`SanitizeError`] naming the rule that was broken. Free
//! text is the exception: it is cleaned, never rejected. [`Sanitizer`] wraps
//! the functions with configuration, pluggable contact rules, logging and
//! metrics for use from request handlers.

pub mod color;
pub mod config;
pub mod contact;
pub mod credentials;
pub mod error;
pub mod files;
pub mod identity;
pub mod observability;
pub mod report;
pub mod sanitizer;
pub mod text;

pub use color::sanitize_color_format;
pub use config::{FileCheckConfig, SanitizerConfig};
pub use contact::{sanitize_email, sanitize_phone_e164, EmailRule, PhoneRule};
pub use credentials::{estimate_entropy, sanitize_password_policy, MIN_ENTROPY_BITS};
pub use error::{ErrorKind, Result, SanitizeError};
pub use files::{validate_file_name, validate_file_type, BLOCKED_EXTENSIONS};
pub use identity::{sanitize_display_name, sanitize_hall_name, sanitize_username};
pub use report::{FieldError, FieldReport};
pub use sanitizer::{FieldKind, Sanitizer};
pub use text::{sanitize_message_content, sanitize_text};

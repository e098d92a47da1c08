use serde::Serialize;
use std::io::Error as IoError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("Invalid username")]
    InvalidUsername,

    #[error("Invalid hall name")]
    InvalidHallName,

    #[error("Invalid display name")]
    InvalidDisplayName,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhoneNumber,

    #[error("Password is too weak")]
    InvalidPassword,

    #[error("Password must not start or end with whitespace")]
    PasswordWhitespace,

    #[error("Invalid banner color")]
    InvalidBannerColor,

    #[error("Invalid file name")]
    InvalidFileName,

    #[error("File type is not allowed")]
    BadFileType,

    #[error("Declared file type does not match the file extension")]
    FileUnmatch,

    #[error("Could not check file name: {0}")]
    FileCheckFailed(#[source] IoError),

    #[error("File name check timed out after {0:?}")]
    FileCheckTimeout(Duration),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Stable classification of a [`SanitizeError`], for mapping to field-specific
/// messages at the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidUsername,
    InvalidHallName,
    InvalidDisplayName,
    InvalidEmail,
    InvalidPhoneNumber,
    InvalidPassword,
    PasswordWhitespace,
    InvalidBannerColor,
    InvalidFileName,
    BadFileType,
    FileUnmatch,
    FileCheckFailed,
    FileCheckTimeout,
    InvalidConfig,
    Metrics,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidUsername => "invalid_username",
            ErrorKind::InvalidHallName => "invalid_hall_name",
            ErrorKind::InvalidDisplayName => "invalid_display_name",
            ErrorKind::InvalidEmail => "invalid_email",
            ErrorKind::InvalidPhoneNumber => "invalid_phone_number",
            ErrorKind::InvalidPassword => "invalid_password",
            ErrorKind::PasswordWhitespace => "password_whitespace",
            ErrorKind::InvalidBannerColor => "invalid_banner_color",
            ErrorKind::InvalidFileName => "invalid_file_name",
            ErrorKind::BadFileType => "bad_file_type",
            ErrorKind::FileUnmatch => "file_unmatch",
            ErrorKind::FileCheckFailed => "file_check_failed",
            ErrorKind::FileCheckTimeout => "file_check_timeout",
            ErrorKind::InvalidConfig => "invalid_config",
            ErrorKind::Metrics => "metrics",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SanitizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SanitizeError::InvalidUsername => ErrorKind::InvalidUsername,
            SanitizeError::InvalidHallName => ErrorKind::InvalidHallName,
            SanitizeError::InvalidDisplayName => ErrorKind::InvalidDisplayName,
            SanitizeError::InvalidEmail => ErrorKind::InvalidEmail,
            SanitizeError::InvalidPhoneNumber => ErrorKind::InvalidPhoneNumber,
            SanitizeError::InvalidPassword => ErrorKind::InvalidPassword,
            SanitizeError::PasswordWhitespace => ErrorKind::PasswordWhitespace,
            SanitizeError::InvalidBannerColor => ErrorKind::InvalidBannerColor,
            SanitizeError::InvalidFileName => ErrorKind::InvalidFileName,
            SanitizeError::BadFileType => ErrorKind::BadFileType,
            SanitizeError::FileUnmatch => ErrorKind::FileUnmatch,
            SanitizeError::FileCheckFailed(_) => ErrorKind::FileCheckFailed,
            SanitizeError::FileCheckTimeout(_) => ErrorKind::FileCheckTimeout,
            SanitizeError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            SanitizeError::Metrics(_) => ErrorKind::Metrics,
        }
    }

    /// True when the input itself was judged unacceptable, false when the
    /// check could not be carried out.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            SanitizeError::FileCheckFailed(_)
                | SanitizeError::FileCheckTimeout(_)
                | SanitizeError::InvalidConfig(_)
                | SanitizeError::Metrics(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SanitizeError>;

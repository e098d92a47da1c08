use crate::error::{Result, SanitizeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FILE_CHECK_TIMEOUT_MS: u64 = 2_000;
pub const MIN_FILE_CHECK_TIMEOUT_MS: u64 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub files: FileCheckConfig,
}

/// Settings for the file-name existence check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCheckConfig {
    /// Directory file names are resolved against; the working directory when unset.
    pub upload_root: Option<PathBuf>,
    pub check_timeout_ms: u64,
}

impl Default for FileCheckConfig {
    fn default() -> Self {
        Self {
            upload_root: None,
            check_timeout_ms: DEFAULT_FILE_CHECK_TIMEOUT_MS,
        }
    }
}

impl FileCheckConfig {
    pub fn with_upload_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.upload_root = Some(root.into());
        self
    }

    /// Sub-millisecond timeouts round up to 1 ms; oversized ones saturate.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout_ms = u64::try_from(timeout.as_millis())
            .unwrap_or(u64::MAX)
            .max(MIN_FILE_CHECK_TIMEOUT_MS);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms.max(MIN_FILE_CHECK_TIMEOUT_MS))
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        match &self.upload_root {
            Some(root) => root.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl SanitizerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SanitizeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SanitizeError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.files.check_timeout_ms == 0 {
            return Err(SanitizeError::InvalidConfig(
                "files.check_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SanitizerConfig::default();
        assert!(config.files.upload_root.is_none());
        assert_eq!(config.files.timeout(), Duration::from_secs(2));
        assert_eq!(config.files.resolve("a.png"), PathBuf::from("a.png"));
    }

    #[test]
    fn test_from_toml() {
        let config = SanitizerConfig::from_toml_str(
            r#"
            [files]
            upload_root = "/srv/uploads"
            check_timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.files.timeout(), Duration::from_millis(250));
        assert_eq!(
            config.files.resolve("avatar.png"),
            PathBuf::from("/srv/uploads/avatar.png")
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SanitizerConfig::from_toml_str("").unwrap();
        assert_eq!(config.files.check_timeout_ms, DEFAULT_FILE_CHECK_TIMEOUT_MS);
    }

    #[test]
    fn test_with_timeout_never_zero() {
        let zero = FileCheckConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(zero.check_timeout_ms, MIN_FILE_CHECK_TIMEOUT_MS);
        assert_eq!(zero.timeout(), Duration::from_millis(1));

        let sub_ms = FileCheckConfig::default().with_timeout(Duration::from_micros(400));
        assert_eq!(sub_ms.timeout(), Duration::from_millis(1));

        let huge = FileCheckConfig::default().with_timeout(Duration::MAX);
        assert_eq!(huge.check_timeout_ms, u64::MAX);

        let exact = FileCheckConfig::default().with_timeout(Duration::from_millis(250));
        assert_eq!(exact.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_field_still_yields_usable_timeout() {
        let config = FileCheckConfig {
            upload_root: None,
            check_timeout_ms: 0,
        };
        assert_eq!(config.timeout(), Duration::from_millis(1));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            SanitizerConfig::from_toml_str("[files]\ncheck_timeout_ms = 0"),
            Err(SanitizeError::InvalidConfig(_))
        ));
        assert!(matches!(
            SanitizerConfig::from_toml_str("files = 3"),
            Err(SanitizeError::InvalidConfig(_))
        ));
    }
}

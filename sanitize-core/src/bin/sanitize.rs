use anyhow::{Context, Result};
use clap::Parser;
use sanitize_core::observability::{setup_logging, LogFormat};
use sanitize_core::{FieldKind, SanitizeError, Sanitizer, SanitizerConfig};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_ACCEPTED: u8 = 0;
const EXIT_REJECTED: u8 = 1;
const EXIT_CHECK_FAILED: u8 = 2;

/// Run one sanitization check and print the normalized value.
#[derive(Debug, Parser)]
#[command(name = "sanitize", version)]
struct Cli {
    /// Field kind to check
    #[arg(value_enum)]
    field: FieldKind,

    /// Raw value; omit to check an absent optional field
    value: Option<String>,

    /// Declared content type, checked against the extension for `file-type`
    #[arg(long)]
    declared_type: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

type Outcome = std::result::Result<Option<String>, SanitizeError>;

/// 0 when accepted, 1 when the input was rejected, 2 when the check itself failed.
fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Ok(_) => EXIT_ACCEPTED,
        Err(e) if e.is_rejection() => EXIT_REJECTED,
        Err(_) => EXIT_CHECK_FAILED,
    }
}

fn render_json(outcome: &Outcome) -> String {
    match outcome {
        Ok(value) => json!({ "ok": value }).to_string(),
        Err(e) => json!({ "error": { "kind": e.kind(), "message": e.to_string() } }).to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(if cli.json_logs { LogFormat::Json } else { LogFormat::Text });

    let config = match &cli.config {
        Some(path) => SanitizerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SanitizerConfig::default(),
    };
    let sanitizer = Sanitizer::new(config).context("building sanitizer")?;

    let outcome = sanitizer
        .apply(cli.field, cli.value.as_deref(), cli.declared_type.as_deref())
        .await;

    if cli.json {
        println!("{}", render_json(&outcome));
    } else {
        match &outcome {
            Ok(value) => println!("{}", value.as_deref().unwrap_or("null")),
            Err(e) => eprintln!("{}: {}", e.kind(), e),
        }
    }

    Ok(ExitCode::from(exit_status(&outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    #[test]
    fn test_parse_file_type_invocation() {
        let cli = Cli::try_parse_from([
            "sanitize",
            "file-type",
            "http://x/a.jpeg",
            "--declared-type",
            "image/jpeg",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.field, FieldKind::FileType);
        assert_eq!(cli.value.as_deref(), Some("http://x/a.jpeg"));
        assert_eq!(cli.declared_type.as_deref(), Some("image/jpeg"));
        assert!(cli.json);
        assert!(!cli.json_logs);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_absent_value_and_kebab_case_fields() {
        let cli = Cli::try_parse_from(["sanitize", "display-name"]).unwrap();
        assert_eq!(cli.field, FieldKind::DisplayName);
        assert!(cli.value.is_none());

        let cli = Cli::try_parse_from(["sanitize", "file-name", "a.png", "--config", "s.toml"])
            .unwrap();
        assert_eq!(cli.field, FieldKind::FileName);
        assert_eq!(cli.config, Some(PathBuf::from("s.toml")));
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        assert!(Cli::try_parse_from(["sanitize", "nickname", "bob"]).is_err());
        assert!(Cli::try_parse_from(["sanitize"]).is_err());
    }

    #[test]
    fn test_exit_status_mapping() {
        assert_eq!(exit_status(&Ok(Some("bob".to_string()))), 0);
        assert_eq!(exit_status(&Ok(None)), 0);
        assert_eq!(exit_status(&Err(SanitizeError::InvalidUsername)), 1);
        assert_eq!(exit_status(&Err(SanitizeError::FileUnmatch)), 1);

        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(exit_status(&Err(SanitizeError::FileCheckFailed(io))), 2);
        assert_eq!(
            exit_status(&Err(SanitizeError::FileCheckTimeout(Duration::from_millis(5)))),
            2
        );
    }

    #[tokio::test]
    async fn test_parsed_invocation_end_to_end() {
        let cli = Cli::try_parse_from(["sanitize", "username", "ab"]).unwrap();
        let sanitizer = Sanitizer::new(SanitizerConfig::default()).unwrap();

        let outcome = sanitizer
            .apply(cli.field, cli.value.as_deref(), cli.declared_type.as_deref())
            .await;
        assert_eq!(exit_status(&outcome), 1);

        let rendered: serde_json::Value = serde_json::from_str(&render_json(&outcome)).unwrap();
        assert_eq!(rendered["error"]["kind"], "invalid_username");
    }

    #[test]
    fn test_render_json_ok() {
        let rendered: serde_json::Value =
            serde_json::from_str(&render_json(&Ok(Some("#abc".to_string())))).unwrap();
        assert_eq!(rendered["ok"], "#abc");

        let rendered: serde_json::Value = serde_json::from_str(&render_json(&Ok(None))).unwrap();
        assert!(rendered["ok"].is_null());
    }
}

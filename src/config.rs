// src/config.rs
use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_CALLBACK_PORT, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::crawl::{BackupMode, TokenFilter};
use crate::error::AppError;
use crate::types::{AppCredentials, ValidationError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the app id.
pub const APP_ID_VAR: &str = "FEISHU_APP_ID";
/// Environment variable holding the app secret.
pub const APP_SECRET_VAR: &str = "FEISHU_APP_SECRET";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Only export documents and spreadsheets with these tokens
    #[arg(long, num_args = 1..)]
    pub only: Vec<String>,

    /// Export calendar events instead of documents
    #[arg(long, default_value_t = false)]
    pub calendar: bool,

    /// Directory the backup is written into
    #[arg(short, long, default_value = "./backup")]
    pub output: PathBuf,

    /// Local port the OAuth redirect is sent to
    #[arg(long, default_value_t = DEFAULT_CALLBACK_PORT)]
    pub port: u16,

    /// Root of the open platform API
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub base_url: String,

    /// Timeout of a single HTTP request, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved backup configuration, validated and ready to run.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub credentials: AppCredentials,
    pub mode: BackupMode,
    pub filter: TokenFilter,
    pub output_dir: PathBuf,
    pub port: u16,
    pub base_url: String,
    pub timeout: Duration,
    #[allow(dead_code)] // Used by bin crate
    pub verbose: bool,
}

impl BackupConfig {
    /// Resolves a complete configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`resolve`](Self::resolve), with the environment supplied by `lookup`.
    pub fn resolve_with<L>(cli: CommandLineInput, lookup: L) -> Result<Self, AppError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| {
                AppError::MissingConfiguration(format!("{} environment variable not set", name))
            })
        };
        let credentials = AppCredentials::new(require(APP_ID_VAR)?, require(APP_SECRET_VAR)?)?;

        if cli.timeout == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u64::MAX,
            }
            .into());
        }

        let base_url = cli.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| ValidationError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let filter = if cli.only.is_empty() {
            TokenFilter::all()
        } else {
            TokenFilter::only(cli.only)
        };

        Ok(BackupConfig {
            credentials,
            mode: if cli.calendar {
                BackupMode::Calendar
            } else {
                BackupMode::Documents
            },
            filter,
            output_dir: cli.output,
            port: cli.port,
            base_url,
            timeout: Duration::from_secs(cli.timeout),
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            APP_ID_VAR => Some("cli_test".to_string()),
            APP_SECRET_VAR => Some("secret".to_string()),
            _ => None,
        }
    }

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(std::iter::once("feishu-backup").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_back_up_documents() {
        let config = BackupConfig::resolve_with(parse(&[]), env).unwrap();
        assert_eq!(config.mode, BackupMode::Documents);
        assert!(!config.filter.is_restricted());
        assert_eq!(config.output_dir, PathBuf::from("./backup"));
        assert_eq!(config.port, 8888);
        assert_eq!(config.base_url, "https://open.feishu.cn/open-apis");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.credentials.app_id, "cli_test");
    }

    #[test]
    fn only_and_calendar_flags() {
        let cli = parse(&["--only", "doxA", "shtB", "--calendar", "-o", "/tmp/out"]);
        let config = BackupConfig::resolve_with(cli, env).unwrap();
        assert_eq!(config.mode, BackupMode::Calendar);
        assert!(config.filter.allows("shtB"));
        assert!(!config.filter.allows("doxC"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = BackupConfig::resolve_with(parse(&[]), |name| {
            (name == APP_ID_VAR).then(|| "cli_test".to_string())
        })
        .unwrap_err();
        assert!(
            matches!(err, AppError::MissingConfiguration(ref msg) if msg.contains(APP_SECRET_VAR))
        );
    }

    #[test]
    fn rejects_zero_timeout_and_bad_base_url() {
        assert!(BackupConfig::resolve_with(parse(&["--timeout", "0"]), env).is_err());
        assert!(BackupConfig::resolve_with(parse(&["--base-url", "not a url"]), env).is_err());
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let cli = parse(&["--base-url", "http://localhost:9000/open-apis/"]);
        let config = BackupConfig::resolve_with(cli, env).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/open-apis");
    }
}

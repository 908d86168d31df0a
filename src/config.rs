// src/config.rs
use crate::constants::{CONFIG_FILE_NAME, DIGEST_DEFAULT_SIZE};
use crate::error::AppError;
use crate::types::{DigestSize, SessionCookie, ValidatedUrl};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns `config.json` next to the running executable.
fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Parsed command-line input.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// WeRead cookie string (falls back to `wereadCookie` in the config file)
    pub weread_cookie: Option<String>,

    /// Discord webhook URL (falls back to `webhookUrl` in the config file)
    pub webhook_url: Option<String>,

    /// Path to the JSON config file (defaults to config.json next to the executable)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of notes to draw for the digest
    #[arg(short = 'n', long, default_value_t = DIGEST_DEFAULT_SIZE)]
    pub count: usize,

    /// Seed for the random draw, for reproducible digests
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pipe mode - print the digest to stdout instead of posting it
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Contents of the JSON config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub weread_cookie: Option<String>,
    pub webhook_url: Option<String>,
}

impl ConfigFile {
    /// Loads the config file. A missing file reads as empty.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text).map_err(|source| AppError::JsonParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the digest goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    Webhook(ValidatedUrl),
    Stdout,
}

/// Resolved run configuration, validated and ready to drive all stages.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub cookie: SessionCookie,
    pub delivery: DeliveryMode,
    pub digest_size: DigestSize,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl RunConfig {
    /// Resolves a complete configuration from CLI input, falling back to the
    /// config file for anything not given on the command line.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let config_path = cli
            .config
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        let mut fallback = LazyConfigFile::new(config_path);

        let cookie = match non_empty(cli.weread_cookie) {
            Some(cookie) => cookie,
            None => {
                log::info!("No WeRead cookie on the command line, reading config file");
                let from_file = non_empty(fallback.get()?.weread_cookie.clone());
                from_file.ok_or_else(|| missing("WeRead cookie", "wereadCookie", &fallback.path))?
            }
        };

        let delivery = if cli.pipe {
            DeliveryMode::Stdout
        } else {
            let url = match non_empty(cli.webhook_url) {
                Some(url) => url,
                None => {
                    log::info!("No webhook URL on the command line, reading config file");
                    let from_file = non_empty(fallback.get()?.webhook_url.clone());
                    from_file.ok_or_else(|| missing("Webhook URL", "webhookUrl", &fallback.path))?
                }
            };
            DeliveryMode::Webhook(ValidatedUrl::parse(&url)?)
        };

        Ok(RunConfig {
            cookie: SessionCookie::parse(&cookie)?,
            delivery,
            digest_size: DigestSize::new(cli.count)?,
            seed: cli.seed,
            verbose: cli.verbose,
        })
    }
}

/// Reads the config file at most once, and only when a value is missing.
struct LazyConfigFile {
    path: PathBuf,
    loaded: Option<ConfigFile>,
}

impl LazyConfigFile {
    fn new(path: PathBuf) -> Self {
        Self { path, loaded: None }
    }

    fn get(&mut self) -> Result<&ConfigFile, AppError> {
        if self.loaded.is_none() {
            self.loaded = Some(ConfigFile::load(&self.path)?);
        }
        Ok(self.loaded.get_or_insert_with(ConfigFile::default))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing(what: &str, key: &str, path: &Path) -> AppError {
    AppError::MissingConfiguration(format!(
        "{} not given on the command line or as `{}` in {}",
        what,
        key,
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBHOOK: &str = "https://discord.com/api/webhooks/1/token";

    fn temp_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "weread2discord_{}_{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn cli() -> CommandLineInput {
        CommandLineInput {
            count: DIGEST_DEFAULT_SIZE,
            config: Some("/nonexistent/weread2discord/config.json".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_command_line_values_win() {
        let input = CommandLineInput {
            weread_cookie: Some("wr_skey=abc".to_string()),
            webhook_url: Some(WEBHOOK.to_string()),
            ..cli()
        };
        let config = RunConfig::resolve(input).unwrap();
        assert_eq!(config.cookie.names(), vec!["wr_skey"]);
        assert_eq!(
            config.delivery,
            DeliveryMode::Webhook(ValidatedUrl::parse(WEBHOOK).unwrap())
        );
        assert_eq!(config.digest_size.get(), 5);
    }

    #[test]
    fn test_config_file_fills_missing_values() {
        let path = temp_config(
            "fills",
            &format!(r#"{{"wereadCookie": "wr_vid=1; wr_skey=x", "webhookUrl": "{}"}}"#, WEBHOOK),
        );
        let input = CommandLineInput {
            config: Some(path.to_string_lossy().into_owned()),
            ..cli()
        };
        let config = RunConfig::resolve(input).unwrap();
        assert_eq!(config.cookie.names(), vec!["wr_vid", "wr_skey"]);
        assert!(matches!(config.delivery, DeliveryMode::Webhook(_)));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_cookie_is_a_configuration_error() {
        let input = CommandLineInput {
            webhook_url: Some(WEBHOOK.to_string()),
            ..cli()
        };
        let err = RunConfig::resolve(input).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let path = temp_config("empty", r#"{"wereadCookie": "", "webhookUrl": ""}"#);
        let input = CommandLineInput {
            weread_cookie: Some("wr_skey=abc".to_string()),
            config: Some(path.to_string_lossy().into_owned()),
            ..cli()
        };
        let err = RunConfig::resolve(input).unwrap_err();
        assert!(err.to_string().contains("webhookUrl"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_pipe_mode_needs_no_webhook() {
        let input = CommandLineInput {
            weread_cookie: Some("wr_skey=abc".to_string()),
            pipe: true,
            ..cli()
        };
        let config = RunConfig::resolve(input).unwrap();
        assert_eq!(config.delivery, DeliveryMode::Stdout);
    }

    #[test]
    fn test_malformed_config_file_is_reported() {
        let path = temp_config("malformed", "{not json");
        let input = CommandLineInput {
            config: Some(path.to_string_lossy().into_owned()),
            ..cli()
        };
        let err = RunConfig::resolve(input).unwrap_err();
        assert!(matches!(err, AppError::JsonParseError { .. }));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_count_is_rejected() {
        let input = CommandLineInput {
            weread_cookie: Some("wr_skey=abc".to_string()),
            pipe: true,
            count: 0,
            ..cli()
        };
        assert!(matches!(
            RunConfig::resolve(input).unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_positionals_parse_in_order() {
        let input = CommandLineInput::try_parse_from([
            "weread2discord",
            "wr_skey=a",
            "https://x.example/y",
        ])
        .unwrap();
        assert_eq!(input.weread_cookie.as_deref(), Some("wr_skey=a"));
        assert_eq!(input.webhook_url.as_deref(), Some("https://x.example/y"));
        assert_eq!(input.count, DIGEST_DEFAULT_SIZE);
        assert!(!input.pipe);
    }

    #[test]
    fn test_positionals_are_optional() {
        let input =
            CommandLineInput::try_parse_from(["weread2discord", "-p", "-n", "30", "--seed", "9"])
                .unwrap();
        assert!(input.weread_cookie.is_none());
        assert!(input.webhook_url.is_none());
        assert!(input.pipe);
        assert_eq!(input.count, 30);
        assert_eq!(input.seed, Some(9));
    }
}

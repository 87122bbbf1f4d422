use crate::constants::{APP_NAME, env_vars, fallback};
use crate::error::AppError;
use crate::sheets::api::SheetEndpoints;
use crate::sheets::scheduler::RefreshIntervals;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
///
/// Every field has a default, so a missing or partial config file is fine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// HTTP timeout in seconds for sheet requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Flash text shown when the general sheet has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_news_fallback: Option<String>,
    /// Refresh cadence per dataset kind
    #[serde(default)]
    pub refresh: RefreshIntervals,
    /// Published CSV export URL per dataset
    #[serde(default)]
    pub endpoints: SheetEndpoints,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
            flash_news_fallback: None,
            refresh: RefreshIntervals::default(),
            endpoints: SheetEndpoints::default(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default config file
    /// location when `path` is `None`. Environment variables override
    /// values from the file.
    ///
    /// # Environment Variables
    /// - `FESTIVAL_LOG_FILE` - Override log file path
    /// - `FESTIVAL_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Notes
    /// - A missing file means defaults; the display runs unattended, so
    ///   nothing is prompted for
    /// - Environment variables take precedence over config file
    pub async fn load(path: Option<&str>) -> Result<Self, AppError> {
        let config_path = path.map(str::to_string).unwrap_or_else(get_config_path);

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `FESTIVAL_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.endpoints,
            &self.refresh,
            self.http_timeout_seconds,
            &self.log_file_path,
        )
    }

    /// Flash text fallback: the configured one, else the built-in notice.
    pub fn flash_news_fallback(&self) -> &str {
        self.flash_news_fallback
            .as_deref()
            .unwrap_or(fallback::FLASH_NEWS)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Human-readable listing of the effective settings.
    pub fn summary(&self, config_path: &str) -> String {
        let rule = "────────────────────────────────────";
        let mut lines = vec![
            "Current Configuration".to_string(),
            rule.to_string(),
            "Config Location:".to_string(),
            if Path::new(config_path).exists() {
                config_path.to_string()
            } else {
                format!("{config_path} (not found, using defaults)")
            },
            rule.to_string(),
            "HTTP Timeout:".to_string(),
            format!("{} seconds", self.http_timeout_seconds),
            rule.to_string(),
            "Refresh Intervals:".to_string(),
            format!(
                "categories {}s, scoreboard {}s, general {}s",
                self.refresh.category_seconds,
                self.refresh.scoreboard_seconds,
                self.refresh.general_seconds
            ),
            rule.to_string(),
            "Flash News Fallback:".to_string(),
            self.flash_news_fallback().to_string(),
            rule.to_string(),
            "Sheet Endpoints:".to_string(),
        ];
        lines.extend(
            self.endpoints
                .iter()
                .map(|(dataset, url)| format!("{:<12}{url}", dataset.key())),
        );
        lines.push(rule.to_string());
        lines.push("Log File Location:".to_string());
        match &self.log_file_path {
            Some(custom_path) => lines.push(custom_path.clone()),
            None => {
                lines.push(format!("{}/{APP_NAME}.log", get_log_dir_path()));
                lines.push("(Default location)".to_string());
            }
        }
        lines.join("\n")
    }

    /// Displays current configuration settings to stdout.
    pub fn display(&self, config_path: &str) {
        println!("\n{}", self.summary(config_path));
    }

    /// Saves configuration to a file path, creating its parent directory
    /// if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a file path without env overrides or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

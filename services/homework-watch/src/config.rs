//! Configuration types for the homework watcher

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_polling_interval")]
    pub polling_interval_seconds: u64,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub fault_notifications: FaultNotificationPolicy,
    #[serde(default)]
    pub commit_policy: CommitPolicy,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            polling_interval_seconds: default_polling_interval(),
            request_timeout_seconds: None,
            fault_notifications: FaultNotificationPolicy::default(),
            commit_policy: CommitPolicy::default(),
            telegram: TelegramConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval_seconds)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(crate::WatchError::Config(
                "endpoint must not be empty".to_string(),
            ));
        }
        if self.polling_interval_seconds == 0 {
            return Err(crate::WatchError::Config(
                "polling_interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.telegram.api_url.trim().is_empty() {
            return Err(crate::WatchError::Config(
                "telegram.api_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which faults are reported to the notification destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultNotificationPolicy {
    /// Faults only show up in the log
    #[default]
    Never,
    /// Shape and validation faults are reported, transport faults are not
    Processing,
    /// Every fault is reported
    All,
}

/// When the last-seen report is replaced after a change was detected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Commit once a notification was attempted, whatever the outcome
    #[default]
    Attempted,
    /// Commit only after the notification was delivered
    Delivered,
}

/// Telegram Bot API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

/// Log sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub stdout: bool,
    /// File name prefix of the rotating log; `None` disables the file sink
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
    #[serde(default)]
    pub rotation: LogRotation,
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stdout: true,
            file: default_log_file(),
            directory: default_log_directory(),
            rotation: LogRotation::default(),
            max_files: default_max_log_files(),
        }
    }
}

/// How often the log file is rolled over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Secrets read from the environment at startup
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub notify_token: String,
    pub destination_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("notify_token", &"<redacted>")
            .field("destination_id", &self.destination_id)
            .finish()
    }
}

impl Credentials {
    /// Load `.env` if present, then read credentials from the process environment
    pub fn from_env() -> crate::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {:?}", path);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, reporting every missing variable at once
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &str| match lookup(name).filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => {
                missing.push(name.to_string());
                String::new()
            }
        };

        let api_token = read(PRACTICUM_TOKEN_VAR);
        let notify_token = read(TELEGRAM_TOKEN_VAR);
        let destination_id = read(TELEGRAM_CHAT_ID_VAR);

        if !missing.is_empty() {
            return Err(crate::WatchError::MissingCredentials(missing));
        }

        Ok(Self {
            api_token,
            notify_token,
            destination_id,
        })
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_polling_interval() -> u64 {
    600
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> Option<String> {
    Some("program.log".to_string())
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_log_files() -> usize {
    5
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

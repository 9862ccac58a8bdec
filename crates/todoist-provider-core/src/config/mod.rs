//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::client::{DEFAULT_TIMEOUT_SECS, TODOIST_BASE_URL, TodoistClient};
use crate::error::Error;

/// Environment variable holding the Todoist API token
pub const TOKEN_ENV_VAR: &str = "TODOIST_TOKEN";

/// Provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(skip)]
    pub token: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: TODOIST_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl ApiConfig {
    /// Resolve the API token.
    ///
    /// An explicit value always wins over `TODOIST_TOKEN`, even when empty.
    /// An empty or missing token is an error.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Result<String, Error> {
        let token = match explicit.or(self.token.as_deref()) {
            Some(value) => value.to_string(),
            None => env::var(TOKEN_ENV_VAR).unwrap_or_default(),
        };

        if token.is_empty() {
            return Err(Error::MissingToken);
        }
        Ok(token)
    }

    /// Token with everything but the last four characters hidden
    pub fn redacted_token(&self, explicit: Option<&str>) -> Option<String> {
        self.resolve_token(explicit).ok().map(|token| {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() <= 4 {
                "***".to_string()
            } else {
                let suffix: String = chars[chars.len() - 4..].iter().collect();
                format!("***{}", suffix)
            }
        })
    }

    /// Build a client from this configuration
    pub fn build_client(&self, explicit_token: Option<&str>) -> Result<TodoistClient, Error> {
        let token = self.resolve_token(explicit_token)?;
        TodoistClient::builder()
            .api_key(token)
            .base_url(&self.base_url)
            .timeout_secs(self.timeout_secs)
            .build()
    }

    pub fn enforce_not_persisted(&self) -> anyhow::Result<()> {
        if self.token.is_some() {
            return Err(anyhow!(
                "API tokens must be provided via --token or {}, not stored in configuration",
                TOKEN_ENV_VAR
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("TODOIST_PROVIDER_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("todoist-provider")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.api.enforce_not_persisted()?;

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(anyhow!(
                "Invalid api.base_url: {}. Must start with http:// or https://",
                self.api.base_url
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be greater than zero"));
        }
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow!(
                "Invalid logging.level: {}. Valid options: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "api.base_url" => Ok(self.api.base_url.clone()),
            "api.timeout_secs" => Ok(self.api.timeout_secs.to_string()),
            "logging.level" => Ok(self.logging.level.clone()),
            "logging.file" => Ok(self
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set - logging to stderr)".to_string())),

            // Token (special handling - show redacted)
            "api.token" | "token" => match self.api.redacted_token(None) {
                Some(redacted) => Ok(redacted),
                None => Ok(format!("(not set - use --token or {} env var)", TOKEN_ENV_VAR)),
            },

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `todoist-provider config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "api.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(anyhow!("Base URL must start with http:// or https://"));
                }
                self.api.base_url = value.trim_end_matches('/').to_string();
            }
            "api.timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs value: {}", value))?;
                if secs == 0 {
                    return Err(anyhow!("Timeout must be greater than zero"));
                }
                self.api.timeout_secs = secs;
            }
            "logging.level" => {
                let level = value.to_lowercase();
                if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                    return Err(anyhow!(
                        "Invalid logging level: {}. Valid options: {}",
                        value,
                        VALID_LOG_LEVELS.join(", ")
                    ));
                }
                self.logging.level = level;
            }
            "logging.file" => {
                self.logging.file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }

            "api.token" | "token" => {
                return Err(anyhow!(
                    "API tokens cannot be stored in configuration. \
                     Pass --token or set the {} environment variable instead.",
                    TOKEN_ENV_VAR
                ));
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `todoist-provider config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = [
            "api.base_url",
            "api.timeout_secs",
            "api.token",
            "logging.level",
            "logging.file",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

pub const DEFAULT_GROUP_NAME: &str = "homecontrol";
pub const DEFAULT_HA_URL: &str = "http://homeassistant.local:8123";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub homecontrol: HomeControlConfig,
    #[serde(default)]
    pub home_assistant: HomeAssistantConfig,
    #[serde(default)]
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HomeControlConfig {
    /// Group chat to monitor and reply in
    #[serde(default = "default_group_name", alias = "group_name")]
    pub group_name: String,
    /// Session identity hint for the transport
    #[serde(default)]
    pub phone: Option<String>,
    /// Enables voice transcription when present
    #[serde(default, alias = "openai_api_key")]
    pub openai_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HomeAssistantConfig {
    #[serde(default = "default_ha_url")]
    pub url: String,
    /// Long-lived access token
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub telegram: Option<TelegramConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub enabled: bool,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

fn default_group_name() -> String {
    DEFAULT_GROUP_NAME.to_string()
}

fn default_ha_url() -> String {
    DEFAULT_HA_URL.to_string()
}

impl Default for HomeControlConfig {
    fn default() -> Self {
        Self {
            group_name: default_group_name(),
            phone: None,
            openai_api_key: None,
        }
    }
}

impl Default for HomeAssistantConfig {
    fn default() -> Self {
        Self {
            url: default_ha_url(),
            token: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            homecontrol: HomeControlConfig::default(),
            home_assistant: HomeAssistantConfig::default(),
            adapters: AdaptersConfig {
                telegram: Some(TelegramConfig {
                    enabled: false,
                    token: None,
                }),
                console: Some(ConsoleConfig {
                    enabled: true,
                }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment variables override file values
    pub fn apply_env(&mut self) {
        if let Ok(group) = std::env::var("HOMECONTROL_GROUP") {
            self.homecontrol.group_name = group;
        }

        if let Ok(phone) = std::env::var("HOMECONTROL_PHONE") {
            self.homecontrol.phone = Some(phone);
        }

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.homecontrol.openai_api_key = Some(key);
        }

        if let Ok(url) = std::env::var("HA_URL") {
            self.home_assistant.url = url;
        }

        if let Ok(token) = std::env::var("HA_TOKEN") {
            self.home_assistant.token = Some(token);
        }

        if let Ok(token) = std::env::var("BOT_TOKEN") {
            let tg = self.adapters.telegram.get_or_insert(TelegramConfig {
                enabled: true,
                token: None,
            });
            tg.token = Some(token);
            tg.enabled = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.homecontrol.group_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("group-name must not be empty".to_string()));
        }
        if !self.home_assistant.url.starts_with("http://") && !self.home_assistant.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(format!(
                "home-assistant url must be http(s): {}",
                self.home_assistant.url
            )));
        }
        Ok(())
    }

    /// Telegram bot token, if the Telegram adapter is enabled
    pub fn telegram_token(&self) -> Option<&str> {
        self.adapters
            .telegram
            .as_ref()
            .filter(|t| t.enabled)
            .and_then(|t| t.token.as_deref())
    }

    /// Key for the speech-to-text provider; blank keys count as absent
    pub fn transcription_key(&self) -> Option<&str> {
        self.homecontrol
            .openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Environment variable holding the Notion integration secret.
pub const TOKEN_ENV: &str = "INTERNAL_INTEGRATION_SECRET";

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "NOTION_TIDY_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub notion: NotionConfig,
    pub ai_model: AiModelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotionConfig {
    pub token: Option<String>,
    pub api_base: String,
    pub notion_version: String,
    pub page_url_base: String,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: "https://api.notion.com/v1".to_string(),
            notion_version: "2022-06-28".to_string(),
            page_url_base: "https://www.notion.so".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AiModelConfig {
    pub provider: String,
    pub model: String,
    pub endpoint: String,
}

impl Default for AiModelConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "gemma:2b-instruct".to_string(),
            endpoint: "http://localhost:11434".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the path in `NOTION_TIDY_CONFIG`, or `config.toml`.
    ///
    /// A missing file is not an error; every setting has a default.
    pub fn load() -> Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);

        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Config::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Override the file token with the environment variable if set
    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.notion.token = Some(token);
            }
        }
    }

    /// The integration secret, or an error naming the variable to set.
    pub fn notion_token(&self) -> Result<&str> {
        self.notion
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .with_context(|| {
                format!(
                    "Missing Notion integration secret. Set {} or [notion] token.",
                    TOKEN_ENV
                )
            })
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Bearer token for the PackLightly API
    pub token: Option<String>,
}

impl AuthConfig {
    /// Returns true if a token is available
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }
}

/// Default API endpoint for the hosted service
const DEFAULT_API_URL: &str = "https://api.packlightly.app";

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the PackLightly API
    pub api_url: ConfigValue<String>,
    /// Packing list used when --list is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_list: Option<Uuid>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Authentication configuration
    pub auth: AuthConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    default_list: Option<Uuid>,
    auth: Option<AuthConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut default_list = None;
        let mut config_file = None;
        let mut auth = AuthConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(list) = file_config.default_list {
                default_list = Some(list);
            }
            if let Some(auth_config) = file_config.auth {
                auth = auth_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("PACK_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(token) = std::env::var("PACK_API_TOKEN") {
            auth.token = Some(token);
        }
        if let Ok(list) = std::env::var("PACK_DEFAULT_LIST") {
            let parsed = list
                .parse::<Uuid>()
                .map_err(|_| ConfigError::InvalidListId(list))?;
            default_list = Some(parsed);
        }

        Ok(Self {
            api_url,
            default_list,
            config_file,
            auth,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/packlightly/
    /// - macOS: ~/Library/Application Support/packlightly/
    /// - Windows: %APPDATA%/packlightly/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("packlightly")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidListId(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidListId(value) => {
                write!(f, "PACK_DEFAULT_LIST is not a valid list id: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

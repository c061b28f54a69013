use serde::{Deserialize, Serialize};
use std::path::Path;

pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default, alias = "apikey")]
    pub api_key: String,
    #[serde(default = "default_base_url", alias = "baseurl")]
    pub base_url: String,
    #[serde(default = "default_image_base_url", alias = "imagebaseurl")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub include_adult: bool,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            include_adult: false,
        }
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .field("include_adult", &self.include_adult)
            .finish()
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    crate::tmdb::images::DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Reads the config file (a missing file is only tolerated when
    /// `required` is false), applies the credential from the environment
    /// and validates the result. This is the only place the environment is
    /// consulted.
    pub fn load(path: &str, required: bool) -> Result<Self, ConfigError> {
        let config = if required || Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        let config = config.with_api_key_override(std::env::var(API_KEY_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// A non-empty override replaces the configured key.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.tmdb.api_key = key;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.listen.tlscert.is_some() != self.listen.tlskey.is_some() {
            return Err(ConfigError::Invalid(
                "tlscert and tlskey must be set together".to_string(),
            ));
        }
        Ok(())
    }

    pub fn has_tls(&self) -> bool {
        self.listen.tlscert.is_some() && self.listen.tlskey.is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("No TMDB API key configured: set tmdb.api_key or {API_KEY_ENV}")]
    MissingApiKey,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

//! Client configuration loading.
//!
//! # Responsibility
//! - Describe where the backend lives and how list calls paginate.
//! - Layer defaults, an optional TOML file, and environment overrides.
//!
//! # Invariants
//! - A missing config file is not an error; an unreadable or invalid one is.
//! - Returned configs always pass `ClientConfig::validate()`.

use crate::gateway::http::DEFAULT_MAX_PAGES;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding `server.base_url`.
pub const ENV_BASE_URL: &str = "AREADESK_BASE_URL";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "AREADESK_LOG_LEVEL";
/// Environment variable overriding `logging.dir`.
pub const ENV_LOG_DIR: &str = "AREADESK_LOG_DIR";

const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file exists but cannot be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for the expected shape.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Values are present but unusable.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config file `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme + host (+ optional prefix) in front of `/api/v1`.
    pub base_url: String,
    /// Requested page size; server default when unset.
    pub page_size: Option<u32>,
    /// Cap on pages followed by one list call.
    pub max_pages: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute log directory; file logging is off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Full client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when it exists, otherwise starts from defaults, then
    /// applies environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::load`] with overrides read through `lookup`.
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?.unwrap_or_default(),
            None => Self::default(),
        };
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml_str(&content, path).map(Some)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            self.server.base_url = base_url.trim().to_string();
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()) {
            self.logging.level = level.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|value| !value.trim().is_empty()) {
            self.logging.dir = Some(PathBuf::from(dir.trim()));
        }
    }

    /// Checks values that would otherwise fail late at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.server.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "server.base_url must start with http:// or https://, got `{base_url}`"
            )));
        }
        if self.server.max_pages == 0 {
            return Err(ConfigError::Invalid(
                "server.max_pages must be at least 1".to_string(),
            ));
        }
        if self.server.page_size == Some(0) {
            return Err(ConfigError::Invalid(
                "server.page_size must be at least 1".to_string(),
            ));
        }
        if let Some(dir) = &self.logging.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, ENV_BASE_URL, ENV_LOG_LEVEL};
    use std::path::Path;

    #[test]
    fn partial_document_keeps_defaults() {
        let config = ClientConfig::from_toml_str(
            "[server]\nbase_url = \"https://memo.example\"\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://memo.example");
        assert_eq!(config.server.max_pages, 50);
        assert_eq!(config.server.page_size, None);
        assert_eq!(config.logging.dir, None);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = ClientConfig::default();
        config.apply_overrides(|key| match key {
            ENV_BASE_URL => Some(" http://10.0.0.2:9000 ".to_string()),
            ENV_LOG_LEVEL => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(config.server.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let mut config = ClientConfig::default();
        config.server.base_url = "localhost:8081".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ClientConfig::default();
        config.server.max_pages = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ClientConfig::default();
        config.logging.dir = Some("relative/logs".into());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}

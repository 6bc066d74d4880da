use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The hosted collection the app was built against.
pub const DEFAULT_BASE_URL: &str = "https://6698269802f3150fb67036f7.mockapi.io";

/// Environment variable overriding the collection base URL.
pub const BASE_URL_ENV: &str = "TODO_API_URL";

/// Source of a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
    Flag,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
            ConfigSource::Flag => write!(f, "flag"),
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

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the remote todo collection
    pub base_url: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file {}: {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration with priority: flag > env var > config file > default
    pub fn load(
        config_path: Option<PathBuf>,
        base_url_flag: Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or_else(Self::default_config_path);
        Self::resolve(&path, |key| std::env::var(key).ok(), base_url_flag)
    }

    fn resolve(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
        base_url_flag: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut base_url = ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default);
        let mut config_file = None;

        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
            let file_config: ConfigFile = if contents.trim().is_empty() {
                ConfigFile::default()
            } else {
                serde_yaml::from_str(&contents)
                    .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?
            };

            config_file = Some(path.to_path_buf());

            if let Some(url) = file_config.base_url {
                base_url = ConfigValue::new(url, ConfigSource::File);
            }
        }

        if let Some(url) = env(BASE_URL_ENV).filter(|url| !url.is_empty()) {
            base_url = ConfigValue::new(url, ConfigSource::Environment);
        }

        if let Some(url) = base_url_flag {
            base_url = ConfigValue::new(url, ConfigSource::Flag);
        }

        Ok(Self {
            base_url,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/todo-sync/
    /// - macOS: ~/Library/Application Support/todo-sync/
    /// - Windows: %APPDATA%/todo-sync/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todo-sync")
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(&dir.path().join("absent.yaml"), no_env, None).unwrap();
        assert_eq!(config.base_url.value, DEFAULT_BASE_URL);
        assert_eq!(config.base_url.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn file_overrides_default() {
        let file = config_file("base_url: http://localhost:3000\n");
        let config = Config::resolve(file.path(), no_env, None).unwrap();
        assert_eq!(config.base_url.value, "http://localhost:3000");
        assert_eq!(config.base_url.source, ConfigSource::File);
        assert_eq!(config.config_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn empty_file_is_accepted() {
        let file = config_file("");
        let config = Config::resolve(file.path(), no_env, None).unwrap();
        assert_eq!(config.base_url.source, ConfigSource::Default);
        assert!(config.config_file.is_some());
    }

    #[test]
    fn env_overrides_file() {
        let file = config_file("base_url: http://from-file\n");
        let env = |key: &str| (key == BASE_URL_ENV).then(|| "http://from-env".to_string());
        let config = Config::resolve(file.path(), env, None).unwrap();
        assert_eq!(config.base_url.value, "http://from-env");
        assert_eq!(config.base_url.source, ConfigSource::Environment);
    }

    #[test]
    fn empty_env_is_ignored() {
        let file = config_file("base_url: http://from-file\n");
        let env = |_: &str| Some(String::new());
        let config = Config::resolve(file.path(), env, None).unwrap();
        assert_eq!(config.base_url.source, ConfigSource::File);
    }

    #[test]
    fn flag_overrides_everything() {
        let file = config_file("base_url: http://from-file\n");
        let env = |_: &str| Some("http://from-env".to_string());
        let config =
            Config::resolve(file.path(), env, Some("http://from-flag".to_string())).unwrap();
        assert_eq!(config.base_url.value, "http://from-flag");
        assert_eq!(config.base_url.source, ConfigSource::Flag);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = config_file("base_url: [unterminated\n");
        let err = Config::resolve(file.path(), no_env, None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
    }
}

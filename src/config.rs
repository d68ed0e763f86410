//! Configuration loading.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file, then
//! `ELDTRIP_`-prefixed environment variables (nested keys joined with `__`,
//! e.g. `ELDTRIP_API__BASE_URL`), then command-line overrides.

use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Directory name used under the platform config and data directories.
const APP_DIR_NAME: &str = "eldtrip";

const CONFIG_FILE_NAME: &str = "config.toml";

const LOG_FILE_NAME: &str = "eldtrip.log";

/// Planner address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    /// Values loaded but failed validation.
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Load(Box::new(e))
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub log: LogConfig,
}

/// Where the trip planner lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address of the planner API, e.g. `https://planner.example/api`.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path. Defaults to `<data dir>/eldtrip/eldtrip.log`.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration, optionally from a custom file and with a
    /// command-line base URL override.
    pub fn load_with(
        config_path: Option<PathBuf>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        tracing::debug!(path = %config_file.display(), "loading configuration");

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ELDTRIP_").split("__"));
        if let Some(url) = base_url {
            figment = figment.merge(("api.base_url", url));
        }

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Log file path, resolving the default if unset.
    pub fn log_file(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(LOG_FILE_NAME))
    }

    /// Checks that the planner address is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let raw = self.api.base_url.trim();
        if raw.is_empty() {
            return Err(ConfigError::Invalid {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        let url = reqwest::Url::parse(raw).map_err(|e| ConfigError::Invalid {
            message: format!("api.base_url {raw:?} is not a valid URL: {e}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                message: format!("api.base_url must use http or https, got {}", url.scheme()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use figment::Jail;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn default_base_url() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn log_file_defaults_into_data_dir() {
        let config = Config::default();
        let path = config.log_file();
        assert!(path.ends_with("eldtrip/eldtrip.log"), "{path:?}");
    }

    #[test]
    fn log_file_override() {
        let mut config = Config::default();
        config.log.file = Some(PathBuf::from("/tmp/trip.log"));
        assert_eq!(config.log_file(), PathBuf::from("/tmp/trip.log"));
    }

    #[test]
    fn default_config_path_ends_with_file_name() {
        assert!(Config::default_config_path().ends_with("eldtrip/config.toml"));
    }

    mod validate {
        use super::*;

        fn with_url(url: &str) -> Config {
            Config {
                api: ApiConfig {
                    base_url: url.to_string(),
                },
                ..Config::default()
            }
        }

        #[test]
        fn https_accepted() {
            assert!(with_url("https://planner.example/api").validate().is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert!(matches!(
                with_url("  ").validate(),
                Err(ConfigError::Invalid { .. })
            ));
        }

        #[test]
        fn relative_rejected() {
            assert!(matches!(
                with_url("/api").validate(),
                Err(ConfigError::Invalid { .. })
            ));
        }

        #[test]
        fn other_scheme_rejected() {
            let err = with_url("ftp://planner.example/api").validate().unwrap_err();
            assert!(err.to_string().contains("http or https"), "{err}");
        }
    }

    mod load {
        use super::*;

        #[test]
        fn missing_file_uses_defaults() {
            let dir = tempdir().unwrap();
            let config = Config::load_with(Some(dir.path().join("absent.toml")), None).unwrap();
            assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        }

        #[test]
        fn file_overrides_defaults() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(
                &path,
                "[api]\nbase_url = \"https://planner.example/api\"\n\n[log]\nfile = \"/tmp/eldtrip-test.log\"\n",
            )
            .unwrap();
            let config = Config::load_with(Some(path), None).unwrap();
            assert_eq!(config.api.base_url, "https://planner.example/api");
            assert_eq!(config.log_file(), PathBuf::from("/tmp/eldtrip-test.log"));
        }

        #[test]
        fn cli_override_beats_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(&path, "[api]\nbase_url = \"https://file.example/api\"\n").unwrap();
            let config =
                Config::load_with(Some(path), Some("https://cli.example/api".to_string()))
                    .unwrap();
            assert_eq!(config.api.base_url, "https://cli.example/api");
        }

        #[test]
        fn invalid_file_value_rejected() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(&path, "[api]\nbase_url = \"not a url\"\n").unwrap();
            assert!(matches!(
                Config::load_with(Some(path), None),
                Err(ConfigError::Invalid { .. })
            ));
        }

        #[test]
        fn malformed_file_is_load_error() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(&path, "[api\nbase_url = ").unwrap();
            assert!(matches!(
                Config::load_with(Some(path), None),
                Err(ConfigError::Load(_))
            ));
        }

        #[test]
        fn env_overrides_file() {
            Jail::expect_with(|jail| {
                jail.create_file(
                    "config.toml",
                    "[api]\nbase_url = \"https://file.example/api\"\n",
                )?;
                jail.set_env("ELDTRIP_API__BASE_URL", "https://env.example/api");
                let path = jail.directory().join("config.toml");
                let config = Config::load_with(Some(path), None).expect("config loads");
                assert_eq!(config.api.base_url, "https://env.example/api");
                Ok(())
            });
        }
    }
}

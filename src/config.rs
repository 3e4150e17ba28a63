use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;
/// Data file used when `FLASHCARDS_DATA_PATH` is not set.
pub const DEFAULT_DATA_PATH: &str = "data/flashcards.json";
/// Front-end bundle directory used when `STATIC_DIR` is not set.
pub const DEFAULT_STATIC_DIR: &str = "client/build";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// Configuration was installed twice.
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Runtime configuration for the flashcard server.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the HTTP listener binds on all interfaces.
    pub port: u16,
    /// JSON file holding the flashcard document.
    pub data_path: PathBuf,
    /// Whether unmatched paths serve the front-end bundle.
    pub mode: RunMode,
    /// Directory of the prebuilt front-end bundle.
    pub static_dir: PathBuf,
    /// Optional file that receives a copy of the log output.
    pub log_file: Option<PathBuf>,
}

/// Deployment mode of the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// API only.
    #[default]
    Development,
    /// API plus static front-end hosting.
    Production,
}

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `PORT`.
    pub port: Option<u16>,
    /// Replaces `FLASHCARDS_DATA_PATH`.
    pub data_path: Option<PathBuf>,
    /// Replaces `STATIC_DIR`.
    pub static_dir: Option<PathBuf>,
    /// Replaces `FLASHCARDS_LOG_FILE`.
    pub log_file: Option<PathBuf>,
    /// Forces production mode.
    pub production: bool,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mode: RunMode = optional("APP_ENV")
            .or_else(|| optional("NODE_ENV"))
            .map(|value| value.parse::<RunMode>().unwrap_or_default())
            .unwrap_or_default();

        Ok(Self {
            port: optional("PORT")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("PORT".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            data_path: optional("FLASHCARDS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            mode,
            static_dir: optional("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            log_file: optional("FLASHCARDS_LOG_FILE").map(PathBuf::from),
        })
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(data_path) = overrides.data_path {
            self.data_path = data_path;
        }
        if let Some(static_dir) = overrides.static_dir {
            self.static_dir = static_dir;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = Some(log_file);
        }
        if overrides.production {
            self.mode = RunMode::Production;
        }
        self
    }
}

impl std::str::FromStr for RunMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from `.env` and the environment, apply overrides, and install it in the
/// global cache.
pub fn init_config(overrides: ConfigOverrides) -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?.with_overrides(overrides);
    tracing::debug!(
        port = config.port,
        data_path = %config.data_path.display(),
        mode = ?config.mode,
        static_dir = %config.static_dir.display(),
        log_file = ?config.log_file,
        "Loaded configuration"
    );
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(get_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = Config::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.mode, RunMode::Development);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn reads_values_from_environment() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8081"),
            ("FLASHCARDS_DATA_PATH", "/srv/cards.json"),
            ("NODE_ENV", "production"),
            ("STATIC_DIR", "web/dist"),
            ("FLASHCARDS_LOG_FILE", "/var/log/cards.log"),
        ]))
        .expect("config");
        assert_eq!(config.port, 8081);
        assert_eq!(config.data_path, PathBuf::from("/srv/cards.json"));
        assert_eq!(config.mode, RunMode::Production);
        assert_eq!(config.static_dir, PathBuf::from("web/dist"));
        assert_eq!(config.log_file, Some(PathBuf::from("/var/log/cards.log")));
    }

    #[test]
    fn app_env_takes_precedence_over_node_env() {
        let config = Config::from_lookup(lookup(&[
            ("APP_ENV", "development"),
            ("NODE_ENV", "production"),
        ]))
        .expect("config");
        assert_eq!(config.mode, RunMode::Development);
    }

    #[test]
    fn unknown_mode_falls_back_to_development() {
        let config = Config::from_lookup(lookup(&[("APP_ENV", "staging")])).expect("config");
        assert_eq!(config.mode, RunMode::Development);
    }

    #[test]
    fn mode_names_parse_case_insensitively() {
        assert_eq!(" Production ".parse::<RunMode>(), Ok(RunMode::Production));
        assert_eq!("DEVELOPMENT".parse::<RunMode>(), Ok(RunMode::Development));
        assert_eq!("prod".parse::<RunMode>(), Err(()));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[("PORT", "  ")])).expect("config");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).expect_err("bad port");
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "PORT"));
    }

    #[test]
    fn overrides_replace_environment_values() {
        let config = Config::from_lookup(lookup(&[("PORT", "8081")]))
            .expect("config")
            .with_overrides(ConfigOverrides {
                port: Some(9000),
                data_path: Some("cards.json".into()),
                static_dir: None,
                log_file: None,
                production: true,
            });
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_path, PathBuf::from("cards.json"));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.mode, RunMode::Production);
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the default config file location
pub const CONFIG_ENV_VAR: &str = "TEXTCRAFT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Clear the terminal before redrawing the editor screen
    pub clear_screen: bool,
    /// Wait for Enter after each command so its output can be read
    pub pause_after_command: bool,
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
    pub observers: ObserverConfig,
}

/// Which built-in observers the editor attaches at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub logging: bool,
    pub statistics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clear_screen: true,
            pause_after_command: false,
            log_level: "warn".to_string(),
            observers: ObserverConfig::default(),
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            logging: true,
            statistics: true,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    /// `$TEXTCRAFT_CONFIG` if set, otherwise `~/.config/textcraft/config.toml`
    pub fn config_path() -> PathBuf {
        Self::config_path_from(std::env::var(CONFIG_ENV_VAR).ok().as_deref())
    }

    fn config_path_from(override_path: Option<&str>) -> PathBuf {
        if let Some(path) = override_path.filter(|path| !path.is_empty()) {
            return Self::expand_path(Path::new(path)).unwrap_or_else(|| PathBuf::from(path));
        }
        let config_dir = shellexpand::tilde("~/.config/textcraft");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand shell variables and a leading tilde
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

use crate::config::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const APP_DIR: &str = "playground-cli";

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = app_dir()?;

        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        let config_path = config_dir.join("config.yaml");

        Ok(Self { config_path })
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn load(&self) -> Result<Config> {
        let mut config = if self.config_path.exists() {
            let content =
                fs::read_to_string(&self.config_path).context("Failed to read config file")?;
            serde_yaml::from_str(&content).context("Failed to parse config file")?
        } else {
            let default_config = Config::default();
            self.save(&default_config)?;
            default_config
        };

        if let Ok(url) = std::env::var("PLAYGROUND_APP_URL") {
            config.app_url = url;
        }
        if let Ok(level) = std::env::var("PLAYGROUND_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let content = serde_yaml::to_string(config).context("Failed to serialize config")?;

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Directory holding the config file, used for state and logs when the
    /// config does not say otherwise.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn app_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Failed to find config directory")?
        .join(APP_DIR))
}

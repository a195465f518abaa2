//! Reads and writes `config.json` under the application home.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const STAGING_FILE: &str = "config.json.tmp";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manages `<home>/config/config.json`. Nothing is created before the first save.
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// A missing or blank file yields the defaults. Hand-edited values that
    /// `Config::set` would refuse are rejected.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let data = match fs::read_to_string(&self.config_path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config =
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the file in one rename so a crash never leaves half a config.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let staging = self.config_path.with_file_name(STAGING_FILE);
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.config_path)?;
        Ok(())
    }
}

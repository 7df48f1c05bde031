use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

/// Reads and writes the planner's `config.json`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join("config.json")))
    }

    /// Uses the platform config dir, falling back to the home dir.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_base_dir(base.join("sinkingfund"))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the stored config, or the defaults when nothing has been saved yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let raw = match fs::read(&self.config_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&raw).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    /// Stages the JSON next to the target as `config.json.tmp`, then renames it into place.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_vec_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let staged = self.config_path.with_file_name(staged_name(&self.config_path));
        fs::write(&staged, json)?;
        fs::rename(&staged, &self.config_path)?;
        Ok(())
    }
}

fn staged_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config.json".to_string());
    format!("{name}.tmp")
}

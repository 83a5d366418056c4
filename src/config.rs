use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for the interactive shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Prompt shown before each line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Extra aliases keyed by command path, e.g. `"inv give": ["hand"]`
    #[serde(default)]
    pub aliases: HashMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid JSON in config: {0}")]
    InvalidJson(String),
    #[error("IO error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

pub const DEFAULT_PROMPT: &str = "cmdtree";

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("cmdtree.json"))
}

/// Load the config from `~/.config/cmdtree.json`.
pub fn load_config() -> Result<ShellConfig, ConfigError> {
    let path = config_path()
        .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config/cmdtree.json")))?;
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ShellConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson(e.to_string()))
}

impl ShellConfig {
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    /// Configured extra aliases for a command path (`"inv give"`).
    pub fn aliases_for(&self, path: &str) -> &[String] {
        self.aliases.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}

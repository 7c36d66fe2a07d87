//! Config commands: show, init, path.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::{AppConfig, ConfigError};
use crate::error::ApiError;

/// Effective configuration, printed as TOML.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigView(pub AppConfig);

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = toml::to_string_pretty(&self.0).map_err(|_| fmt::Error)?;
        write!(f, "{}", text.trim_end())
    }
}

/// A config file location.
#[derive(Debug, Clone, Serialize)]
pub struct PathView {
    pub path: PathBuf,
}

impl fmt::Display for PathView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

pub fn handle_show(config: &AppConfig) -> ConfigView {
    ConfigView(config.clone())
}

/// Writes a default config to `path` (or the platform location).
pub fn handle_init(path: Option<PathBuf>) -> Result<PathView, ApiError> {
    let path = AppConfig::init(path)?;
    Ok(PathView { path })
}

/// Where the config is read from.
pub fn handle_path(path: Option<PathBuf>) -> Result<PathView, ApiError> {
    let path = path
        .or_else(AppConfig::default_config_path)
        .ok_or(ConfigError::NoProjectDirs)?;
    Ok(PathView { path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_renders_toml() {
        let text = handle_show(&AppConfig::default()).to_string();
        assert!(text.contains("[catalog]"));
        assert!(text.contains("language = \"ja\""));
    }

    #[test]
    fn test_explicit_path() {
        let view = handle_path(Some(PathBuf::from("/etc/stampzoo.toml"))).unwrap();
        assert_eq!(view.to_string(), "/etc/stampzoo.toml");
    }
}

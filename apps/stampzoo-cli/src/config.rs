//! # Application Configuration
//!
//! Configuration for the Stamp Zoo shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STAMPZOO_DB_PATH=/data/stampzoo.db                                 │
//! │     STAMPZOO_CATALOG_PATH=./zoo_data.json                              │
//! │     STAMPZOO_LANGUAGE=en                                               │
//! │     STAMPZOO_REQUIRE_LOCATION=true                                     │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/stampzoo/config.toml (Linux)                             │
//! │     ~/Library/Application Support/com.stampzoo.stampzoo/config.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir database, bundled catalog, Japanese, no geofence │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/stampzoo/stampzoo.db"   # optional
//! max_connections = 4
//!
//! [catalog]
//! path = "./zoo_data.json"                  # optional, bundled if absent
//! language = "ja"                           # ko | en | ja | zh
//!
//! [scan]
//! require_location = false
//! default_radius_m = 200.0
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use stampzoo_core::validation::validate_radius_meters;
use stampzoo_core::{Language, DEFAULT_VALIDATION_RADIUS_M};

/// Database file name inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "stampzoo.db";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No home directory, so no platform config/data directory either.
    #[error("Could not determine the platform directories")]
    NoProjectDirs,

    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Pool size.
    /// Default: 4
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Catalog JSON document. The bundled catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Display language code.
    /// Default: "ja"
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    Language::default().code().to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            path: None,
            language: default_language(),
        }
    }
}

/// `[scan]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Reject animal scans made outside the animal's facility.
    #[serde(default)]
    pub require_location: bool,

    /// Geofence radius for facilities that do not define one, meters.
    #[serde(default = "default_radius")]
    pub default_radius_m: f64,
}

fn default_radius() -> f64 {
    DEFAULT_VALIDATION_RADIUS_M
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            require_location: false,
            default_radius_m: default_radius(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub scan: ScanSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Load Order
    /// 1. Start with defaults
    /// 2. Override with config file (if it exists)
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoProjectDirs)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Writes a default config file. Refuses to overwrite an existing one.
    pub fn init(config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoProjectDirs)?;

        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }

        Self::default().save(Some(path))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        self.catalog
            .language
            .parse::<Language>()
            .map_err(|e| ConfigError::Invalid(format!("catalog.{}", e)))?;

        validate_radius_meters(self.scan.default_radius_m)
            .map_err(|_| ConfigError::Invalid("scan.default_radius_m must be positive".into()))?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process environment in
    /// production, a map in tests).
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STAMPZOO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("STAMPZOO_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        // Left as-is; validate() reports unknown codes
        if let Some(language) = lookup("STAMPZOO_LANGUAGE") {
            self.catalog.language = language;
        }

        if let Some(flag) = lookup("STAMPZOO_REQUIRE_LOCATION") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.scan.require_location = true,
                "0" | "false" | "no" | "off" => self.scan.require_location = false,
                _ => warn!(value = %flag, "Ignoring unrecognized STAMPZOO_REQUIRE_LOCATION"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Configured display language.
    ///
    /// Unknown codes only survive when validation was skipped; they fall
    /// back to the default language.
    pub fn language(&self) -> Language {
        Language::from_code_or_default(&self.catalog.language)
    }

    /// Resolves the database file, creating the data directory when the
    /// default location is used.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoProjectDirs)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "stampzoo", "stampzoo")
}

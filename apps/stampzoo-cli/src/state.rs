//! # Application Context
//!
//! Everything a command needs, built once at startup and passed down
//! explicitly.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppContext                                      │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │    AppConfig     │ │     ZooData      │ │      Database        │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • language      │ │  • facilities    │ │  • SQLite pool       │    │
//! │  │  • geofence      │ │  • animals       │ │  • collector gate    │    │
//! │  │    settings      │ │  • bingo cards   │ │  • change feed       │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │       read-only             read-only          internally synced       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use tracing::info;

use stampzoo_core::{Language, ZooData};
use stampzoo_db::{Database, DbConfig};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Catalog compiled into the binary, used when no catalog path is set.
pub const BUNDLED_CATALOG: &str = include_str!("../../../data/zoo_data.json");

/// Shared state for command handlers.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: AppConfig,
    catalog: ZooData,
    db: Database,
    database_path: PathBuf,
}

impl AppContext {
    pub fn new(config: AppConfig, catalog: ZooData, db: Database, database_path: PathBuf) -> Self {
        AppContext {
            config,
            catalog,
            db,
            database_path,
        }
    }

    /// Loads the catalog and opens the database described by `config`.
    pub async fn open(config: AppConfig) -> Result<Self, ApiError> {
        let catalog = load_catalog(config.catalog.path.as_deref())?;

        let db_path = config.database_path()?;
        info!(path = %db_path.display(), "Opening stamp database");
        let db = Database::new(
            DbConfig::new(&db_path).max_connections(config.database.max_connections),
        )
        .await?;

        Ok(AppContext::new(config, catalog, db, db_path))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ZooData {
        &self.catalog
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Resolved SQLite file backing [`AppContext::db`].
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn language(&self) -> Language {
        self.config.language()
    }
}

/// Reads the catalog from `path`, or decodes the bundled one.
pub fn load_catalog(path: Option<&Path>) -> Result<ZooData, ApiError> {
    let catalog = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog from file");
            let text = std::fs::read_to_string(path).map_err(|e| {
                ApiError::new(
                    crate::error::ErrorCode::ConfigError,
                    format!("Failed to read catalog {}: {}", path.display(), e),
                )
            })?;
            ZooData::from_json(&text)?
        }
        None => ZooData::from_json(BUNDLED_CATALOG)?,
    };

    info!(
        version = %catalog.metadata.version,
        animals = catalog.animals.len(),
        facilities = catalog.facilities.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

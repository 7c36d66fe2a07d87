//! Status command: store health, migrations, counts and catalog info.

use serde::Serialize;
use std::fmt;

use stampzoo_core::{Language, ModeSummary, BINGO_CAPACITY};
use stampzoo_db::migrations::migration_status;

use crate::error::ApiError;
use crate::state::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub database_path: String,
    pub healthy: bool,
    pub migrations_applied: usize,
    pub migrations_total: usize,
    pub stamps: ModeSummary,
    pub board_complete: bool,
    pub catalog_version: String,
    pub catalog_animals: usize,
    pub language: Language,
    pub require_location: bool,
}

pub async fn handle_status(ctx: &AppContext) -> Result<StatusView, ApiError> {
    let db = ctx.db();
    let healthy = db.health_check().await;
    let migrations = migration_status(db.pool()).await?;
    let stamps = db.stamps().mode_summary().await?;

    Ok(StatusView {
        database_path: ctx.database_path().display().to_string(),
        healthy,
        migrations_applied: migrations.applied,
        migrations_total: migrations.total,
        stamps,
        board_complete: stamps.total() >= BINGO_CAPACITY,
        catalog_version: ctx.catalog().metadata.version.clone(),
        catalog_animals: ctx.catalog().animals.len(),
        language: ctx.language(),
        require_location: ctx.config().scan.require_location,
    })
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Database:   {}", self.database_path)?;
        writeln!(
            f,
            "Health:     {}",
            if self.healthy { "ok" } else { "unavailable" }
        )?;
        writeln!(
            f,
            "Migrations: {}/{}",
            self.migrations_applied, self.migrations_total
        )?;
        writeln!(
            f,
            "Stamps:     {}/{} ({} real, {} test)",
            self.stamps.total(),
            BINGO_CAPACITY,
            self.stamps.real,
            self.stamps.test
        )?;
        writeln!(
            f,
            "Catalog:    v{} ({} animals)",
            self.catalog_version, self.catalog_animals
        )?;
        writeln!(f, "Language:   {}", self.language)?;
        write!(
            f,
            "Geofence:   {}",
            if self.require_location { "required" } else { "off" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::scan::handle_scan;
    use crate::config::AppConfig;
    use crate::state::tests::test_context;

    #[tokio::test]
    async fn test_status_counts() {
        let ctx = test_context(AppConfig::default()).await;
        handle_scan(&ctx, "stamp_zoo://animal/giraffe", None).await.unwrap();
        handle_scan(&ctx, "stamp_zoo://test/animal/seal", None).await.unwrap();

        let view = handle_status(&ctx).await.unwrap();
        assert!(view.healthy);
        assert_eq!(view.migrations_applied, view.migrations_total);
        assert_eq!(view.stamps, ModeSummary { real: 1, test: 1 });
        assert!(!view.board_complete);
        assert_eq!(view.catalog_version, "1.0.0");
        assert_eq!(view.language, Language::Ja);

        let text = view.to_string();
        assert!(text.contains("Stamps:     2/9 (1 real, 1 test)"));
        assert!(text.contains("Geofence:   off"));
    }
}

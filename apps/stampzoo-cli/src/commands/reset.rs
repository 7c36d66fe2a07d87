//! Reset command: bulk delete of collected stamps.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct ResetView {
    pub deleted: u64,
}

/// Deletes every stamp. Refuses unless `confirmed`.
pub async fn handle_reset(ctx: &AppContext, confirmed: bool) -> Result<ResetView, ApiError> {
    if !confirmed {
        return Err(ApiError::validation(
            "Reset deletes every collected stamp; pass --yes to confirm",
        ));
    }

    let deleted = ctx.db().reset_collection().await?;
    warn!(deleted, "Collection reset by user");

    Ok(ResetView { deleted })
}

impl fmt::Display for ResetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deleted {} stamps.", self.deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::scan::handle_scan;
    use crate::config::AppConfig;
    use crate::error::ErrorCode;
    use crate::state::tests::test_context;
    use stampzoo_core::ScanOutcome;

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let ctx = test_context(AppConfig::default()).await;
        handle_scan(&ctx, "stamp_zoo://animal/giraffe", None).await.unwrap();

        let err = handle_reset(&ctx, false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(ctx.db().stamps().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_and_notifies() {
        let ctx = test_context(AppConfig::default()).await;
        let mut changes = ctx.db().subscribe();

        handle_scan(&ctx, "stamp_zoo://animal/giraffe", None).await.unwrap();
        handle_scan(&ctx, "stamp_zoo://animal/zebra", None).await.unwrap();
        changes.borrow_and_update();

        let view = handle_reset(&ctx, true).await.unwrap();
        assert_eq!(view.deleted, 2);
        assert!(changes.has_changed().unwrap());

        // Slots start over after a reset
        assert_eq!(
            handle_scan(&ctx, "stamp_zoo://animal/zebra", None).await.unwrap(),
            ScanOutcome::Collected {
                slot_number: 1,
                animal_id: "zebra".to_string(),
                is_test: false
            }
        );
    }
}

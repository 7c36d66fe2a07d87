//! Guide command: every catalog animal with its collection state.

use serde::Serialize;
use std::fmt;

use stampzoo_core::{FieldGuide, Language};

use crate::error::ApiError;
use crate::state::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct GuideView {
    pub language: Language,
    pub collected: usize,
    pub total: usize,
    #[serde(flatten)]
    pub guide: FieldGuide,
}

pub async fn handle_guide(ctx: &AppContext) -> Result<GuideView, ApiError> {
    let stamps = ctx.db().stamps().list_by_slot().await?;
    let guide = FieldGuide::build(ctx.catalog(), &stamps, ctx.language());

    Ok(GuideView {
        language: ctx.language(),
        collected: guide.collected_count(),
        total: guide.total(),
        guide,
    })
}

impl fmt::Display for GuideView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.guide.entries {
            let mark = match entry.slot_number {
                Some(slot) => format!("[{}]", slot),
                None => "[ ]".to_string(),
            };
            writeln!(f, "{:<4} {} ({})", mark, entry.name, entry.facility_name)?;
        }
        write!(f, "{}/{} animals collected", self.collected, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::scan::handle_scan;
    use crate::config::AppConfig;
    use crate::state::tests::test_context;

    #[tokio::test]
    async fn test_guide_marks_collected() {
        let mut config = AppConfig::default();
        config.catalog.language = "ko".to_string();
        let ctx = test_context(config).await;
        handle_scan(&ctx, "stamp_zoo://animal/otter", None).await.unwrap();

        let view = handle_guide(&ctx).await.unwrap();
        assert_eq!(view.total, ctx.catalog().animals.len());
        assert_eq!(view.collected, 1);

        let otter = view
            .guide
            .entries
            .iter()
            .find(|e| e.animal_id == "otter")
            .unwrap();
        assert_eq!(otter.name, "수달");
        assert_eq!(otter.facility_name, "펭귄 해안");
        assert_eq!(otter.slot_number, Some(1));

        assert!(view.to_string().contains("[1]  수달"));
    }
}

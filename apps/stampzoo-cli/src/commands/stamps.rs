//! Stamps command: collected stamps, newest first.

use chrono::Local;
use serde::Serialize;
use std::fmt;

use stampzoo_core::CollectedStamp;

use crate::error::ApiError;
use crate::state::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct StampRow {
    #[serde(flatten)]
    pub stamp: CollectedStamp,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StampsView {
    pub stamps: Vec<StampRow>,
}

/// Lists stamps. `test_filter` narrows to test (`Some(true)`) or real
/// (`Some(false)`) collections.
pub async fn handle_stamps(
    ctx: &AppContext,
    test_filter: Option<bool>,
) -> Result<StampsView, ApiError> {
    let repo = ctx.db().stamps();
    let stamps = match test_filter {
        Some(is_test) => repo.list_by_test_flag(is_test).await?,
        None => repo.list_recent().await?,
    };

    let lang = ctx.language();
    let rows = stamps
        .into_iter()
        .map(|stamp| StampRow {
            name: ctx
                .catalog()
                .animal(&stamp.animal_id)
                .map(|a| a.name(lang).to_string()),
            stamp,
        })
        .collect();

    Ok(StampsView { stamps: rows })
}

impl fmt::Display for StampsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stamps.is_empty() {
            return write!(f, "No stamps collected yet.");
        }

        let lines: Vec<String> = self
            .stamps
            .iter()
            .map(|row| {
                let stamp = &row.stamp;
                let when = stamp
                    .collected_at()
                    .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                format!(
                    "#{} {} @ {} {}{}",
                    stamp.slot_number,
                    row.name.as_deref().unwrap_or(&stamp.animal_id),
                    stamp.facility_name,
                    when,
                    if stamp.is_test_collection { " [test]" } else { "" }
                )
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

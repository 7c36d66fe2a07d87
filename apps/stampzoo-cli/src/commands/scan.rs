//! # Scan Command
//!
//! Routes one raw scan to its destination.
//!
//! ## Routing
//! ```text
//! raw text
//!    │
//!    ▼
//! qr::parse ──── None ──────────────────────────────► InvalidCode
//!    │
//!    ├── facility/{id} ─────────────────────────────► Facility
//!    ├── bingo/{id} ────────────────────────────────► Bingo
//!    ├── event/{id} ────────────────────────────────► Event
//!    └── animal/{id}
//!          │
//!          ├── not in catalog ──────────────────────► AnimalNotFound
//!          ├── require_location && outside ─────────► OutsideFacility
//!          └── StampCollector::collect
//!                ├── Collected ─────────────────────► Collected { slot }
//!                ├── AlreadyCollected ──────────────► AlreadyCollected
//!                └── CapacityReached ───────────────► CapacityReached
//! ```
//!
//! Only animal codes write anything. Storage failures come back as
//! `ApiError`, never as an outcome.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use stampzoo_core::geo;
use stampzoo_core::qr::{self, QrKind, QrPayload};
use stampzoo_core::{CollectOutcome, CollectRequest, GeoPoint, ScanOutcome};

use crate::error::ApiError;
use crate::state::AppContext;

/// Handles one scan.
pub async fn handle_scan(
    ctx: &AppContext,
    raw: &str,
    location: Option<GeoPoint>,
) -> Result<ScanOutcome, ApiError> {
    let Some(payload) = qr::parse(raw) else {
        info!(raw = %raw, "Scanned text is not a Stamp Zoo code");
        return Ok(ScanOutcome::InvalidCode);
    };

    debug!(
        kind = %payload.kind(),
        id = %payload.id(),
        is_test = payload.mode().is_test(),
        "Scanned code"
    );

    let id = payload.id().to_string();
    match payload.kind() {
        QrKind::Facility => Ok(ScanOutcome::Facility { facility_id: id }),
        QrKind::Bingo => Ok(ScanOutcome::Bingo { id }),
        QrKind::Event => Ok(ScanOutcome::Event { id }),
        QrKind::Animal => collect_animal(ctx, raw, &payload, location).await,
    }
}

async fn collect_animal(
    ctx: &AppContext,
    raw: &str,
    payload: &QrPayload,
    location: Option<GeoPoint>,
) -> Result<ScanOutcome, ApiError> {
    let catalog = ctx.catalog();
    let Some(animal) = catalog.animal(payload.id()) else {
        info!(animal_id = %payload.id(), "Animal not in catalog");
        return Ok(ScanOutcome::AnimalNotFound {
            animal_id: payload.id().to_string(),
        });
    };

    let scan = &ctx.config().scan;
    if scan.require_location {
        let inside = catalog
            .facility_for_animal(animal)
            .is_some_and(|f| geo::is_within_facility_or(location, f, scan.default_radius_m));
        if !inside {
            info!(
                animal_id = %animal.id,
                facility_id = %animal.facility_id,
                "Scan outside facility"
            );
            return Ok(ScanOutcome::OutsideFacility {
                facility_id: animal.facility_id.clone(),
            });
        }
    }

    let facility_name = catalog.facility_name_for_animal(animal, ctx.language());
    let mut request = CollectRequest::new(animal.id.as_str(), raw, facility_name)?
        .test_collection(payload.mode().is_test());
    if let Some(point) = location {
        request = request.with_location(point);
    }

    let outcome = match ctx.db().collector().collect(&request).await? {
        CollectOutcome::Collected { stamp } => ScanOutcome::Collected {
            slot_number: stamp.slot_number,
            animal_id: stamp.animal_id,
            is_test: stamp.is_test_collection,
        },
        CollectOutcome::AlreadyCollected => ScanOutcome::AlreadyCollected {
            animal_id: animal.id.clone(),
        },
        CollectOutcome::CapacityReached => ScanOutcome::CapacityReached,
    };

    Ok(outcome)
}

// =============================================================================
// Output
// =============================================================================

/// Scan outcome plus the display names needed to print it.
#[derive(Debug, Clone, Serialize)]
pub struct ScanView {
    #[serde(flatten)]
    pub outcome: ScanOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ScanView {
    pub fn new(ctx: &AppContext, outcome: ScanOutcome) -> Self {
        let lang = ctx.language();
        let catalog = ctx.catalog();
        let name = match &outcome {
            ScanOutcome::Collected { animal_id, .. }
            | ScanOutcome::AlreadyCollected { animal_id } => {
                catalog.animal(animal_id).map(|a| a.name(lang).to_string())
            }
            ScanOutcome::Facility { facility_id }
            | ScanOutcome::OutsideFacility { facility_id } => {
                catalog.facility(facility_id).map(|f| f.name(lang).to_string())
            }
            _ => None,
        };
        ScanView { outcome, name }
    }
}

impl fmt::Display for ScanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |fallback: &str| self.name.clone().unwrap_or_else(|| fallback.to_string());
        match &self.outcome {
            ScanOutcome::InvalidCode => write!(f, "Not a Stamp Zoo code."),
            ScanOutcome::AnimalNotFound { animal_id } => {
                write!(f, "No animal with id {} in the catalog.", animal_id)
            }
            ScanOutcome::OutsideFacility { facility_id } => write!(
                f,
                "You need to be at {} to collect this stamp.",
                name(facility_id)
            ),
            ScanOutcome::Collected {
                slot_number,
                animal_id,
                is_test,
            } => write!(
                f,
                "Collected {} in slot {}{}.",
                name(animal_id),
                slot_number,
                if *is_test { " (test)" } else { "" }
            ),
            ScanOutcome::AlreadyCollected { animal_id } => {
                write!(f, "{} is already on your board.", name(animal_id))
            }
            ScanOutcome::CapacityReached => write!(f, "Your bingo board is full."),
            ScanOutcome::Facility { facility_id } => {
                write!(f, "Facility: {}", name(facility_id))
            }
            ScanOutcome::Bingo { id } => write!(f, "Bingo card {}", id),
            ScanOutcome::Event { id } => write!(f, "Event {}", id),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Domain Types
//!
//! Core domain types used throughout Stamp Zoo.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CollectRequest  │──►│ CollectedStamp  │   │ CollectOutcome  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  animal_id      │   │  slot_number    │   │  Collected      │       │
//! │  │  source_code    │   │  animal_id      │   │  AlreadyColl.   │       │
//! │  │  facility_name  │   │  collected_at   │   │  CapacityReach. │       │
//! │  │  location?      │   │  is_test        │   └─────────────────┘       │
//! │  │  is_test        │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    GeoPoint     │   │   ScanOutcome   │  (routing result of a scan)  │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_animal_id, validate_coordinates, ValidationResult};

// =============================================================================
// Geo Point
// =============================================================================

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point after range-checking both coordinates.
    pub fn new(latitude: f64, longitude: f64) -> ValidationResult<Self> {
        validate_coordinates(latitude, longitude)?;
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}

// =============================================================================
// Collect Request
// =============================================================================

/// Input to a single stamp collection attempt.
///
/// ## Example
/// ```rust
/// use stampzoo_core::{CollectRequest, GeoPoint};
///
/// let request = CollectRequest::new("a123", "stamp_zoo://animal/a123", "North Zoo")
///     .unwrap()
///     .with_location(GeoPoint::new(35.0, 139.0).unwrap())
///     .test_collection(false);
/// assert_eq!(request.animal_id(), "a123");
///
/// assert!(CollectRequest::new("  ", "raw", "North Zoo").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectRequest {
    animal_id: String,
    source_code: String,
    facility_name: String,
    location: Option<GeoPoint>,
    is_test_collection: bool,
}

impl CollectRequest {
    /// Creates a request. Fails when `animal_id` is blank.
    pub fn new(
        animal_id: impl Into<String>,
        source_code: impl Into<String>,
        facility_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let animal_id = animal_id.into();
        validate_animal_id(&animal_id)?;

        Ok(CollectRequest {
            animal_id,
            source_code: source_code.into(),
            facility_name: facility_name.into(),
            location: None,
            is_test_collection: false,
        })
    }

    /// Attaches the visitor's location at scan time.
    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    /// Marks the request as coming from a test code.
    pub fn test_collection(mut self, is_test: bool) -> Self {
        self.is_test_collection = is_test;
        self
    }

    pub fn animal_id(&self) -> &str {
        &self.animal_id
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn facility_name(&self) -> &str {
        &self.facility_name
    }

    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn is_test_collection(&self) -> bool {
        self.is_test_collection
    }
}

// =============================================================================
// Collected Stamp
// =============================================================================

/// One completed collection event (one row of `collected_stamps`).
///
/// Created once by the collection transaction, never mutated, removed only
/// by a bulk reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CollectedStamp {
    /// Row identity assigned by the store.
    #[ts(type = "number")]
    pub id: i64,
    /// Bingo slot, 1..=9, in collection order.
    pub slot_number: u32,
    pub animal_id: String,
    /// Wall-clock time of the insert, epoch milliseconds.
    #[ts(type = "number")]
    pub collected_at_millis: i64,
    /// Raw scanned text, kept for audit.
    pub source_code: String,
    pub facility_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_test_collection: bool,
}

impl CollectedStamp {
    /// Collection time as a UTC datetime.
    pub fn collected_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.collected_at_millis).single()
    }

    /// Location at scan time, when both coordinates were recorded.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// Collect Outcome
// =============================================================================

/// Business result of one collection attempt.
///
/// Storage failures are not represented here; they travel on the error
/// channel of the store so callers can tell "try again" apart from the
/// rule-based rejections below.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CollectOutcome {
    /// A new stamp was recorded.
    Collected { stamp: CollectedStamp },
    /// This animal already has a stamp. Nothing was written.
    AlreadyCollected,
    /// All slots are filled. Nothing was written.
    CapacityReached,
}

impl CollectOutcome {
    #[inline]
    pub fn is_collected(&self) -> bool {
        matches!(self, CollectOutcome::Collected { .. })
    }

    /// Slot assigned by a successful collection.
    pub fn slot_number(&self) -> Option<u32> {
        match self {
            CollectOutcome::Collected { stamp } => Some(stamp.slot_number),
            _ => None,
        }
    }
}

// =============================================================================
// Scan Outcome
// =============================================================================

/// Routing result of one raw scan.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Text did not match the QR grammar.
    InvalidCode,
    /// Animal code whose id is not in the catalog.
    AnimalNotFound { animal_id: String },
    /// Visitor location is required but outside the facility geofence.
    OutsideFacility { facility_id: String },
    /// A new stamp was collected.
    Collected {
        slot_number: u32,
        animal_id: String,
        is_test: bool,
    },
    AlreadyCollected { animal_id: String },
    CapacityReached,
    /// Facility code: open the facility page.
    Facility { facility_id: String },
    /// Bingo code: open the bingo board.
    Bingo { id: String },
    /// Event code: open the event page.
    Event { id: String },
}

// =============================================================================
// Reporting
// =============================================================================

/// Counts of collected stamps split by provenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModeSummary {
    pub real: u32,
    pub test: u32,
}

impl ModeSummary {
    #[inline]
    pub fn total(&self) -> u32 {
        self.real + self.test
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

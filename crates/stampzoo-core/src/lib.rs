//! # stampzoo-core: Pure Business Logic for Stamp Zoo
//!
//! This crate holds the rules of the stamp rally as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stamp Zoo Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Scanner / UI layer (external collaborator)          │   │
//! │  │        camera ──► raw text ──► debounce ──► scan request        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stampzoo-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │    qr    │  │ catalog  │  │  bingo   │  │   geo    │       │   │
//! │  │   │  parse   │  │ ZooData  │  │  board   │  │ geofence │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             stampzoo-db (Database Layer)                        │   │
//! │  │        SQLite store, migrations, collection transaction         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`qr`] - QR payload parser
//! - [`types`] - Domain types (CollectedStamp, CollectRequest, outcomes)
//! - [`catalog`] - Static reference data (animals, facilities, bingo cards)
//! - [`bingo`] - Board and field guide projections
//! - [`geo`] - Facility geofence check
//! - [`validation`] - Input validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stampzoo_core::qr::{self, QrKind, QrMode};
//!
//! let payload = qr::parse("stamp_zoo://animal/a123").unwrap();
//! assert_eq!(payload.mode(), QrMode::Real);
//! assert_eq!(payload.kind(), QrKind::Animal);
//! assert_eq!(payload.id(), "a123");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bingo;
pub mod catalog;
pub mod error;
pub mod geo;
pub mod qr;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bingo::{BingoBoard, BingoSlot, FieldGuide, FieldGuideEntry};
pub use catalog::{Animal, BingoCard, Facility, Language, ZooData};
pub use error::{CoreError, CoreResult, ValidationError};
pub use qr::{QrKind, QrMode, QrPayload};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Scheme prefix every Stamp Zoo QR code starts with.
pub const QR_SCHEME_PREFIX: &str = "stamp_zoo://";

/// Number of slots on the bingo board; collection stops once all are filled.
pub const BINGO_CAPACITY: u32 = 9;

/// Width (and height) of the bingo grid.
pub const BINGO_GRID_SIZE: usize = 3;

/// Geofence radius used when a facility does not define its own.
pub const DEFAULT_VALIDATION_RADIUS_M: f64 = 200.0;

/// Upper bound on animal identifier length. Catalog ids are UUIDs.
pub const MAX_ANIMAL_ID_LEN: usize = 128;

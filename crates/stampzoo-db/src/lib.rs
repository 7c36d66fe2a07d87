//! # stampzoo-db: Database Layer for Stamp Zoo
//!
//! Local SQLite storage for collected stamps, and the transaction that
//! records them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stamp Zoo Data Flow                              │
//! │                                                                         │
//! │  scan command (parsed animal code)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stampzoo-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ StampCollector│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (collector.rs)│    │  (embedded)  │  │   │
//! │  │   │               │    └───────┬───────┘    │              │  │   │
//! │  │   │ SqlitePool    │            ▼            │ 001_init.sql │  │   │
//! │  │   │ write gate    │    ┌───────────────┐    │              │  │   │
//! │  │   │ change feed   │◄───│ StampRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/stampzoo/stampzoo.db                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, write gate and change feed
//! - [`collector`] - The stamp collection transaction
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Stamp repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stampzoo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/stampzoo.db")).await?;
//!
//! let outcome = db.collector().collect(&request).await?;
//! let board = db.stamps().list_by_slot().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collector;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use collector::{StampCollector, MAX_COLLECT_ATTEMPTS};
pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::stamp::StampRepository;

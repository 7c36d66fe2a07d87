//! # Repository Module
//!
//! Database repository implementations for Stamp Zoo.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                  StampCollector                           │
//! │       │                            │                                    │
//! │       │ db.stamps().list_by_slot() │ StampRepository::count_collected  │
//! │       ▼                            ▼ (inside its transaction)           │
//! │  StampRepository                                                       │
//! │  ├── read model      list_by_slot, list_recent, mode_summary, ...      │
//! │  ├── txn blocks      count_collected, find_by_animal_id, insert        │
//! │  └── reset           delete_all                                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StampRepository`] - Collected stamp storage

pub mod stamp;

pub use stamp::{NewStamp, StampRepository};

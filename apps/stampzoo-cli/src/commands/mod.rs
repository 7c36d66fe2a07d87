//! # Commands Module
//!
//! One handler per subcommand. Each handler returns a view that is
//! both `Serialize` (for `--json`) and `Display` (for the terminal).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── scan.rs     ◄─── Parse + collect (the main flow)
//! ├── parse.rs    ◄─── Parse only, no storage
//! ├── board.rs    ◄─── 3x3 bingo board
//! ├── guide.rs    ◄─── Field guide over the catalog
//! ├── stamps.rs   ◄─── Collected stamp listing
//! ├── status.rs   ◄─── Store and catalog status
//! ├── reset.rs    ◄─── Bulk delete
//! └── config.rs   ◄─── Config show/init/path
//! ```
//!
//! ## Handler Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  async fn handle_x(ctx: &AppContext, ..) -> Result<XView, ApiError>     │
//! │         │                                                               │
//! │         ├── ctx.catalog()  ◄── read-only zoo data                       │
//! │         ├── ctx.db()       ◄── stamps, collector, change feed           │
//! │         ▼                                                               │
//! │  lib::emit(json, &view)    ◄── JSON or Display to stdout                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod board;
pub mod config;
pub mod guide;
pub mod parse;
pub mod reset;
pub mod scan;
pub mod stamps;
pub mod status;

pub use board::{handle_board, BoardView};
pub use guide::{handle_guide, GuideView};
pub use parse::{handle_parse, ParseView};
pub use reset::{handle_reset, ResetView};
pub use scan::{handle_scan, ScanView};
pub use stamps::{handle_stamps, StampsView};
pub use status::{handle_status, StatusView};

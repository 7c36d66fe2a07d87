//! # Stamp Zoo CLI Library
//!
//! Command dispatch for the `stampzoo` binary.
//!
//! ## Module Organization
//! ```text
//! stampzoo_cli/
//! ├── lib.rs          ◄─── You are here (dispatch & output)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── AppConfig (TOML + env overrides)
//! ├── state.rs        ◄─── AppContext (config, catalog, database)
//! ├── logging.rs      ◄─── tracing subscriber setup
//! ├── error.rs        ◄─── ApiError for every command
//! └── commands/       ◄─── One handler per subcommand
//! ```
//!
//! ## Run Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  main ──► Cli::parse ──► init_logging ──► run(cli)                      │
//! │                                             │                           │
//! │                  ┌──────────────────────────┴─────────────┐             │
//! │                  ▼                                        ▼             │
//! │          parse / config                          scan / board / ...     │
//! │          (no database)                   AppConfig::load ──► open       │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                          handler ──► emit               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use stampzoo_core::GeoPoint;

use crate::cli::{Cli, Command, ConfigCommand};
use crate::commands::config::{handle_init, handle_path, handle_show};
use crate::commands::{
    handle_board, handle_guide, handle_parse, handle_reset, handle_scan, handle_stamps,
    handle_status, ScanView,
};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::AppContext;

/// Prints a command result: pretty JSON with `--json`, otherwise its
/// `Display` form.
pub fn emit<T: Serialize + Display>(json: bool, value: &T) -> Result<(), ApiError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

/// Runs one parsed command line.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let json = cli.json;

    // ===== Commands that never open the database =====
    match &cli.command {
        Command::Parse { raw } => return emit(json, &handle_parse(raw)?),
        Command::Config(ConfigCommand::Init) => {
            return emit(json, &handle_init(cli.config.clone())?)
        }
        Command::Config(ConfigCommand::Path) => {
            return emit(json, &handle_path(cli.config.clone())?)
        }
        Command::Config(ConfigCommand::Show) => {
            let config = AppConfig::load(cli.config.clone())?;
            return emit(json, &handle_show(&config));
        }
        _ => {}
    }

    let config = AppConfig::load(cli.config.clone())?;
    let ctx = AppContext::open(config).await?;
    debug!(revision = ctx.db().revision(), "Context ready");

    let result = dispatch(&ctx, cli.command, json).await;
    ctx.db().close().await;
    result
}

async fn dispatch(ctx: &AppContext, command: Command, json: bool) -> Result<(), ApiError> {
    match command {
        Command::Scan(args) => {
            let location = match (args.lat, args.lon) {
                (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)?),
                _ => None,
            };
            let outcome = handle_scan(ctx, &args.raw, location).await?;
            emit(json, &ScanView::new(ctx, outcome))
        }
        Command::Board => emit(json, &handle_board(ctx).await?),
        Command::Guide => emit(json, &handle_guide(ctx).await?),
        Command::Stamps(args) => emit(json, &handle_stamps(ctx, args.test_filter()).await?),
        Command::Status => emit(json, &handle_status(ctx).await?),
        Command::Reset { yes } => emit(json, &handle_reset(ctx, yes).await?),
        Command::Parse { .. } | Command::Config(_) => Ok(()),
    }
}

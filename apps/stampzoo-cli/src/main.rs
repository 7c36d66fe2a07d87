//! # Stamp Zoo
//!
//! Entry point for the `stampzoo` command-line shell.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use stampzoo_cli::cli::Cli;
use stampzoo_cli::logging::init_logging;
use stampzoo_cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let json = cli.json;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(code = ?err.code, "Command failed");
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("{}", err),
                }
            } else {
                eprintln!("error: {}", err);
            }
            ExitCode::from(err.code.exit_status())
        }
    }
}

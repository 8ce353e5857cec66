//! spatialite-fetch CLI entry point
//!
//! Parses command-line arguments and executes the requested command.
//! Fatal errors are rendered through the user-friendly error layer before
//! the process exits non-zero; a "no update available" run exits zero.

use anyhow::Result;
use clap::Parser;
use spatialite_fetch::cli;
use spatialite_fetch::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

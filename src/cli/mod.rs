//! Command-line interface for spatialite-fetch.
//!
//! Two subcommands cover the tool's whole surface:
//! - `update` runs the fetch pipeline (version check, download, extract,
//!   repackage) with early exit when the stored version is current.
//! - `check` reports whether a newer version is advertised without
//!   touching anything on disk.
//!
//! Global flags control verbosity, the progress bar, and the optional
//! configuration file.

mod check;
mod update;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::UpdaterConfig;

/// Main CLI structure.
#[derive(Parser)]
#[command(
    name = "spatialite-fetch",
    about = "Mirror the mod_spatialite Windows binaries as a plain zip archive",
    version,
    long_about = "spatialite-fetch checks the SpatiaLite homepage for the latest \
mod_spatialite Windows x86 release, downloads the .7z archive when a newer version \
exists, extracts it with 7-Zip, and repackages the files into a .zip for users \
without the 7-Zip software."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress everything except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable the download progress bar.
    #[arg(long, global = true)]
    no_progress: bool,

    /// Path to a TOML configuration file overriding URLs and paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest binaries and repackage them as a zip.
    Update(update::UpdateCommand),
    /// Check whether a newer version is advertised upstream.
    Check(check::CheckCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let config = UpdaterConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Update(cmd) => cmd.execute(config, self.no_progress).await,
            Commands::Check(cmd) => cmd.execute(config).await,
        }
    }
}

/// Install the tracing subscriber on stderr.
///
/// User-facing progress goes to stdout via plain prints; the subscriber
/// only carries diagnostics, so the default level stays at `warn` unless
/// `--verbose` or `RUST_LOG` raises it.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::config::UpdaterConfig;
use crate::download::HttpFetcher;
use crate::extract::SevenZip;
use crate::pipeline::{UpdateOptions, UpdateOutcome, UpdatePipeline};

/// Arguments for the `update` command.
///
/// Runs the full pipeline: version check, download, extraction, and
/// repackaging, with early exit when the stored version is current.
#[derive(Parser, Debug)]
pub struct UpdateCommand {
    /// Force a refresh regardless of the stored version; stale output
    /// artifacts are deleted first.
    #[arg(long, alias = "ignore_version")]
    ignore_version: bool,

    /// Download only; skip extraction and repackaging.
    #[arg(long, alias = "no_extract")]
    no_extract: bool,

    /// Skip repackaging the extracted files into the output zip.
    #[arg(long, alias = "no_rezip", conflicts_with = "no_extract")]
    no_rezip: bool,
}

impl UpdateCommand {
    pub async fn execute(self, config: UpdaterConfig, no_progress: bool) -> Result<()> {
        let fetcher = HttpFetcher::new(!no_progress)?;
        let extractor = SevenZip::new(config.sevenzip_path.clone());
        let pipeline = UpdatePipeline::new(config, fetcher, extractor);

        let options = UpdateOptions {
            ignore_version: self.ignore_version,
            no_extract: self.no_extract,
            no_rezip: self.no_rezip,
        };

        match pipeline.run(options).await? {
            UpdateOutcome::UpToDate { .. } => {
                println!("{}", "No updates available".green());
            }
            UpdateOutcome::Updated { version, .. } => {
                println!();
                println!("{} now mirroring {version}", "DONE!".green().bold());
            }
        }

        Ok(())
    }
}

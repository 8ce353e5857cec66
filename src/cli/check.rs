use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::config::UpdaterConfig;
use crate::download::HttpFetcher;
use crate::extract::SevenZip;
use crate::pipeline::UpdatePipeline;

/// Arguments for the `check` command.
///
/// Fetches the advertised version and compares it with the stored one;
/// nothing on disk is modified. Exits successfully either way.
#[derive(Parser, Debug)]
pub struct CheckCommand {}

impl CheckCommand {
    pub async fn execute(self, config: UpdaterConfig) -> Result<()> {
        let fetcher = HttpFetcher::new(false)?;
        let pipeline = UpdatePipeline::new(config, fetcher, SevenZip::new(None));

        let status = pipeline.check().await?;
        match (&status.stored, status.update_available) {
            (Some(stored), true) => {
                println!(
                    "{}",
                    format!("Update available: {stored} -> {}", status.remote).green()
                );
                println!("Run `spatialite-fetch update` to fetch it");
            }
            (Some(stored), false) => {
                println!("Stored version {stored} is up to date (remote is {})", status.remote);
            }
            (None, _) => {
                println!("No stored version found; remote version is {}", status.remote);
            }
        }

        Ok(())
    }
}

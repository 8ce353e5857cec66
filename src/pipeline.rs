//! The linear update pipeline.
//!
//! Control flows strictly downward:
//! check version → (exit early if current) → download → extract →
//! repackage. There are no retries and no branching beyond the early exit
//! and the skip flags. A failed step leaves earlier artifacts in place for
//! manual inspection.

use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::UpdaterConfig;
use crate::core::FetchError;
use crate::download::HttpFetcher;
use crate::extract::Extractor;
use crate::repackage;
use crate::version::{self, VersionFile};

/// Per-run switches, mapped straight from the CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Skip the stored-version comparison and refresh unconditionally,
    /// deleting stale output artifacts first.
    pub ignore_version: bool,
    /// Stop after the download (skips extraction and repackaging).
    pub no_extract: bool,
    /// Stop after extraction (skips repackaging).
    pub no_rezip: bool,
}

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The stored version is already current; nothing on disk was touched.
    UpToDate {
        stored: String,
        remote: String,
    },
    /// A newer version was fetched.
    Updated {
        version: String,
        /// Whether the output zip was (re)written.
        repackaged: bool,
    },
}

/// Result of a [`UpdatePipeline::check`] probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckStatus {
    /// Version advertised on the homepage.
    pub remote: String,
    /// Version recorded in the local file, if the file exists.
    pub stored: Option<String>,
    /// Whether an update run would proceed past step 1.
    pub update_available: bool,
}

/// The four-step pipeline, parameterized over the extraction backend so
/// tests can substitute a double for the 7-Zip subprocess.
pub struct UpdatePipeline<E> {
    config: UpdaterConfig,
    fetcher: HttpFetcher,
    extractor: E,
    workdir: PathBuf,
}

impl<E: Extractor> UpdatePipeline<E> {
    pub fn new(config: UpdaterConfig, fetcher: HttpFetcher, extractor: E) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            workdir: PathBuf::from("."),
        }
    }

    /// Resolve relative artifact paths against `dir` instead of the
    /// process working directory.
    #[must_use]
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = dir.into();
        self
    }

    /// Run the pipeline.
    pub async fn run(&self, opts: UpdateOptions) -> Result<UpdateOutcome, FetchError> {
        // Step 1: version check.
        let remote = self.fetch_remote_version().await?;
        println!("Current version: {remote}");

        let version_file = VersionFile::new(self.resolve(&self.config.version_file));

        if opts.ignore_version {
            info!("--ignore-version set, skipping comparison");
            self.remove_stale_artifacts(&remote)?;
        } else {
            let stored = version_file.read_current()?;
            if !version::is_newer(&remote, &stored) {
                debug!("stored version {} is current", stored);
                return Ok(UpdateOutcome::UpToDate { stored, remote });
            }
            println!("{}", format!("Updating {stored} -> {remote}...").cyan());
            version_file.write_updated(&remote)?;
        }

        // Step 2: download.
        let url = self.config.archive_url(&remote);
        let archive_path = self.resolve(&self.config.archive_file);
        self.fetcher.download_archive(&url, &archive_path).await?;

        if opts.no_extract {
            return Ok(UpdateOutcome::Updated {
                version: remote,
                repackaged: false,
            });
        }

        // Step 3: extraction.
        println!("Extracting {}...", self.config.archive_file.display());
        self.extractor.extract(&archive_path, &self.workdir).await?;

        if opts.no_rezip {
            return Ok(UpdateOutcome::Updated {
                version: remote,
                repackaged: false,
            });
        }

        // Step 4: repackaging.
        println!("Compressing to {}...", self.config.output_zip.display());
        let extracted = repackage::find_extracted_dir(&self.workdir, &self.config.dir_prefix)?;
        let entries =
            repackage::repackage_dir(&extracted, &self.resolve(&self.config.output_zip))?;
        debug!("wrote {} entries", entries);

        Ok(UpdateOutcome::Updated {
            version: remote,
            repackaged: true,
        })
    }

    /// Fetch the remote version and compare it with the stored one without
    /// touching anything on disk.
    pub async fn check(&self) -> Result<CheckStatus, FetchError> {
        let remote = self.fetch_remote_version().await?;
        let stored = VersionFile::new(self.resolve(&self.config.version_file))
            .read_current()
            .ok();
        let update_available = stored
            .as_deref()
            .is_none_or(|stored| version::is_newer(&remote, stored));

        Ok(CheckStatus {
            remote,
            stored,
            update_available,
        })
    }

    async fn fetch_remote_version(&self) -> Result<String, FetchError> {
        let marker = version::version_marker(&self.config.version_marker)?;
        let body = self.fetcher.fetch_page(&self.config.home_url).await?;
        version::extract_remote_version(&marker, &body).ok_or_else(|| {
            FetchError::VersionMarkerNotFound {
                url: self.config.home_url.clone(),
            }
        })
    }

    /// Delete the stale output archive and extracted directory before a
    /// forced refresh.
    fn remove_stale_artifacts(&self, remote: &str) -> Result<(), FetchError> {
        let output_zip = self.resolve(&self.config.output_zip);
        if output_zip.exists() {
            info!("removing stale {}", output_zip.display());
            fs::remove_file(&output_zip).map_err(|_| FetchError::FileSystemError {
                operation: "remove stale output archive".to_string(),
                path: output_zip.display().to_string(),
            })?;
        }

        let extracted = self.workdir.join(self.config.extracted_dir_name(remote));
        if extracted.exists() {
            info!("removing stale {}", extracted.display());
            fs::remove_dir_all(&extracted).map_err(|_| FetchError::FileSystemError {
                operation: "remove stale extracted directory".to_string(),
                path: extracted.display().to_string(),
            })?;
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }
}

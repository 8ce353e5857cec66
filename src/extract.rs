//! Archive extraction capability.
//!
//! Extraction shells out to the external 7-Zip program. The [`Extractor`]
//! trait keeps that subprocess behind a seam so the pipeline can run
//! against a test double, and so a library-based backend could be swapped
//! in without touching the pipeline.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::constants::{SEVENZIP_BINARY, WINDOWS_SEVENZIP_PATH};
use crate::core::FetchError;

/// Capability interface: unpack `archive` into `dest`, or fail.
#[allow(async_fn_in_trait)]
pub trait Extractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), FetchError>;
}

/// Extractor that spawns the external 7-Zip executable with
/// `x <archive>`, running in the destination directory so the
/// version-named subdirectory lands there.
pub struct SevenZip {
    configured: Option<PathBuf>,
}

impl SevenZip {
    /// Use the configured executable path, or discover one at launch time.
    #[must_use]
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    /// Resolve the executable to spawn: the configured path when given,
    /// then the conventional Windows install location, then PATH lookup.
    ///
    /// Resolution happens at launch time so a missing executable only
    /// fails runs that actually reach the extraction step.
    fn resolve_exe(&self) -> Result<PathBuf, FetchError> {
        if let Some(path) = &self.configured {
            return Ok(path.clone());
        }

        let windows_default = Path::new(WINDOWS_SEVENZIP_PATH);
        if windows_default.exists() {
            return Ok(windows_default.to_path_buf());
        }

        which::which(SEVENZIP_BINARY).map_err(|_| FetchError::ExtractorNotFound {
            path: format!("{WINDOWS_SEVENZIP_PATH} (or `{SEVENZIP_BINARY}` on PATH)"),
        })
    }
}

impl Extractor for SevenZip {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), FetchError> {
        let exe = self.resolve_exe()?;
        // The subprocess runs in `dest`, so the archive path must stay
        // valid from there.
        let archive = archive.canonicalize()?;

        info!("extracting {} with {}", archive.display(), exe.display());
        let output = Command::new(&exe)
            .arg("x")
            .arg(&archive)
            .current_dir(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FetchError::ExtractorNotFound {
                        path: exe.display().to_string(),
                    }
                } else {
                    FetchError::IoError(e)
                }
            })?;

        if !output.status.success() {
            return Err(FetchError::ExtractionFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("extraction finished ({})", output.status);
        Ok(())
    }
}

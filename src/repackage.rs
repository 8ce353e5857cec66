//! Re-archiving extracted files into the output zip.
//!
//! The extracted tree is located by name prefix, and every file directly
//! inside it is written into a deflate-compressed zip under its bare
//! filename. Nested directories are not walked; the upstream archive keeps
//! all DLLs at the top level.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::FetchError;

/// Find the first directory under `root` whose name starts with `prefix`.
///
/// Candidates are sorted by name so the result is deterministic when
/// several versions have been extracted side by side.
pub fn find_extracted_dir(root: &Path, prefix: &str) -> Result<PathBuf, FetchError> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .map(|entry| entry.path())
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::ExtractedDirNotFound {
            prefix: prefix.to_string(),
        })
}

/// Write every file directly inside `src_dir` into a deflate-compressed
/// zip at `output`, overwriting any prior archive. Returns the number of
/// entries written.
pub fn repackage_dir(src_dir: &Path, output: &Path) -> Result<usize, FetchError> {
    info!(
        "compressing {} into {}",
        src_dir.display(),
        output.display()
    );

    let mut files: Vec<PathBuf> = fs::read_dir(src_dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.path())
        .collect();
    files.sort();

    let mut zip = ZipWriter::new(File::create(output)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut written = 0;
    for path in &files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        debug!("adding {}", name);
        zip.start_file(name, options)?;
        io::copy(&mut File::open(path)?, &mut zip)?;
        written += 1;
    }

    zip.finish()?;
    Ok(written)
}

//! Version-marker scraping, version ordering, and the version file.
//!
//! The mirrored version is tracked as the first line of a local text file.
//! Ordering uses semantic-version comparison when both tokens parse as
//! semver, which keeps multi-digit components ordered correctly
//! (`10.0.0` > `9.5.0`); tokens that are not valid semver fall back to
//! byte-wise lexicographic ordering.

use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::core::FetchError;

/// Compile the version-marker pattern from the configuration.
pub fn version_marker(pattern: &str) -> Result<Regex, FetchError> {
    Regex::new(pattern).map_err(|e| FetchError::ConfigError {
        message: format!("invalid version marker pattern '{pattern}': {e}"),
    })
}

/// Extract the advertised version from a page body.
///
/// Returns the first capture of `marker`, trimmed, or `None` when the page
/// does not contain the marker.
#[must_use]
pub fn extract_remote_version(marker: &Regex, body: &str) -> Option<String> {
    marker
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Whether `remote` should be treated as newer than `stored`.
#[must_use]
pub fn is_newer(remote: &str, stored: &str) -> bool {
    match (
        semver::Version::parse(stored),
        semver::Version::parse(remote),
    ) {
        (Ok(stored), Ok(remote)) => remote > stored,
        _ => remote > stored,
    }
}

/// The version-tracking text file.
///
/// The first line is the mirrored version; everything after it is a
/// descriptive note. On update the whole file is rewritten with the new
/// version and the canonical note, replacing any prior trailing text.
pub struct VersionFile {
    path: PathBuf,
}

impl VersionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored version from the first line.
    pub fn read_current(&self) -> Result<String, FetchError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::VersionFileNotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                FetchError::IoError(e)
            }
        })?;

        let version = content.lines().next().unwrap_or("").trim().to_string();
        debug!("stored version: '{}'", version);
        Ok(version)
    }

    /// Rewrite the file with `version` on the first line followed by the
    /// canonical note.
    pub fn write_updated(&self, version: &str) -> Result<(), FetchError> {
        let content = format!("{version}\n\n{}\n", constants::VERSION_FILE_NOTE);
        std::fs::write(&self.path, content)?;
        debug!("recorded version {} in {}", version, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_marker() -> Regex {
        version_marker(constants::VERSION_MARKER_PATTERN).unwrap()
    }

    #[test]
    fn extracts_version_from_page_body() {
        let marker = default_marker();
        let body = "<p>the current version is <b>5.0.1</b>, released recently</p>";
        assert_eq!(
            extract_remote_version(&marker, body),
            Some("5.0.1".to_string())
        );
    }

    #[test]
    fn extracts_first_match_only() {
        let marker = default_marker();
        let body = "current version is <b>5.0.1</b> ... current version is <b>4.3.0</b>";
        assert_eq!(
            extract_remote_version(&marker, body),
            Some("5.0.1".to_string())
        );
    }

    #[test]
    fn missing_marker_yields_none() {
        let marker = default_marker();
        assert_eq!(extract_remote_version(&marker, "<html>nothing here</html>"), None);
    }

    #[test]
    fn invalid_marker_pattern_is_config_error() {
        let err = version_marker("current version is <b>(").unwrap_err();
        assert!(matches!(err, FetchError::ConfigError { .. }));
    }

    #[test]
    fn semver_ordering_handles_multi_digit_components() {
        assert!(is_newer("5.0.1", "5.0.0"));
        assert!(!is_newer("5.0.0", "5.0.1"));
        assert!(!is_newer("5.0.1", "5.0.1"));
        // Lexicographic ordering would get this one wrong.
        assert!(is_newer("10.0.0", "9.5.0"));
        assert!(!is_newer("9.5.0", "10.0.0"));
    }

    #[test]
    fn non_semver_tokens_fall_back_to_lexicographic() {
        assert!(is_newer("2016b", "2016a"));
        assert!(!is_newer("2016a", "2016b"));
        assert!(!is_newer("2016a", "2016a"));
    }

    #[test]
    fn reads_first_line_as_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.txt");
        std::fs::write(&path, "5.0.0\n\nsome trailing note\n").unwrap();

        let file = VersionFile::new(&path);
        assert_eq!(file.read_current().unwrap(), "5.0.0");
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let dir = TempDir::new().unwrap();
        let file = VersionFile::new(dir.path().join("README.txt"));
        let err = file.read_current().unwrap_err();
        assert!(matches!(err, FetchError::VersionFileNotFound { .. }));
    }

    #[test]
    fn write_replaces_trailing_text_with_canonical_note() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.txt");
        std::fs::write(&path, "5.0.0\n\nhand-written remarks\n").unwrap();

        let file = VersionFile::new(&path);
        file.write_updated("5.0.1").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("5.0.1\n"));
        assert!(content.contains("7-Zip software"));
        assert!(!content.contains("hand-written remarks"));
        assert_eq!(file.read_current().unwrap(), "5.0.1");
    }
}

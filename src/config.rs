//! Updater configuration.
//!
//! All URLs and paths the pipeline touches live in an explicit
//! [`UpdaterConfig`] that is passed into every step, so tests can point the
//! pipeline at mock servers and temporary directories. The defaults come
//! from [`crate::constants`]; a TOML file (either `--config <path>` or a
//! `spatialite-fetch.toml` in the working directory) can override any field.
//!
//! ```toml
//! # spatialite-fetch.toml
//! home_url = "https://www.gaia-gis.it/fossil/libspatialite/home"
//! bin_url = "https://www.gaia-gis.it/gaia-sins/windows-bin-x86/"
//! version_file = "README.txt"
//! sevenzip_path = "C:\\Tools\\7-Zip\\7z.exe"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::core::FetchError;

/// Explicit configuration for one updater run.
///
/// Relative paths are resolved against the pipeline's working directory
/// (the process working directory unless overridden for tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Page scraped for the advertised version.
    pub home_url: String,

    /// Base URL the archive filename is joined onto.
    pub bin_url: String,

    /// Pattern whose first capture group is the advertised version.
    pub version_marker: String,

    /// Text file whose first line records the mirrored version.
    pub version_file: PathBuf,

    /// Local path the downloaded `.7z` archive is written to.
    pub archive_file: PathBuf,

    /// Local path of the repackaged `.zip` archive.
    pub output_zip: PathBuf,

    /// Directory-name prefix identifying the extracted tree.
    pub dir_prefix: String,

    /// Platform tag between the version and the archive extension.
    pub platform_tag: String,

    /// Explicit 7-Zip executable path; discovered when unset.
    pub sevenzip_path: Option<PathBuf>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            home_url: constants::DEFAULT_HOME_URL.to_string(),
            bin_url: constants::DEFAULT_BIN_URL.to_string(),
            version_marker: constants::VERSION_MARKER_PATTERN.to_string(),
            version_file: PathBuf::from(constants::DEFAULT_VERSION_FILE),
            archive_file: PathBuf::from(constants::DEFAULT_ARCHIVE_FILE),
            output_zip: PathBuf::from(constants::DEFAULT_OUTPUT_ZIP),
            dir_prefix: constants::PRODUCT_PREFIX.to_string(),
            platform_tag: constants::PLATFORM_TAG.to_string(),
            sevenzip_path: None,
        }
    }
}

impl UpdaterConfig {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist and parse. Otherwise
    /// `spatialite-fetch.toml` in the working directory is used when
    /// present, and the built-in defaults when not.
    pub fn load(path: Option<&Path>) -> Result<Self, FetchError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(constants::DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    debug!("no configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, FetchError> {
        debug!("loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| FetchError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Name of the directory the upstream archive unpacks to,
    /// e.g. `mod_spatialite-5.0.1-win-x86`.
    #[must_use]
    pub fn extracted_dir_name(&self, version: &str) -> String {
        format!("{}-{}-{}", self.dir_prefix, version, self.platform_tag)
    }

    /// Filename of the upstream archive for `version`.
    #[must_use]
    pub fn archive_name(&self, version: &str) -> String {
        format!("{}.7z", self.extracted_dir_name(version))
    }

    /// Full download URL for `version`, joined onto [`Self::bin_url`].
    #[must_use]
    pub fn archive_url(&self, version: &str) -> String {
        format!(
            "{}/{}",
            self.bin_url.trim_end_matches('/'),
            self.archive_name(version)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_upstream_layout() {
        let config = UpdaterConfig::default();
        assert_eq!(config.home_url, constants::DEFAULT_HOME_URL);
        assert_eq!(config.version_file, PathBuf::from("README.txt"));
        assert_eq!(config.archive_file, PathBuf::from("bin.7z"));
        assert_eq!(config.output_zip, PathBuf::from("bin.zip"));
        assert!(config.sevenzip_path.is_none());
    }

    #[test]
    fn archive_url_joins_base_and_filename() {
        let config = UpdaterConfig::default();
        assert_eq!(
            config.archive_url("5.0.1"),
            "https://www.gaia-gis.it/gaia-sins/windows-bin-x86/mod_spatialite-5.0.1-win-x86.7z"
        );

        // A base URL without a trailing slash joins the same way.
        let config = UpdaterConfig {
            bin_url: "https://mirror.example.com/spatialite".to_string(),
            ..UpdaterConfig::default()
        };
        assert_eq!(
            config.archive_url("5.0.1"),
            "https://mirror.example.com/spatialite/mod_spatialite-5.0.1-win-x86.7z"
        );
    }

    #[test]
    fn extracted_dir_name_embeds_version() {
        let config = UpdaterConfig::default();
        assert_eq!(
            config.extracted_dir_name("5.0.1"),
            "mod_spatialite-5.0.1-win-x86"
        );
    }

    #[test]
    fn load_reads_overrides_and_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "home_url = \"http://127.0.0.1:9/home\"\nversion_file = \"VERSION\""
        )
        .unwrap();

        let config = UpdaterConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.home_url, "http://127.0.0.1:9/home");
        assert_eq!(config.version_file, PathBuf::from("VERSION"));
        // Untouched fields keep their defaults.
        assert_eq!(config.bin_url, constants::DEFAULT_BIN_URL);
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "no_such_option = true").unwrap();

        let err = UpdaterConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, FetchError::TomlError(_)));
    }

    #[test]
    fn load_missing_explicit_file_is_config_error() {
        let err = UpdaterConfig::load(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(matches!(err, FetchError::ConfigError { .. }));
    }
}

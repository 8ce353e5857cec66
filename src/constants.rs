//! Fixed URLs, paths, and patterns used across the pipeline.
//!
//! These values are the defaults baked into
//! [`UpdaterConfig`](crate::config::UpdaterConfig); every one of them can be
//! overridden through a configuration file. Defining them centrally keeps
//! the magic strings discoverable.

/// SpatiaLite homepage advertising the current version.
pub const DEFAULT_HOME_URL: &str = "https://www.gaia-gis.it/fossil/libspatialite/home";

/// Base URL of the Windows x86 binary distribution area.
///
/// Directory listing is forbidden upstream; only full artifact URLs work.
pub const DEFAULT_BIN_URL: &str = "https://www.gaia-gis.it/gaia-sins/windows-bin-x86/";

/// Pattern capturing the advertised version out of the homepage HTML.
pub const VERSION_MARKER_PATTERN: &str = r"current version is <b>([^<]+)</b>";

/// Leading segment of the directory name packed inside the upstream archive.
pub const PRODUCT_PREFIX: &str = "mod_spatialite";

/// Platform tag between the version and the archive extension.
pub const PLATFORM_TAG: &str = "win-x86";

/// Version-tracking text file; the first line holds the mirrored version.
pub const DEFAULT_VERSION_FILE: &str = "README.txt";

/// Where the downloaded `.7z` archive lands.
pub const DEFAULT_ARCHIVE_FILE: &str = "bin.7z";

/// The repackaged output archive.
pub const DEFAULT_OUTPUT_ZIP: &str = "bin.zip";

/// Configuration file probed in the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "spatialite-fetch.toml";

/// Conventional 7-Zip install location on Windows.
pub const WINDOWS_SEVENZIP_PATH: &str = r"C:\Program Files (x86)\7-Zip\7z.exe";

/// 7-Zip executable name for PATH discovery.
pub const SEVENZIP_BINARY: &str = "7z";

/// Descriptive note written below the version line in the version file.
pub const VERSION_FILE_NOTE: &str = "This is a direct copy of the mod_spatialite-*.7z file \
available from http://www.gaia-gis.it/gaia-sins/windows-bin-x86 that has been converted into \
.zip format for wider use by those without the 7-Zip software.";

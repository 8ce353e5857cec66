//! spatialite-fetch - SpatiaLite Windows-binary retriever
//!
//! A one-shot maintenance utility that mirrors the `mod_spatialite`
//! Windows x86 binaries as a plain `.zip` archive. Each run walks a fixed
//! linear pipeline:
//!
//! 1. Scrape the SpatiaLite homepage for the advertised version and
//!    compare it against the version recorded in a local text file.
//! 2. Download the matching `mod_spatialite-<version>-win-x86.7z` archive.
//! 3. Extract it by shelling out to 7-Zip.
//! 4. Repackage the extracted files into a deflate-compressed `.zip` for
//!    users without 7-Zip.
//!
//! The pipeline exits early with success when the stored version is
//! already current. There are no retries, no timeouts, and no state beyond
//! the version file and the archives on disk; concurrent invocations are
//! not supported.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`update`, `check`)
//! - [`config`] - Explicit configuration passed into every pipeline step
//! - [`constants`] - Default URLs, paths, and patterns
//! - [`core`] - Error types and user-facing error rendering
//! - [`download`] - Page fetch and streaming archive download
//! - [`extract`] - The `Extractor` capability and its 7-Zip backend
//! - [`pipeline`] - The linear pipeline gluing the steps together
//! - [`repackage`] - Re-archiving extracted files into the output zip
//! - [`version`] - Version-marker scraping, ordering, and the version file

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod download;
pub mod extract;
pub mod pipeline;
pub mod repackage;
pub mod version;

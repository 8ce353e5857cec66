//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;

use spatialite_fetch::config::UpdaterConfig;
use spatialite_fetch::core::FetchError;
use spatialite_fetch::extract::Extractor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Extractor double standing in for the 7-Zip subprocess: "extracting"
/// creates the version-named directory with a fixed set of files.
pub struct StubExtractor {
    pub dir_name: String,
    pub files: Vec<(&'static str, &'static [u8])>,
}

impl StubExtractor {
    pub fn new(dir_name: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            files: vec![
                ("a.txt", b"alpha".as_slice()),
                ("b.dll", b"\x4d\x5abinary".as_slice()),
            ],
        }
    }
}

impl Extractor for StubExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), FetchError> {
        assert!(
            archive.exists(),
            "archive must exist before extraction runs"
        );
        let dir = dest.join(&self.dir_name);
        std::fs::create_dir_all(&dir)?;
        for (name, content) in &self.files {
            std::fs::write(dir.join(name), content)?;
        }
        Ok(())
    }
}

/// Extractor double that must never be reached.
pub struct PanicExtractor;

impl Extractor for PanicExtractor {
    async fn extract(&self, _archive: &Path, _dest: &Path) -> Result<(), FetchError> {
        panic!("extraction must not run in this scenario");
    }
}

/// Homepage body advertising `version` in the upstream markup.
pub fn home_page_body(version: &str) -> String {
    format!(
        "<html><body><p>Welcome! The current version is <b>{version}</b> \
         (see the download area).</p></body></html>"
    )
}

/// Configuration pointing at a mock server, with default relative paths.
pub fn test_config(server_uri: &str) -> UpdaterConfig {
    UpdaterConfig {
        home_url: format!("{server_uri}/home"),
        bin_url: format!("{server_uri}/bin/"),
        ..UpdaterConfig::default()
    }
}

/// Mount the homepage advertising `version`.
pub async fn mock_home_page(server: &MockServer, version: &str) {
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string(home_page_body(version)))
        .mount(server)
        .await;
}

/// Mount the archive download for `version` with the given bytes.
pub async fn mock_archive_download(server: &MockServer, version: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/bin/mod_spatialite-{version}-win-x86.7z"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

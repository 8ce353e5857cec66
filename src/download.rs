//! Page fetch and streaming archive download.
//!
//! Both network calls of the pipeline go through [`HttpFetcher`]: a plain
//! text GET for the homepage and a streamed GET for the binary archive.
//! The archive download succeeds on HTTP 200 exactly; any other status is a
//! fatal error carrying the numeric status code. There are no retries and
//! no request timeouts; a hung server stalls the run.

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::FetchError;

/// HTTP client wrapper shared by the version check and the download step.
pub struct HttpFetcher {
    client: reqwest::Client,
    show_progress: bool,
}

impl HttpFetcher {
    /// Build a fetcher with the crate's user agent.
    pub fn new(show_progress: bool) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            show_progress,
        })
    }

    /// Fetch a page body as text.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        debug!("fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Stream `url` to `dest`, overwriting any prior content.
    pub async fn download_archive(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        info!("downloading {}", url);
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::DownloadFailed {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let progress = match response.content_length() {
            Some(total) if self.show_progress => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
                        )
                        .expect("progress bar template must be valid")
                        .progress_chars("#>-"),
                );
                Some(pb)
            }
            _ => None,
        };

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(FetchError::from)?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            if let Some(pb) = &progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        debug!("wrote {} bytes to {}", downloaded, dest.display());
        Ok(())
    }
}

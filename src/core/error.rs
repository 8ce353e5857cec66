//! Error handling for spatialite-fetch.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`FetchError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable
//!    suggestions for CLI users
//!
//! No step of the pipeline is retried; every variant here is fatal and is
//! surfaced to the invoking user through [`user_friendly_error`] before the
//! process exits non-zero.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for spatialite-fetch operations.
///
/// Each variant represents one of the pipeline's failure modes: the version
/// marker missing from the homepage, a non-200 download response, the
/// external 7-Zip executable missing or failing, or plain filesystem
/// trouble. Errors include the details a user needs to diagnose the failure
/// (URLs, paths, HTTP status codes, subprocess stderr).
#[derive(Error, Debug)]
pub enum FetchError {
    /// The homepage did not contain the version marker.
    ///
    /// Fatal and unrecoverable; usually means the upstream page layout
    /// changed.
    #[error("no version marker found on {url}")]
    VersionMarkerNotFound {
        /// The page that was scraped
        url: String,
    },

    /// The archive download returned something other than HTTP 200.
    #[error("download failed with status code {status}: {url}")]
    DownloadFailed {
        /// The archive URL that was requested
        url: String,
        /// The HTTP status code the server answered with
        status: u16,
    },

    /// The external 7-Zip executable could not be found.
    #[error("7-Zip executable not found at {path}")]
    ExtractorNotFound {
        /// The path (or PATH lookup) that was tried
        path: String,
    },

    /// The extraction subprocess ran but exited unsuccessfully.
    #[error("extraction failed ({status})")]
    ExtractionFailed {
        /// The subprocess exit status
        status: String,
        /// Captured stderr of the subprocess
        stderr: String,
    },

    /// No extracted directory matched the expected name prefix.
    #[error("no extracted directory matching '{prefix}*' found")]
    ExtractedDirNotFound {
        /// The directory-name prefix that was searched for
        prefix: String,
    },

    /// The version-tracking file does not exist.
    #[error("version file not found: {path}")]
    VersionFileNotFound {
        /// Expected location of the version file
        path: String,
    },

    /// Configuration file problems (unreadable file, bad path).
    #[error("configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Network-level failure (DNS, connect, TLS, read).
    #[error("network error during {operation}: {reason}")]
    NetworkError {
        /// What was being attempted (e.g. "page fetch", "archive download")
        operation: String,
        /// The underlying transport error
        reason: String,
    },

    /// Filesystem operation failed at a known path.
    #[error("file system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "remove stale archive")
        operation: String,
        /// The path involved
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Zip archive error
    #[error("zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let operation = if err.is_connect() {
            "connect"
        } else if err.is_timeout() {
            "request (timed out)"
        } else if err.is_body() || err.is_decode() {
            "response read"
        } else {
            "http request"
        };
        Self::NetworkError {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }
}

impl Clone for FetchError {
    fn clone(&self) -> Self {
        match self {
            Self::VersionMarkerNotFound { url } => Self::VersionMarkerNotFound { url: url.clone() },
            Self::DownloadFailed { url, status } => Self::DownloadFailed {
                url: url.clone(),
                status: *status,
            },
            Self::ExtractorNotFound { path } => Self::ExtractorNotFound { path: path.clone() },
            Self::ExtractionFailed { status, stderr } => Self::ExtractionFailed {
                status: status.clone(),
                stderr: stderr.clone(),
            },
            Self::ExtractedDirNotFound { prefix } => Self::ExtractedDirNotFound {
                prefix: prefix.clone(),
            },
            Self::VersionFileNotFound { path } => Self::VersionFileNotFound { path: path.clone() },
            Self::ConfigError { message } => Self::ConfigError {
                message: message.clone(),
            },
            Self::NetworkError { operation, reason } => Self::NetworkError {
                operation: operation.clone(),
                reason: reason.clone(),
            },
            Self::FileSystemError { operation, path } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            // Errors that don't implement Clone are flattened to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::ZipError(e) => Self::Other {
                message: format!("zip error: {e}"),
            },
            Self::Other { message } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Wrapper that adds user-friendly context to a [`FetchError`].
///
/// The CLI renders fatal errors through this type: the error itself in red,
/// optional details in yellow, and an actionable suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: FetchError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: FetchError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining why the error occurred.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`FetchError`] variants and common [`std::io::Error`] kinds
/// and attaches a suggestion tailored to the failure; everything else is
/// passed through with its full error chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(fetch_error) = error.downcast_ref::<FetchError>() {
        return create_error_context(fetch_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(FetchError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership or run from a directory you can write to")
                .with_details("A file or directory could not be accessed with the current permissions");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(FetchError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Fall back to the error with its full chain so nothing is hidden.
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(FetchError::Other { message })
}

fn create_error_context(error: FetchError) -> ErrorContext {
    match &error {
        FetchError::VersionMarkerNotFound { url } => {
            let url = url.clone();
            ErrorContext::new(error)
                .with_details("The upstream page no longer advertises a version in the expected markup")
                .with_suggestion(format!(
                    "Open {url} in a browser and check whether the page layout changed; \
                     the marker pattern can be overridden in the configuration file"
                ))
        }
        FetchError::DownloadFailed { status, .. } => {
            let status = *status;
            let suggestion = if status == 404 {
                "The advertised version may not have been published to the download area yet; \
                 try again later or check the download base URL"
            } else {
                "Check the download base URL and that the upstream server is reachable"
            };
            ErrorContext::new(error)
                .with_details(format!("The server answered with HTTP {status} instead of 200"))
                .with_suggestion(suggestion)
        }
        FetchError::ExtractorNotFound { .. } => ErrorContext::new(error)
            .with_details("Extraction shells out to the external 7-Zip program")
            .with_suggestion(
                "Install 7-Zip (https://www.7-zip.org/) or point `sevenzip_path` in the \
                 configuration file at the executable",
            ),
        FetchError::ExtractionFailed { stderr, .. } => {
            let details = if stderr.is_empty() {
                None
            } else {
                Some(format!("7-Zip reported: {stderr}"))
            };
            let ctx = ErrorContext::new(error)
                .with_suggestion("The downloaded archive may be truncated; delete it and re-run");
            match details {
                Some(d) => ctx.with_details(d),
                None => ctx,
            }
        }
        FetchError::ExtractedDirNotFound { .. } => ErrorContext::new(error)
            .with_details("Repackaging looks for the directory 7-Zip unpacked next to the archive")
            .with_suggestion("Run without --no-extract so the archive is unpacked first"),
        FetchError::VersionFileNotFound { path } => {
            let path = path.clone();
            ErrorContext::new(error).with_suggestion(format!(
                "Create {path} with the currently mirrored version on its first line, \
                 or run `update --ignore-version` to skip the comparison"
            ))
        }
        FetchError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the path passed to --config and the TOML syntax of the file"),
        FetchError::NetworkError { .. } => ErrorContext::new(error)
            .with_suggestion("Check your network connection and that the upstream host is up"),
        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_status_code() {
        let err = FetchError::DownloadFailed {
            url: "https://example.com/bin.7z".to_string(),
            status: 404,
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("https://example.com/bin.7z"));
    }

    #[test]
    fn context_builder_accumulates_fields() {
        let ctx = ErrorContext::new(FetchError::VersionMarkerNotFound {
            url: "https://example.com".to_string(),
        })
        .with_details("layout changed")
        .with_suggestion("check the page");

        let rendered = ctx.to_string();
        assert!(rendered.contains("no version marker"));
        assert!(rendered.contains("Details: layout changed"));
        assert!(rendered.contains("Suggestion: check the page"));
    }

    #[test]
    fn user_friendly_error_maps_extractor_not_found() {
        let err = anyhow::Error::new(FetchError::ExtractorNotFound {
            path: "/opt/7z".to_string(),
        });
        let ctx = user_friendly_error(err);
        assert!(ctx.suggestion.as_deref().unwrap_or("").contains("7-Zip"));
    }

    #[test]
    fn clone_flattens_io_errors() {
        let err = FetchError::IoError(std::io::Error::other("boom"));
        match err.clone() {
            FetchError::Other { message } => assert!(message.contains("boom")),
            other => panic!("expected Other, got {other:?}"),
        }
    }
}

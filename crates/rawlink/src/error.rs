//! Error types for RawLink

use thiserror::Error;

/// Errors that can occur while converting a GitHub URL
#[derive(Debug, Error)]
pub enum RawLinkError {
    /// URL is missing
    #[error("No URL provided.")]
    MissingUrl,

    /// URL does not match the blob/tree grammar
    #[error("Invalid GitHub URL format.")]
    InvalidUrlFormat,

    /// Configured API base cannot take path segments
    #[error("Invalid API base URL: {0}")]
    InvalidApiBase(String),

    /// Token cannot be sent as an `Authorization` header
    #[error("Invalid GitHub token: contains characters not allowed in a header")]
    InvalidToken,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Contents API answered 404
    #[error(
        "Resource not found. Please check the repository, branch, and path.\nAPI URL: {api_url}"
    )]
    PathNotFound { api_url: String },

    /// Contents API answered 403
    #[error("Access forbidden. You might have exceeded the GitHub API rate limits.\nPlease try again later or authenticate your requests.\nAPI URL: {api_url}")]
    RateLimitedOrForbidden { api_url: String },

    /// Any other non-2xx terminal status
    #[error("GitHub API error: {status} {status_text}\nAPI URL: {api_url}")]
    RemoteApi {
        status: u16,
        status_text: String,
        api_url: String,
    },

    /// Transport failure that survived every retry
    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// Body could not be decoded as a contents listing
    #[error("Invalid response from GitHub API: {0}")]
    InvalidResponse(String),

    /// Traversal finished without a single file
    #[error("No files found in the specified directory.")]
    NoFilesFound,

    /// Datetime input is not ISO 8601
    #[error("Invalid input datetime: {0}")]
    InvalidDatetime(String),

    /// Not an IANA timezone name
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Input has no offset and no source timezone was given
    #[error("Source timezone is required when the input has no offset")]
    MissingSourceTimezone,

    /// Local time falls in a DST gap of the source timezone
    #[error("{local} does not exist in {timezone}")]
    NonexistentLocalTime { local: String, timezone: String },
}

impl RawLinkError {
    /// Map a non-success status to the matching error variant
    pub fn from_status(status: reqwest::StatusCode, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        match status.as_u16() {
            404 => RawLinkError::PathNotFound { api_url },
            403 => RawLinkError::RateLimitedOrForbidden { api_url },
            code => RawLinkError::RemoteApi {
                status: code,
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                api_url,
            },
        }
    }
}

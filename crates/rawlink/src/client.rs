//! Conversion entry points for RawLink
//!
//! This module wires the URL parser, the GitHub contents lister and the
//! tree expander together. The walk itself lives in [`expand`](crate::expand).

use crate::error::RawLinkError;
use crate::expand::{expand, DEFAULT_MAX_DEPTH};
use crate::listers::GitHubContents;
use crate::location::RepoLocation;
use crate::retry::RetryPolicy;
use crate::types::ExpandResult;

/// Conversion options that can be configured via tool builder
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Token sent as `Authorization: token {value}`
    pub token: Option<String>,
    /// Override for the GitHub API base URL
    pub api_base: Option<String>,
    /// Maximum number of directory layers to list
    pub max_depth: usize,
    /// Retry budget for each API request
    pub retry: RetryPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            token: None,
            api_base: None,
            max_depth: DEFAULT_MAX_DEPTH,
            retry: RetryPolicy::default(),
        }
    }
}

/// Convert a GitHub URL into raw-content URLs
///
/// Uses the public API, unauthenticated, with default depth and retries.
/// For custom options, use [`convert_with_options`].
pub async fn convert(url: &str) -> Result<ExpandResult, RawLinkError> {
    convert_with_options(url, &ConvertOptions::default()).await
}

/// Convert a GitHub URL with custom options
pub async fn convert_with_options(
    url: &str,
    options: &ConvertOptions,
) -> Result<ExpandResult, RawLinkError> {
    // Parse before building any client
    let loc = RepoLocation::parse(url)?;

    let lister = GitHubContents::with_options(options)?;
    expand(&lister, &loc, options.max_depth).await
}

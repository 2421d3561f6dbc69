//! GitHub contents API lister
//!
//! Lists `GET /repos/{owner}/{repo}/contents/{path}?ref={ref}` through the
//! resilient fetch client.

use crate::client::ConvertOptions;
use crate::error::RawLinkError;
use crate::listers::{ContentLister, Listing};
use crate::location::RepoLocation;
use crate::retry::{fetch_resilient, RetryPolicy};
use crate::types::ContentEntry;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public GitHub API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Per-request timeout for API calls
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout for API calls
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub contents API item (partial)
#[derive(Debug, Deserialize)]
struct ApiItem {
    #[serde(rename = "type")]
    item_type: String,
    path: String,
    #[serde(default)]
    download_url: Option<String>,
}

impl ApiItem {
    /// Convert to an entry; symlinks, submodules and the like yield `None`
    fn into_entry(self) -> Option<ContentEntry> {
        match self.item_type.as_str() {
            "file" => Some(ContentEntry::file(self.path, self.download_url)),
            "dir" => Some(ContentEntry::dir(self.path)),
            other => {
                debug!(path = %self.path, kind = other, "Skipping unsupported entry");
                None
            }
        }
    }
}

/// Contents endpoint body: an array for directories, an object otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Many(Vec<ApiItem>),
    Single(ApiItem),
}

impl From<ContentsResponse> for Listing {
    fn from(body: ContentsResponse) -> Self {
        match body {
            ContentsResponse::Many(items) => {
                Listing::Many(items.into_iter().filter_map(ApiItem::into_entry).collect())
            }
            ContentsResponse::Single(item) => Listing::Single(item.into_entry()),
        }
    }
}

/// Lister backed by the GitHub REST contents API
pub struct GitHubContents {
    client: reqwest::Client,
    api_base: Url,
    headers: HeaderMap,
    retry: RetryPolicy,
}

impl GitHubContents {
    /// Create a lister for the public API with default settings
    pub fn new() -> Result<Self, RawLinkError> {
        Self::with_options(&ConvertOptions::default())
    }

    /// Create a lister from conversion options
    pub fn with_options(options: &ConvertOptions) -> Result<Self, RawLinkError> {
        let base = options.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
        let api_base = Url::parse(base).map_err(|e| RawLinkError::InvalidApiBase(e.to_string()))?;
        if api_base.cannot_be_a_base() {
            return Err(RawLinkError::InvalidApiBase(base.to_string()));
        }

        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| RawLinkError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(API_TIMEOUT)
            .build()
            .map_err(RawLinkError::ClientBuildError)?;

        Ok(Self {
            client,
            api_base,
            headers,
            retry: options.retry,
        })
    }

    /// Contents API URL for a location
    ///
    /// Each path segment is percent-encoded on its own so slashes survive.
    pub fn api_url(&self, loc: &RepoLocation) -> Result<String, RawLinkError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| RawLinkError::InvalidApiBase(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["repos", loc.owner.as_str(), loc.repo.as_str(), "contents"])
            .extend(loc.path.split('/'));
        url.query_pairs_mut().append_pair("ref", &loc.git_ref);
        Ok(url.into())
    }
}

#[async_trait]
impl ContentLister for GitHubContents {
    fn name(&self) -> &'static str {
        "github_contents"
    }

    async fn list(&self, loc: &RepoLocation) -> Result<Listing, RawLinkError> {
        let api_url = self.api_url(loc)?;
        debug!(lister = self.name(), url = %api_url, "Listing contents");

        let response = fetch_resilient(&self.client, &api_url, &self.headers, &self.retry).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RawLinkError::from_status(status, api_url));
        }

        let body = response.text().await.map_err(RawLinkError::Network)?;
        parse_listing(&body)
    }
}

/// Decode a contents API body
fn parse_listing(body: &str) -> Result<Listing, RawLinkError> {
    let parsed: ContentsResponse = serde_json::from_str(body)
        .map_err(|e| RawLinkError::InvalidResponse(e.to_string()))?;
    Ok(parsed.into())
}

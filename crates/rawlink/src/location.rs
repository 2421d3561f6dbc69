//! GitHub repository locations
//!
//! Parses `https://github.com/{owner}/{repo}/(blob|tree)/{ref}/{path}` URLs
//! and formats the matching `raw.githubusercontent.com` URL.

use crate::error::RawLinkError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix every parseable URL starts with
const GITHUB_PREFIX: &str = "https://github.com/";

/// Host serving raw file contents
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// A path inside a repository at a fixed ref
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoLocation {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch, tag, or commit SHA
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Path inside the repository, without a leading slash
    pub path: String,
}

impl RepoLocation {
    /// Build a location from its parts
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        git_ref: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            git_ref: git_ref.into(),
            path: path.into(),
        }
    }

    /// Parse a GitHub `blob` or `tree` URL
    ///
    /// Owner, repo and ref must each be one non-empty segment. The path is
    /// everything after the ref and must be non-empty, so repository root URLs
    /// are rejected.
    pub fn parse(url: &str) -> Result<Self, RawLinkError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RawLinkError::MissingUrl);
        }

        let rest = url
            .strip_prefix(GITHUB_PREFIX)
            .ok_or(RawLinkError::InvalidUrlFormat)?;

        let mut parts = rest.splitn(5, '/');
        let (Some(owner), Some(repo), Some(kind), Some(git_ref), Some(path)) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(RawLinkError::InvalidUrlFormat);
        };

        if kind != "blob" && kind != "tree" {
            return Err(RawLinkError::InvalidUrlFormat);
        }

        if owner.is_empty() || repo.is_empty() || git_ref.is_empty() || path.is_empty() {
            return Err(RawLinkError::InvalidUrlFormat);
        }

        // Path must stay on one line
        if path.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
            return Err(RawLinkError::InvalidUrlFormat);
        }

        Ok(Self::new(owner, repo, git_ref, path))
    }

    /// Same repository and ref, different path
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..self.clone()
        }
    }

    /// Canonical raw-content URL for this location
    ///
    /// The path is interpolated as given, slashes and all.
    pub fn raw_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            RAW_CONTENT_BASE, self.owner, self.repo, self.git_ref, self.path
        )
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}:{}", self.owner, self.repo, self.git_ref, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blob_url() {
        let loc = RepoLocation::parse("https://github.com/rust-lang/rust/blob/master/README.md")
            .unwrap();
        assert_eq!(loc, RepoLocation::new("rust-lang", "rust", "master", "README.md"));
    }

    #[test]
    fn test_parse_tree_url_with_nested_path() {
        let loc =
            RepoLocation::parse("https://github.com/owner/repo/tree/v1.2.0/src/bin/tools").unwrap();
        assert_eq!(loc.owner, "owner");
        assert_eq!(loc.repo, "repo");
        assert_eq!(loc.git_ref, "v1.2.0");
        assert_eq!(loc.path, "src/bin/tools");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let loc = RepoLocation::parse("  https://github.com/o/r/blob/main/a.txt\n").unwrap();
        assert_eq!(loc.path, "a.txt");
    }

    #[test]
    fn test_parse_empty_is_missing() {
        assert!(matches!(
            RepoLocation::parse("   "),
            Err(RawLinkError::MissingUrl)
        ));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let bad = [
            "github.com/o/r/blob/main/a.txt",
            "http://github.com/o/r/blob/main/a.txt",
            "https://gitlab.com/o/r/blob/main/a.txt",
            "https://github.com/o/r",
            "https://github.com/o/r/blob/main",
            "https://github.com/o/r/blob/main/",
            "https://github.com/o/r/commits/main/a.txt",
            "https://github.com//r/blob/main/a.txt",
            "https://github.com/o//blob/main/a.txt",
            "https://github.com/o/r/tree//a.txt",
            "https://github.com/o/r/blob/main/a\nb.txt",
        ];
        for url in bad {
            assert!(
                matches!(RepoLocation::parse(url), Err(RawLinkError::InvalidUrlFormat)),
                "expected rejection for {url:?}"
            );
        }
    }

    #[test]
    fn test_raw_url_round_trip() {
        let loc = RepoLocation::parse("https://github.com/o/r/blob/abc123/docs/guide v2.md").unwrap();
        assert_eq!(
            loc.raw_url(),
            "https://raw.githubusercontent.com/o/r/abc123/docs/guide v2.md"
        );
    }

    #[test]
    fn test_with_path_keeps_repo_and_ref() {
        let loc = RepoLocation::new("o", "r", "main", "src");
        let child = loc.with_path("src/lib.rs");
        assert_eq!(child.git_ref, "main");
        assert_eq!(
            child.raw_url(),
            "https://raw.githubusercontent.com/o/r/main/src/lib.rs"
        );
    }

    #[test]
    fn test_display() {
        let loc = RepoLocation::new("o", "r", "main", "src");
        assert_eq!(loc.to_string(), "o/r@main:src");
    }
}

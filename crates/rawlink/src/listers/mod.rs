//! Content listers
//!
//! Design: a lister answers "what is at this path" for one repository
//! location. The tree expander only talks to the [`ContentLister`] trait,
//! so listings can come from the GitHub API or from anything else.

mod github_contents;

pub use github_contents::{GitHubContents, DEFAULT_API_BASE};

use crate::error::RawLinkError;
use crate::location::RepoLocation;
use crate::types::ContentEntry;
use async_trait::async_trait;

/// Result of listing one path
///
/// The contents endpoint answers with an object for a file and an array for
/// a directory. The shape is kept so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Object body; `None` if its type was not file or dir
    Single(Option<ContentEntry>),
    /// Array body with unsupported types already dropped
    Many(Vec<ContentEntry>),
}

impl Listing {
    /// Flatten into the contained entries
    pub fn into_entries(self) -> Vec<ContentEntry> {
        match self {
            Listing::Single(entry) => entry.into_iter().collect(),
            Listing::Many(entries) => entries,
        }
    }
}

/// Trait for sources of repository listings
#[async_trait]
pub trait ContentLister: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// List the entry or entries at `loc.path`
    async fn list(&self, loc: &RepoLocation) -> Result<Listing, RawLinkError>;
}

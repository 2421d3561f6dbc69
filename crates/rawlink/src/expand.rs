//! Breadth-first expansion of a repository path into raw URLs
//!
//! The starting path is probed once. A single file short-circuits to a
//! one-element result. Otherwise the probe is the first layer, and each
//! following layer lists every pending directory concurrently before the
//! next one starts. Any listing failure aborts the whole expansion.

use crate::error::RawLinkError;
use crate::listers::{ContentLister, Listing};
use crate::location::RepoLocation;
use crate::types::{ContentEntry, EntryKind, ExpandResult};
use futures::future::try_join_all;
use tracing::{debug, info, warn};

/// Default number of layers to list
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Walk state for one expansion
#[derive(Debug, Default)]
struct TraversalState {
    frontier: Vec<String>,
    files: Vec<String>,
    depth: usize,
    folder_count: usize,
}

impl TraversalState {
    /// Sort one layer's entries into files and the next frontier
    fn absorb(&mut self, entries: Vec<ContentEntry>, next: &mut Vec<String>) {
        for entry in entries {
            match entry.kind {
                EntryKind::File => self.files.push(entry.path),
                EntryKind::Dir => {
                    next.push(entry.path);
                    self.folder_count += 1;
                }
            }
        }
    }
}

/// Entries of one listing
///
/// A directory listing is always an array. A lone dir object would make the
/// walk list the same path again on every layer, so it is rejected.
fn layer_entries(listing: Listing, path: &str) -> Result<Vec<ContentEntry>, RawLinkError> {
    match listing {
        Listing::Single(Some(entry)) if entry.kind == EntryKind::Dir => {
            Err(RawLinkError::InvalidResponse(format!(
                "expected a directory listing for {}, got a single directory object",
                path
            )))
        }
        listing => Ok(listing.into_entries()),
    }
}

/// Expand `loc` into the raw URLs of every file within `max_depth` layers
///
/// `max_depth` counts listing layers including the initial probe; zero is
/// treated as one. Leftover directories at the limit set
/// [`ExpandResult::max_depth_reached`] instead of failing.
pub async fn expand<L>(
    lister: &L,
    loc: &RepoLocation,
    max_depth: usize,
) -> Result<ExpandResult, RawLinkError>
where
    L: ContentLister + ?Sized,
{
    let max_depth = max_depth.max(1);
    let mut state = TraversalState::default();

    // Probe: a file root never enters the walk
    let root_entries = match lister.list(loc).await? {
        Listing::Single(Some(entry)) if entry.is_file() => {
            debug!(location = %loc, "Root is a single file");
            return Ok(ExpandResult {
                files: vec![loc.with_path(entry.path).raw_url()],
                total_files: 1,
                total_folders: 0,
                max_depth_reached: false,
            });
        }
        listing => layer_entries(listing, &loc.path)?,
    };

    let mut next = Vec::new();
    state.absorb(root_entries, &mut next);
    state.frontier = next;
    state.depth = 1;

    while !state.frontier.is_empty() && state.depth < max_depth {
        debug!(
            depth = state.depth,
            directories = state.frontier.len(),
            "Listing layer"
        );

        let layer = try_join_all(state.frontier.iter().map(|path| {
            let dir = loc.with_path(path.as_str());
            async move {
                let listing = lister.list(&dir).await?;
                layer_entries(listing, &dir.path)
            }
        }))
        .await?;

        let mut next = Vec::new();
        for entries in layer {
            state.absorb(entries, &mut next);
        }
        state.frontier = next;
        state.depth += 1;
    }

    let max_depth_reached = !state.frontier.is_empty();
    if max_depth_reached {
        warn!(
            max_depth,
            unexplored = state.frontier.len(),
            "Maximum directory depth of {} reached.",
            max_depth
        );
    }

    if state.files.is_empty() {
        return Err(RawLinkError::NoFilesFound);
    }

    info!(
        location = %loc,
        files = state.files.len(),
        folders = state.folder_count,
        "Expansion complete"
    );

    let files: Vec<String> = state
        .files
        .into_iter()
        .map(|path| loc.with_path(path).raw_url())
        .collect();

    Ok(ExpandResult {
        total_files: files.len(),
        files,
        total_folders: state.folder_count,
        max_depth_reached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory tree keyed by path, recording every listed path
    #[derive(Default)]
    struct MemoryLister {
        listings: HashMap<String, Listing>,
        calls: Mutex<Vec<String>>,
    }

    impl MemoryLister {
        fn dir(mut self, path: &str, entries: Vec<ContentEntry>) -> Self {
            self.listings.insert(path.to_string(), Listing::Many(entries));
            self
        }

        fn file(mut self, path: &str) -> Self {
            self.listings.insert(
                path.to_string(),
                Listing::Single(Some(ContentEntry::file(path, None))),
            );
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentLister for MemoryLister {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn list(&self, loc: &RepoLocation) -> Result<Listing, RawLinkError> {
            self.calls.lock().unwrap().push(loc.path.clone());
            self.listings
                .get(&loc.path)
                .cloned()
                .ok_or_else(|| RawLinkError::PathNotFound {
                    api_url: loc.path.clone(),
                })
        }
    }

    fn root() -> RepoLocation {
        RepoLocation::new("o", "r", "main", "root")
    }

    fn raw(path: &str) -> String {
        format!("https://raw.githubusercontent.com/o/r/main/{}", path)
    }

    fn sorted(mut files: Vec<String>) -> Vec<String> {
        files.sort();
        files
    }

    #[tokio::test]
    async fn test_expand_nested_tree() {
        let lister = MemoryLister::default()
            .dir(
                "root",
                vec![ContentEntry::file("root/a.txt", None), ContentEntry::dir("root/sub")],
            )
            .dir(
                "root/sub",
                vec![
                    ContentEntry::file("root/sub/b.txt", None),
                    ContentEntry::file("root/sub/c.txt", None),
                ],
            );

        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await.unwrap();

        assert_eq!(
            sorted(result.files),
            vec![raw("root/a.txt"), raw("root/sub/b.txt"), raw("root/sub/c.txt")]
        );
        assert_eq!(result.total_files, 3);
        assert_eq!(result.total_folders, 1);
        assert!(!result.max_depth_reached);
    }

    #[tokio::test]
    async fn test_expand_single_file_probes_once() {
        let lister = MemoryLister::default().file("root/README.md");
        let loc = root().with_path("root/README.md");

        let result = expand(&lister, &loc, DEFAULT_MAX_DEPTH).await.unwrap();

        assert_eq!(result.files, vec![raw("root/README.md")]);
        assert_eq!(result.total_files, 1);
        assert_eq!(result.total_folders, 0);
        assert_eq!(lister.calls(), vec!["root/README.md".to_string()]);
    }

    #[tokio::test]
    async fn test_expand_empty_dir() {
        let lister = MemoryLister::default().dir("root", vec![]);
        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await;
        assert!(matches!(result, Err(RawLinkError::NoFilesFound)));
    }

    #[tokio::test]
    async fn test_expand_only_empty_subdirs() {
        let lister = MemoryLister::default()
            .dir("root", vec![ContentEntry::dir("root/a")])
            .dir("root/a", vec![]);
        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await;
        assert!(matches!(result, Err(RawLinkError::NoFilesFound)));
    }

    #[tokio::test]
    async fn test_expand_unsupported_single_entry() {
        let mut lister = MemoryLister::default();
        lister
            .listings
            .insert("root".to_string(), Listing::Single(None));
        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await;
        assert!(matches!(result, Err(RawLinkError::NoFilesFound)));
    }

    #[tokio::test]
    async fn test_expand_rejects_single_dir_object() {
        let mut lister = MemoryLister::default();
        lister.listings.insert(
            "root".to_string(),
            Listing::Single(Some(ContentEntry::dir("root"))),
        );

        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await;

        assert!(matches!(result, Err(RawLinkError::InvalidResponse(ref msg)) if msg.contains("root")));
        assert_eq!(lister.calls(), vec!["root".to_string()]);
    }

    #[tokio::test]
    async fn test_expand_rejects_single_dir_object_in_layer() {
        let mut lister = MemoryLister::default().dir(
            "root",
            vec![ContentEntry::file("root/a", None), ContentEntry::dir("root/sub")],
        );
        lister.listings.insert(
            "root/sub".to_string(),
            Listing::Single(Some(ContentEntry::dir("root/sub"))),
        );

        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await;

        assert!(matches!(result, Err(RawLinkError::InvalidResponse(_))));
        assert_eq!(lister.calls(), vec!["root".to_string(), "root/sub".to_string()]);
    }

    #[tokio::test]
    async fn test_expand_depth_bound() {
        // root/f0 at depth 0, root/d1/f1 at depth 1, root/d1/d2/f2 at depth 2
        let lister = MemoryLister::default()
            .dir(
                "root",
                vec![ContentEntry::file("root/f0", None), ContentEntry::dir("root/d1")],
            )
            .dir(
                "root/d1",
                vec![
                    ContentEntry::file("root/d1/f1", None),
                    ContentEntry::dir("root/d1/d2"),
                ],
            )
            .dir("root/d1/d2", vec![ContentEntry::file("root/d1/d2/f2", None)]);

        let result = expand(&lister, &root(), 2).await.unwrap();

        assert_eq!(sorted(result.files), vec![raw("root/d1/f1"), raw("root/f0")]);
        assert_eq!(result.total_folders, 2);
        assert!(result.max_depth_reached);
        assert!(!lister.calls().contains(&"root/d1/d2".to_string()));
    }

    #[tokio::test]
    async fn test_expand_zero_depth_still_probes() {
        let lister = MemoryLister::default().dir(
            "root",
            vec![ContentEntry::file("root/a", None), ContentEntry::dir("root/b")],
        );

        let result = expand(&lister, &root(), 0).await.unwrap();

        assert_eq!(result.files, vec![raw("root/a")]);
        assert!(result.max_depth_reached);
        assert_eq!(lister.calls(), vec!["root".to_string()]);
    }

    #[tokio::test]
    async fn test_expand_layer_failure_aborts() {
        // root/missing has no listing
        let lister = MemoryLister::default()
            .dir(
                "root",
                vec![
                    ContentEntry::file("root/a", None),
                    ContentEntry::dir("root/ok"),
                    ContentEntry::dir("root/missing"),
                ],
            )
            .dir("root/ok", vec![ContentEntry::file("root/ok/b", None)]);

        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await;

        assert!(matches!(
            result,
            Err(RawLinkError::PathNotFound { ref api_url }) if api_url == "root/missing"
        ));
    }

    #[tokio::test]
    async fn test_expand_layers_are_sequential() {
        let lister = MemoryLister::default()
            .dir(
                "root",
                vec![ContentEntry::dir("root/a"), ContentEntry::dir("root/b")],
            )
            .dir("root/a", vec![ContentEntry::dir("root/a/deep")])
            .dir("root/b", vec![ContentEntry::file("root/b/x", None)])
            .dir("root/a/deep", vec![ContentEntry::file("root/a/deep/y", None)]);

        let result = expand(&lister, &root(), DEFAULT_MAX_DEPTH).await.unwrap();
        assert_eq!(result.total_files, 2);
        assert_eq!(result.total_folders, 3);

        let calls = lister.calls();
        assert_eq!(calls[0], "root");
        assert_eq!(sorted(calls[1..3].to_vec()), vec!["root/a", "root/b"]);
        assert_eq!(calls[3], "root/a/deep");
    }
}

//! Core types for RawLink

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of a listed repository entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One file or directory returned by a contents listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Path relative to the repository root
    pub path: String,
    pub kind: EntryKind,
    /// Listed download URL (files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
}

impl ContentEntry {
    pub fn file(path: impl Into<String>, raw_url: Option<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            raw_url,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Dir,
            raw_url: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Request to convert a GitHub URL
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConvertRequest {
    /// GitHub blob or tree URL, e.g. https://github.com/owner/repo/tree/main/src
    pub url: String,

    /// Maximum directory depth to expand (optional, default 5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl ConvertRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Outcome of expanding a location into raw URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExpandResult {
    /// Raw-content URLs, one per discovered file
    pub files: Vec<String>,

    /// Number of files discovered
    pub total_files: usize,

    /// Number of directories discovered below the starting path
    pub total_folders: usize,

    /// True if directories were left unexplored at the depth limit
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub max_depth_reached: bool,
}

impl ExpandResult {
    /// URLs joined by newlines, ready for the clipboard
    pub fn joined(&self) -> String {
        self.files.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        let file = ContentEntry::file("a.txt", Some("https://raw/a.txt".to_string()));
        assert!(file.is_file());
        assert_eq!(file.raw_url.as_deref(), Some("https://raw/a.txt"));

        let dir = ContentEntry::dir("sub");
        assert!(!dir.is_file());
        assert!(dir.raw_url.is_none());
    }

    #[test]
    fn test_joined() {
        let result = ExpandResult {
            files: vec!["u1".to_string(), "u2".to_string()],
            total_files: 2,
            ..Default::default()
        };
        assert_eq!(result.joined(), "u1\nu2");
    }

    #[test]
    fn test_result_json_omits_false_flag() {
        let result = ExpandResult {
            files: vec!["u1".to_string()],
            total_files: 1,
            total_folders: 0,
            max_depth_reached: false,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("max_depth_reached").is_none());
        assert_eq!(json["total_files"], 1);
    }

    #[test]
    fn test_convert_request_from_json() {
        let req: ConvertRequest =
            serde_json::from_str(r#"{"url": "https://github.com/o/r/tree/main/src"}"#).unwrap();
        assert_eq!(req.url, "https://github.com/o/r/tree/main/src");
        assert!(req.max_depth.is_none());
    }
}

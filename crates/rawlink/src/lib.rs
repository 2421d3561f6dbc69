//! RawLink - GitHub URL to raw-content URL converter
//!
//! This crate turns a GitHub `blob` or `tree` URL into the
//! `raw.githubusercontent.com` URLs of the files it points at. Directories
//! are expanded breadth-first, up to a depth limit, through the GitHub
//! contents API.
//!
//! ## Pieces
//!
//! - [`RepoLocation`] - URL parser and raw URL formatter
//! - [`fetch_resilient`] - GET with exponential backoff
//! - [`ContentLister`] / [`GitHubContents`] - listing one path
//! - [`expand`] - layer-by-layer walk over a lister
//! - [`Tool`] - configured entry point used by the CLI and MCP server
//! - [`convert_datetime`] - ISO 8601 timezone conversion

pub mod client;
mod datetime;
mod error;
pub mod expand;
pub mod listers;
mod location;
pub mod retry;
mod tool;
mod types;

pub use client::{convert, convert_with_options, ConvertOptions};
pub use datetime::{
    convert_datetime, has_offset, parse_timezone, DEFAULT_SOURCE_TIMEZONE,
    DEFAULT_TARGET_TIMEZONE,
};
pub use error::RawLinkError;
pub use expand::{expand, DEFAULT_MAX_DEPTH};
pub use listers::{ContentLister, GitHubContents, Listing};
pub use location::{RepoLocation, RAW_CONTENT_BASE};
pub use retry::{fetch_resilient, RetryPolicy, StatusClass};
pub use tool::{Tool, ToolBuilder};
pub use types::{ContentEntry, ConvertRequest, EntryKind, ExpandResult};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns RawLink/1.0";

/// Tool description for LLM consumption
pub const TOOL_DESCRIPTION: &str = r#"Converts a GitHub blob/tree URL into raw.githubusercontent.com URLs.

- Single files map straight to their raw URL
- Directories are expanded recursively (default depth 5)
- Retries rate limiting and server errors with backoff"#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# RawLink Tool

Converts a GitHub file or directory URL into raw-content URLs.

## Capabilities
- Parses https://github.com/{owner}/{repo}/(blob|tree)/{ref}/{path}
- Expands directories breadth-first through the GitHub contents API
- Retries 429 and 5xx responses with exponential backoff (1s, 2s, 4s, ...)

## Input Parameters
- `url` (required): GitHub blob or tree URL with a non-empty path
- `max_depth` (optional): Number of directory layers to list (default: 5)

## Output Fields
- `files`: Raw-content URLs, one per file
- `total_files`: Number of files
- `total_folders`: Number of directories found below the starting path
- `max_depth_reached`: Present and true if directories were left unexplored

## Examples

### Convert a single file
```json
{"url": "https://github.com/rust-lang/rust/blob/master/README.md"}
```

### Expand a directory two layers deep
```json
{"url": "https://github.com/rust-lang/rust/tree/master/src/tools", "max_depth": 2}
```

## Error Handling
- Malformed URLs are rejected before any request
- 404 and 403 are reported with the API URL that was tried
- 403 usually means the unauthenticated rate limit was hit
- Directories with no files return an error
"#;

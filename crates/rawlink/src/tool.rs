//! Tool builder and contract for RawLink

use crate::client::{convert_with_options, ConvertOptions};
use crate::error::RawLinkError;
use crate::expand::DEFAULT_MAX_DEPTH;
use crate::retry::RetryPolicy;
use crate::types::{ConvertRequest, ExpandResult};
use crate::{TOOL_DESCRIPTION, TOOL_LLMTXT};
use schemars::schema_for;

/// Builder for configuring the RawLink tool
#[derive(Debug, Clone)]
pub struct ToolBuilder {
    user_agent: Option<String>,
    token: Option<String>,
    api_base: Option<String>,
    max_depth: usize,
    retry: RetryPolicy,
}

impl Default for ToolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolBuilder {
    /// Create a new tool builder with default depth and retries
    pub fn new() -> Self {
        Self {
            user_agent: None,
            token: None,
            api_base: None,
            max_depth: DEFAULT_MAX_DEPTH,
            retry: RetryPolicy::default(),
        }
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Send `Authorization: token {value}` with every API request
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Point at a different API host (GitHub Enterprise, test servers)
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the default maximum depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the retry policy
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the tool
    pub fn build(self) -> Tool {
        Tool {
            user_agent: self.user_agent,
            token: self.token,
            api_base: self.api_base,
            max_depth: self.max_depth,
            retry: self.retry,
        }
    }
}

/// Configured RawLink tool
#[derive(Debug, Clone)]
pub struct Tool {
    user_agent: Option<String>,
    token: Option<String>,
    api_base: Option<String>,
    max_depth: usize,
    retry: RetryPolicy,
}

impl Default for Tool {
    fn default() -> Self {
        ToolBuilder::new().build()
    }
}

impl Tool {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// Get tool description
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// Get full documentation (llmtxt)
    pub fn llmtxt(&self) -> &'static str {
        TOOL_LLMTXT
    }

    /// Get input schema as JSON
    pub fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ConvertRequest);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ExpandResult);
        serde_json::to_value(schema).unwrap_or_default()
    }

    fn options(&self, max_depth: Option<usize>) -> ConvertOptions {
        ConvertOptions {
            user_agent: self.user_agent.clone(),
            token: self.token.clone(),
            api_base: self.api_base.clone(),
            max_depth: max_depth.unwrap_or(self.max_depth),
            retry: self.retry,
        }
    }

    /// Convert a URL with the tool's settings
    pub async fn convert(&self, url: &str) -> Result<ExpandResult, RawLinkError> {
        convert_with_options(url, &self.options(None)).await
    }

    /// Execute the tool with the given request
    ///
    /// A `max_depth` in the request overrides the tool default.
    pub async fn execute(&self, req: ConvertRequest) -> Result<ExpandResult, RawLinkError> {
        convert_with_options(&req.url, &self.options(req.max_depth)).await
    }
}

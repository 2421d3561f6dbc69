//! RawLink CLI - Convert GitHub URLs into raw-content URLs

mod mcp;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rawlink::{
    convert_datetime, ConvertRequest, ExpandResult, Tool, ToolBuilder, DEFAULT_MAX_DEPTH,
    DEFAULT_TARGET_TIMEZONE, TOOL_LLMTXT,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Output format for convert subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// One raw URL per line
    #[default]
    Text,
    /// JSON with counts
    Json,
}

/// RawLink - GitHub blob/tree URL to raw URL converter
#[derive(Parser, Debug)]
#[command(name = "rawlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

/// GitHub API settings shared by `convert` and `mcp`
#[derive(Args, Debug, Default)]
struct ApiArgs {
    /// GitHub token for higher rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Override the GitHub API base URL
    #[arg(long)]
    api_base: Option<String>,
}

impl ApiArgs {
    fn into_builder(self) -> ToolBuilder {
        let mut builder = Tool::builder();
        if let Some(token) = self.token {
            builder = builder.token(token);
        }
        if let Some(ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(base) = self.api_base {
            builder = builder.api_base(base);
        }
        builder
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Convert a GitHub URL and print the raw URLs
    Convert {
        /// GitHub blob or tree URL
        url: String,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,

        /// Maximum directory depth to expand
        #[arg(long, short = 'd', default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        #[command(flatten)]
        api: ApiArgs,
    },
    /// Convert an ISO 8601 datetime between timezones
    ConvertTime {
        /// Datetime such as 2024-10-28T05:10:34.125Z or 2024-10-28T05:10:34
        datetime: String,

        /// IANA source timezone; required when the datetime has no offset
        #[arg(long)]
        from: Option<String>,

        /// IANA target timezone
        #[arg(long, default_value = DEFAULT_TARGET_TIMEZONE)]
        to: String,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Mcp { api }) => {
            mcp::run_server(api.into_builder().build()).await;
        }
        Some(Commands::Convert {
            url,
            output,
            max_depth,
            api,
        }) => {
            let tool = api.into_builder().max_depth(max_depth).build();
            run_convert(tool, &url, output).await;
        }
        Some(Commands::ConvertTime { datetime, from, to }) => {
            match convert_datetime(&datetime, from.as_deref(), &to) {
                Ok(converted) => writeln_safe(&converted),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            eprintln!("Usage: rawlink convert <URL>");
            eprintln!("   or: rawlink convert-time <DATETIME> [--from TZ] [--to TZ]");
            eprintln!("   or: rawlink mcp");
            eprintln!("   or: rawlink --help");
            std::process::exit(1);
        }
    }
}

async fn run_convert(tool: Tool, url: &str, output: OutputFormat) {
    match tool.execute(ConvertRequest::new(url)).await {
        Ok(result) => match output {
            OutputFormat::Text => writeln_safe(&format_text(&result)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
                    eprintln!("Error serializing result: {}", e);
                    std::process::exit(1);
                });
                writeln_safe(&json);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Newline-joined URLs, with a depth notice on stderr
fn format_text(result: &ExpandResult) -> String {
    if result.max_depth_reached {
        eprintln!("Warning: maximum directory depth reached; some files were not listed.");
    }
    result.joined()
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

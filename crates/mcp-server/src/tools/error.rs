use bundle_triage::TriageError;
use thiserror::Error;

/// Failures that cross into the JSON-RPC error channel. Everything else stays data.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tools/call params: {0}")]
    InvalidParams(#[source] serde_json::Error),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Triage(#[from] TriageError),

    #[error("Failed to encode {tool} result: {source}")]
    Encode {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadFileRequest {
    #[schemars(description = "Absolute path to bundle root")]
    pub bundle: String,

    /// File path (relative to bundle root)
    #[schemars(description = "Relative path to file")]
    pub file: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadFileStatus {
    Full,
    Truncated,
    Unreadable,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ReadFileResult {
    pub file: String,
    pub status: ReadFileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omitted_bytes: Option<u64>,
    pub content: String,
}

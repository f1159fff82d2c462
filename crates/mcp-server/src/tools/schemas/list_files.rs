use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListFilesRequest {
    #[schemars(description = "Absolute path to bundle root")]
    pub bundle: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListFilesResult {
    pub bundle: String,
    pub total_files: usize,
    pub truncated: bool,
    pub files: Vec<String>,
}

use serde::Serialize;

pub(crate) mod analyze;
pub(crate) mod list_files;
pub(crate) mod read_file;

/// Structured "absent" result: a missing bundle or file is data, not an RPC error.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NotFoundResult {
    pub status: &'static str,
    pub path: String,
}

impl NotFoundResult {
    pub fn new(path: &std::path::Path) -> Self {
        Self {
            status: "not_found",
            path: path.display().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Missing(NotFoundResult),
}

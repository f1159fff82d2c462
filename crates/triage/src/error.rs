use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TriageError>;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Bundle not found: {}", .0.display())]
    BundleNotFound(PathBuf),

    #[error("Path escapes bundle root: {0}")]
    PathEscapesBundle(String),

    #[error("Unknown distro '{0}' (expected k3s or rke2)")]
    UnknownDistro(String),
}

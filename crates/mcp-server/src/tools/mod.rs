//! Bundle triage tool surface.
//!
//! Schemas, the discovery catalog, and per-tool handlers live in separate submodules; `dispatch`
//! ties them together behind [`BundleService`].

pub(crate) mod catalog;
mod dispatch;
mod error;
mod list_files;
mod read_file;
mod schemas;

pub use dispatch::BundleService;
pub use error::ToolError;

//! # Bundle Triage
//!
//! Heuristic health triage over a captured cluster diagnostic bundle.
//!
//! ## Pipeline
//!
//! ```text
//! Bundle (<root>/<distro>/kubectl/{nodes,pods,events})
//!     │
//!     ├──> BoundedReader (head + tail excerpt, never over max_file_chars)
//!     │      └─> BoundedContent
//!     │
//!     ├──> Analyzer (nodes / pods / events)
//!     │      └─> findings
//!     │
//!     └──> Truncator (max_items, max_line_chars)
//!            └─> Analysis<Report>
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bundle_protocol::Limits;
//! use bundle_triage::{Bundle, Triage};
//!
//! fn main() -> Result<(), bundle_triage::TriageError> {
//!     let bundle = Bundle::open("/tmp/support-bundle", None)?;
//!     let diagnosis = Triage::new(Limits::default()).diagnose(&bundle);
//!     println!("{}", diagnosis.pods.report.summary);
//!     Ok(())
//! }
//! ```

pub mod analyze;
mod bundle;
mod error;
mod reader;
mod scanner;
mod truncate;

pub use analyze::{
    Analysis, Analyzer, Diagnosis, EventsAnalyzer, EventsReport, NodesAnalyzer, NodesReport,
    PodsAnalyzer, PodsReport, SourceStatus, Triage,
};
pub use bundle::{Bundle, Distro, KubectlDump};
pub use error::{Result, TriageError};
pub use reader::{BoundedContent, BoundedReader};
pub use scanner::{list_bundle_files, BundleListing};
pub use truncate::Truncator;

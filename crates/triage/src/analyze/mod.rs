//! Heuristic analyzers over the `kubectl` dumps of a bundle.
//!
//! The dumps are not a stable schema. Every analyzer is a pure scan over text: lines it does
//! not understand are skipped, never fatal.

use bundle_protocol::Limits;
use serde::Serialize;

use crate::bundle::{Bundle, KubectlDump};
use crate::reader::{BoundedContent, BoundedReader};
use crate::truncate::Truncator;

mod diagnose;
mod events;
mod nodes;
mod pods;

pub use diagnose::{Diagnosis, TRUNCATION_NOTE};
pub use events::{EventsAnalyzer, EventsReport};
pub use nodes::{NodesAnalyzer, NodesReport};
pub use pods::{PodsAnalyzer, PodsReport};

/// One heuristic over one dump. New heuristics plug in as further implementations.
pub trait Analyzer {
    type Report: Serialize;

    fn dump(&self) -> KubectlDump;

    fn scan(&self, text: &str, truncator: &Truncator) -> Self::Report;
}

/// How the dump behind an analysis was read.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Read,
    Truncated,
    Missing,
    Unreadable,
}

impl SourceStatus {
    fn of(content: &BoundedContent) -> Self {
        match content {
            BoundedContent::Absent => SourceStatus::Missing,
            BoundedContent::Unreadable(_) => SourceStatus::Unreadable,
            other if other.is_truncated() => SourceStatus::Truncated,
            _ => SourceStatus::Read,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis<R> {
    /// Dump path relative to the bundle root.
    pub file: String,
    pub status: SourceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub report: R,
}

/// Bounded reader and truncator configured from one [`Limits`] value.
#[derive(Debug, Clone, Copy)]
pub struct Triage {
    reader: BoundedReader,
    truncator: Truncator,
}

impl Triage {
    pub const fn new(limits: Limits) -> Self {
        Self {
            reader: BoundedReader::from_limits(&limits),
            truncator: Truncator::from_limits(&limits),
        }
    }

    pub const fn reader(&self) -> &BoundedReader {
        &self.reader
    }

    pub const fn truncator(&self) -> &Truncator {
        &self.truncator
    }

    pub fn run<A: Analyzer>(&self, bundle: &Bundle, analyzer: &A) -> Analysis<A::Report> {
        let dump = analyzer.dump();
        let content = self.reader.read(&bundle.dump_path(dump));
        let error = match &content {
            BoundedContent::Unreadable(message) => Some(message.clone()),
            _ => None,
        };
        Analysis {
            file: bundle.dump_relative(dump),
            status: SourceStatus::of(&content),
            error,
            report: analyzer.scan(&content.complete_lines(), &self.truncator),
        }
    }

    pub fn nodes(&self, bundle: &Bundle) -> Analysis<NodesReport> {
        self.run(bundle, &NodesAnalyzer)
    }

    pub fn pods(&self, bundle: &Bundle) -> Analysis<PodsReport> {
        self.run(bundle, &PodsAnalyzer)
    }

    pub fn events(&self, bundle: &Bundle) -> Analysis<EventsReport> {
        self.run(bundle, &EventsAnalyzer)
    }

    pub fn diagnose(&self, bundle: &Bundle) -> Diagnosis {
        Diagnosis {
            distro: bundle.distro(),
            nodes: self.nodes(bundle),
            pods: self.pods(bundle),
            events: self.events(bundle),
            note: TRUNCATION_NOTE.to_string(),
        }
    }
}

impl Default for Triage {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

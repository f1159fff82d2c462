use serde::Serialize;

use super::Analyzer;
use crate::bundle::KubectlDump;
use crate::truncate::Truncator;

#[derive(Debug, Clone, Copy, Default)]
pub struct NodesAnalyzer;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodesReport {
    pub summary: String,
    pub scanned: usize,
    pub not_ready: usize,
    pub not_ready_nodes: Vec<String>,
}

impl Analyzer for NodesAnalyzer {
    type Report = NodesReport;

    fn dump(&self) -> KubectlDump {
        KubectlDump::Nodes
    }

    fn scan(&self, text: &str, truncator: &Truncator) -> NodesReport {
        let mut scanned = 0usize;
        let mut not_ready = Vec::new();
        for line in text.lines() {
            scanned += 1;
            if line.contains("NotReady") {
                not_ready.push(line);
            }
        }

        NodesReport {
            summary: format!(
                "Scanned {scanned} nodes. Found {} NotReady.",
                not_ready.len()
            ),
            scanned,
            not_ready: not_ready.len(),
            not_ready_nodes: truncator.bound(not_ready),
        }
    }
}

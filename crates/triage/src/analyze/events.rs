use serde::Serialize;

use super::Analyzer;
use crate::bundle::KubectlDump;
use crate::truncate::Truncator;

#[derive(Debug, Clone, Copy, Default)]
pub struct EventsAnalyzer;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EventsReport {
    pub summary: String,
    pub scanned: usize,
    pub warnings: usize,
    pub critical: usize,
    pub warnings_sample: Vec<String>,
    pub critical_sample: Vec<String>,
}

fn is_warning(line: &str) -> bool {
    line.contains("Warning") || line.contains("Failed")
}

fn is_critical(line: &str) -> bool {
    line.contains("BackOff") || line.contains("Crashed")
}

impl Analyzer for EventsAnalyzer {
    type Report = EventsReport;

    fn dump(&self) -> KubectlDump {
        KubectlDump::Events
    }

    fn scan(&self, text: &str, truncator: &Truncator) -> EventsReport {
        let mut scanned = 0usize;
        let mut warnings = Vec::new();
        let mut critical = Vec::new();
        for line in text.lines() {
            scanned += 1;
            // Independent classes: one line may land in both.
            if is_warning(line) {
                warnings.push(line);
            }
            if is_critical(line) {
                critical.push(line);
            }
        }

        EventsReport {
            summary: format!(
                "Scanned {scanned} events. Found {} warnings, {} critical.",
                warnings.len(),
                critical.len()
            ),
            scanned,
            warnings: warnings.len(),
            critical: critical.len(),
            warnings_sample: truncator.bound(warnings),
            critical_sample: truncator.bound(critical),
        }
    }
}

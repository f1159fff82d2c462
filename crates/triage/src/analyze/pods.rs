use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::Analyzer;
use crate::bundle::KubectlDump;
use crate::truncate::Truncator;

const FAILING_STATUSES: &[&str] = &["CrashLoopBackOff", "Error", "ContainerCreating", "Pending"];
const MIN_FIELDS: usize = 5;

// `kubectl get pods -A` restarts column, e.g. "10 (5m ago)".
static LEADING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)").expect("leading digits regex"));

/// Column-aware scan of `kubectl get pods -A` output:
/// `NAMESPACE NAME READY STATUS RESTARTS AGE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PodsAnalyzer;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PodsReport {
    pub summary: String,
    pub scanned: usize,
    pub skipped: usize,
    pub crashing: usize,
    pub unstable: usize,
    pub by_status: BTreeMap<String, usize>,
    pub crash_sample: Vec<String>,
    pub unstable_sample: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PodRow<'a> {
    name: &'a str,
    status: &'a str,
    restarts: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PodVerdict {
    Failing,
    Unstable(u64),
    Healthy,
}

impl<'a> PodRow<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }
        Some(Self {
            name: fields[1],
            status: fields[3],
            restarts: restart_count(fields[4]),
        })
    }

    fn verdict(&self) -> PodVerdict {
        if FAILING_STATUSES.contains(&self.status) {
            PodVerdict::Failing
        } else if self.status == "Running" && self.restarts > 0 {
            PodVerdict::Unstable(self.restarts)
        } else {
            PodVerdict::Healthy
        }
    }
}

fn restart_count(field: &str) -> u64 {
    LEADING_DIGITS
        .captures(field)
        .and_then(|caps| caps.get(1))
        .map_or(0, |digits| digits.as_str().parse().unwrap_or(u64::MAX))
}

impl Analyzer for PodsAnalyzer {
    type Report = PodsReport;

    fn dump(&self) -> KubectlDump {
        KubectlDump::Pods
    }

    fn scan(&self, text: &str, truncator: &Truncator) -> PodsReport {
        let mut scanned = 0usize;
        let mut skipped = 0usize;
        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut crash = Vec::new();
        let mut unstable = Vec::new();

        for line in text.lines().skip(1) {
            scanned += 1;
            let Some(row) = PodRow::parse(line) else {
                skipped += 1;
                continue;
            };
            match row.verdict() {
                PodVerdict::Failing => {
                    *by_status.entry(row.status.to_string()).or_default() += 1;
                    crash.push(format!("CRASH: {} ({})", row.name, row.status));
                }
                PodVerdict::Unstable(restarts) => unstable.push(format!(
                    "UNSTABLE: {} (Running, but {restarts} restarts)",
                    row.name
                )),
                PodVerdict::Healthy => {}
            }
        }

        PodsReport {
            summary: format!(
                "Scanned {scanned} pods. Found {} crashing, {} unstable.",
                crash.len(),
                unstable.len()
            ),
            scanned,
            skipped,
            crashing: crash.len(),
            unstable: unstable.len(),
            by_status,
            crash_sample: truncator.bound(crash),
            unstable_sample: truncator.bound(unstable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "NAMESPACE NAME READY STATUS RESTARTS AGE";

    #[test]
    fn running_pod_with_restarts_is_unstable() {
        let text = format!("{HEADER}\nns-a pod-1 1/1 Running 3 (2m ago) 1h\n");
        let report = PodsAnalyzer.scan(&text, &Truncator::default());

        assert_eq!(report.unstable, 1);
        assert_eq!(
            report.unstable_sample,
            vec!["UNSTABLE: pod-1 (Running, but 3 restarts)".to_string()]
        );
        assert_eq!(report.crashing, 0);
    }

    #[test]
    fn crashloop_pod_is_a_crash() {
        let text = format!("{HEADER}\nns-a pod-2 0/1 CrashLoopBackOff 0 10m\n");
        let report = PodsAnalyzer.scan(&text, &Truncator::default());

        assert_eq!(report.crashing, 1);
        assert_eq!(
            report.crash_sample,
            vec!["CRASH: pod-2 (CrashLoopBackOff)".to_string()]
        );
        assert_eq!(report.by_status.get("CrashLoopBackOff"), Some(&1));
        assert_eq!(report.unstable, 0);
    }

    #[test]
    fn header_and_malformed_rows_are_skipped() {
        let text = format!(
            "{HEADER}\nshort row\nns-a pod-3 1/1 Running 0 5d\nns-b pod-4 0/1 Pending 0 1m\n"
        );
        let report = PodsAnalyzer.scan(&text, &Truncator::default());

        assert_eq!(report.scanned, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.crashing, 1);
        assert_eq!(report.unstable, 0);
        assert_eq!(report.summary, "Scanned 3 pods. Found 1 crashing, 0 unstable.");
    }

    #[test]
    fn header_with_failing_word_is_not_a_finding() {
        let text = "ns pod ready Error 9\n";
        let report = PodsAnalyzer.scan(text, &Truncator::default());
        assert_eq!(report.scanned, 0);
        assert_eq!(report.crashing, 0);
    }

    #[test]
    fn restart_count_takes_leading_integer() {
        assert_eq!(restart_count("10"), 10);
        assert_eq!(restart_count("10 (5m ago)"), 10);
        assert_eq!(restart_count("7(5m"), 7);
        assert_eq!(restart_count("(5m"), 0);
        assert_eq!(restart_count("n/a"), 0);
    }

    #[test]
    fn failure_breakdown_counts_each_status() {
        let text = format!(
            "{HEADER}\n\
             ns a 0/1 Error 0 1m\n\
             ns b 0/1 Error 0 1m\n\
             ns c 0/1 ContainerCreating 0 1m\n\
             ns d 1/1 Completed 0 1m\n"
        );
        let report = PodsAnalyzer.scan(&text, &Truncator::default());

        let expected: BTreeMap<String, usize> = [
            ("ContainerCreating".to_string(), 1),
            ("Error".to_string(), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(report.by_status, expected);
        assert_eq!(report.crashing, 3);
    }
}

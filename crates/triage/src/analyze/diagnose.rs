use serde::Serialize;

use super::{Analysis, EventsReport, NodesReport, PodsReport};
use crate::bundle::Distro;

pub const TRUNCATION_NOTE: &str = "Data has been automatically truncated to fit context limits.";

/// All three analyzers run against the same bundle and distro.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub distro: Distro,
    pub nodes: Analysis<NodesReport>,
    pub pods: Analysis<PodsReport>,
    pub events: Analysis<EventsReport>,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use crate::analyze::{SourceStatus, Triage};
    use crate::bundle::{Bundle, Distro};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn diagnose_runs_every_analyzer_on_one_distro() {
        let tmp = tempdir().expect("tempdir");
        let kubectl = tmp.path().join("rke2").join("kubectl");
        std::fs::create_dir_all(&kubectl).expect("mkdir");
        std::fs::write(kubectl.join("nodes"), "cp-0 Ready\nworker-0 NotReady\n").expect("write");
        std::fs::write(
            kubectl.join("pods"),
            "NAMESPACE NAME READY STATUS RESTARTS AGE\n\
             kube-system coredns-1 0/1 CrashLoopBackOff 12 (1m ago) 2h\n",
        )
        .expect("write");

        let bundle = Bundle::open(tmp.path(), None).expect("open");
        let diagnosis = Triage::default().diagnose(&bundle);

        assert_eq!(diagnosis.distro, Distro::Rke2);
        assert_eq!(diagnosis.nodes.report.not_ready, 1);
        assert_eq!(diagnosis.pods.report.crashing, 1);
        assert_eq!(diagnosis.events.status, SourceStatus::Missing);
        assert_eq!(diagnosis.events.file, "rke2/kubectl/events");
        assert_eq!(
            diagnosis.note,
            "Data has been automatically truncated to fit context limits."
        );

        let value = serde_json::to_value(&diagnosis).expect("serialize");
        assert_eq!(value["distro"], "rke2");
        assert_eq!(value["pods"]["crash_sample"][0], "CRASH: coredns-1 (CrashLoopBackOff)");
    }
}

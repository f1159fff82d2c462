use bundle_protocol::ToolDescriptor;
use schemars::JsonSchema;
use serde_json::Value;

use super::schemas::analyze::AnalyzeRequest;
use super::schemas::list_files::ListFilesRequest;
use super::schemas::read_file::ReadFileRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToolName {
    AutoDiagnose,
    AnalyzeNodes,
    AnalyzePods,
    AnalyzeEvents,
    ReadFile,
    ListFiles,
}

impl ToolName {
    pub(crate) const ALL: [ToolName; 6] = [
        ToolName::AutoDiagnose,
        ToolName::AnalyzeNodes,
        ToolName::AnalyzePods,
        ToolName::AnalyzeEvents,
        ToolName::ReadFile,
        ToolName::ListFiles,
    ];

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            ToolName::AutoDiagnose => "auto_diagnose",
            ToolName::AnalyzeNodes => "analyze_nodes",
            ToolName::AnalyzePods => "analyze_pods",
            ToolName::AnalyzeEvents => "analyze_events",
            ToolName::ReadFile => "read_file",
            ToolName::ListFiles => "list_files",
        }
    }

    pub(crate) fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    const fn description(self) -> &'static str {
        match self {
            ToolName::AutoDiagnose => {
                "PRIMARY TOOL. Runs a full diagnostic scan on the cluster bundle (Nodes, Pods, Events). \
                 Without `distro` the layout is inferred: k3s if <bundle>/k3s exists, otherwise rke2."
            }
            ToolName::AnalyzeNodes => "Lists NotReady nodes from the bundle's kubectl nodes dump.",
            ToolName::AnalyzePods => {
                "Finds crashing pods and Running pods with restarts in the kubectl pods dump."
            }
            ToolName::AnalyzeEvents => {
                "Samples Warning/Failed and BackOff/Crashed lines from the kubectl events dump."
            }
            ToolName::ReadFile => {
                "Reads one bundle file with a hard size cap (head + tail for large files)."
            }
            ToolName::ListFiles => "Lists files in the bundle (bounded).",
        }
    }

    fn input_schema(self) -> Value {
        match self {
            ToolName::AutoDiagnose
            | ToolName::AnalyzeNodes
            | ToolName::AnalyzePods
            | ToolName::AnalyzeEvents => input_schema::<AnalyzeRequest>(),
            ToolName::ReadFile => input_schema::<ReadFileRequest>(),
            ToolName::ListFiles => input_schema::<ListFilesRequest>(),
        }
    }

    fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.as_str().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

fn input_schema<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));
    // Keep the surface compact: clients only need the object shape.
    if let Some(map) = schema.as_object_mut() {
        map.remove("$schema");
        map.remove("title");
    }
    schema
}

/// Builds the discovery table. Called once when the service starts.
pub(crate) fn tool_catalog() -> Vec<ToolDescriptor> {
    ToolName::ALL.into_iter().map(ToolName::descriptor).collect()
}

//! Tool dispatch for the bundle MCP server.
//!
//! Every handler is a pure function of the bundle on disk and its arguments.

use bundle_protocol::{CallToolParams, CallToolResult, Limits, ToolContent, ToolDescriptor};
use bundle_triage::{Bundle, Distro, Triage, TriageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::catalog::ToolName;
use super::error::ToolError;
use super::list_files::compute_list_files_result;
use super::read_file::compute_read_file_result;
use super::schemas::analyze::AnalyzeRequest;
use super::schemas::list_files::ListFilesRequest;
use super::schemas::read_file::ReadFileRequest;
use super::schemas::{Lookup, NotFoundResult};

mod service;

/// Bundle triage MCP service.
#[derive(Debug, Clone)]
pub struct BundleService {
    limits: Limits,
    triage: Triage,
    /// Discovery table, built once.
    catalog: Vec<ToolDescriptor>,
}

impl BundleService {
    /// Runs one `tools/call` and wraps the JSON-encoded result as a text payload.
    pub fn call_tool(&self, params: CallToolParams) -> Result<CallToolResult, ToolError> {
        let tool = ToolName::parse(&params.name).ok_or(ToolError::UnknownTool(params.name))?;
        log::debug!("tools/call {}", tool.as_str());
        let text = self.dispatch(tool, params.arguments)?;
        Ok(CallToolResult {
            content: vec![ToolContent::text(text)],
        })
    }

    fn dispatch(&self, tool: ToolName, arguments: Map<String, Value>) -> Result<String, ToolError> {
        match tool {
            ToolName::AutoDiagnose => {
                self.analyze(tool, arguments, |triage, bundle| triage.diagnose(bundle))
            }
            ToolName::AnalyzeNodes => {
                self.analyze(tool, arguments, |triage, bundle| triage.nodes(bundle))
            }
            ToolName::AnalyzePods => {
                self.analyze(tool, arguments, |triage, bundle| triage.pods(bundle))
            }
            ToolName::AnalyzeEvents => {
                self.analyze(tool, arguments, |triage, bundle| triage.events(bundle))
            }
            ToolName::ReadFile => {
                let request: ReadFileRequest = parse_arguments(tool, arguments)?;
                let result = match open_bundle(&request.bundle, None)? {
                    Lookup::Found(bundle) => {
                        compute_read_file_result(&bundle, self.triage.reader(), &request.file)?
                    }
                    Lookup::Missing(missing) => Lookup::Missing(missing),
                };
                encode(tool, &result)
            }
            ToolName::ListFiles => {
                let request: ListFilesRequest = parse_arguments(tool, arguments)?;
                let result = match open_bundle(&request.bundle, None)? {
                    Lookup::Found(bundle) => Lookup::Found(compute_list_files_result(
                        &bundle,
                        self.triage.truncator(),
                    )),
                    Lookup::Missing(missing) => Lookup::Missing(missing),
                };
                encode(tool, &result)
            }
        }
    }

    fn analyze<R: Serialize>(
        &self,
        tool: ToolName,
        arguments: Map<String, Value>,
        run: impl FnOnce(&Triage, &Bundle) -> R,
    ) -> Result<String, ToolError> {
        let request: AnalyzeRequest = parse_arguments(tool, arguments)?;
        let distro = request
            .distro
            .as_deref()
            .map(str::parse::<Distro>)
            .transpose()?;
        let result = match open_bundle(&request.bundle, distro)? {
            Lookup::Found(bundle) => Lookup::Found(run(&self.triage, &bundle)),
            Lookup::Missing(missing) => Lookup::Missing(missing),
        };
        encode(tool, &result)
    }
}

fn parse_arguments<T: DeserializeOwned>(
    tool: ToolName,
    arguments: Map<String, Value>,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|source| {
        ToolError::InvalidArguments {
            tool: tool.as_str(),
            source,
        }
    })
}

fn open_bundle(root: &str, distro: Option<Distro>) -> Result<Lookup<Bundle>, ToolError> {
    match Bundle::open(root, distro) {
        Ok(bundle) => Ok(Lookup::Found(bundle)),
        Err(TriageError::BundleNotFound(path)) => Ok(Lookup::Missing(NotFoundResult::new(&path))),
        Err(err) => Err(err.into()),
    }
}

fn encode<T: Serialize>(tool: ToolName, result: &T) -> Result<String, ToolError> {
    serde_json::to_string_pretty(result).map_err(|source| ToolError::Encode {
        tool: tool.as_str(),
        source,
    })
}

use bundle_protocol::{InitializeResult, Limits, ServerInfo, ToolDescriptor};
use bundle_triage::Triage;

use super::BundleService;
use crate::tools::catalog;

pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

impl BundleService {
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            triage: Triage::new(limits),
            catalog: catalog::tool_catalog(),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.catalog
    }

    pub fn initialize_result(&self) -> InitializeResult {
        InitializeResult::new(
            ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            self.limits,
        )
    }
}

use schemars::JsonSchema;
use serde::Deserialize;

/// Arguments shared by `auto_diagnose` and the per-resource analyzers.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeRequest {
    /// Bundle root directory
    #[schemars(description = "Absolute path to bundle root")]
    pub bundle: String,

    /// Cluster distribution; inferred from the bundle layout when omitted
    #[schemars(
        description = "k3s or rke2. When omitted the distro is inferred, not fixed to k3s: k3s if the bundle has a k3s/ directory, otherwise rke2"
    )]
    pub distro: Option<String>,
}

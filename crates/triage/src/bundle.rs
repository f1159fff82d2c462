use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, TriageError};

/// Cluster distribution; selects the `<root>/<distro>/kubectl` subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distro {
    K3s,
    Rke2,
}

impl Distro {
    pub const fn as_str(self) -> &'static str {
        match self {
            Distro::K3s => "k3s",
            Distro::Rke2 => "rke2",
        }
    }

    /// `k3s` when the bundle carries a `k3s` subtree, `rke2` otherwise.
    pub fn detect(root: &Path) -> Self {
        if root.join(Distro::K3s.as_str()).exists() {
            Distro::K3s
        } else {
            Distro::Rke2
        }
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distro {
    type Err = TriageError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "k3s" => Ok(Distro::K3s),
            "rke2" => Ok(Distro::Rke2),
            _ => Err(TriageError::UnknownDistro(raw.to_string())),
        }
    }
}

/// The three `kubectl` dumps the analyzers consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KubectlDump {
    Nodes,
    Pods,
    Events,
}

impl KubectlDump {
    pub const fn file_name(self) -> &'static str {
        match self {
            KubectlDump::Nodes => "nodes",
            KubectlDump::Pods => "pods",
            KubectlDump::Events => "events",
        }
    }
}

/// A bundle root resolved for one request.
#[derive(Debug, Clone)]
pub struct Bundle {
    root: PathBuf,
    distro: Distro,
}

impl Bundle {
    /// Opens a bundle root. `distro: None` infers the layout from the directory tree.
    pub fn open(root: impl Into<PathBuf>, distro: Option<Distro>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(TriageError::BundleNotFound(root));
        }
        let distro = distro.unwrap_or_else(|| Distro::detect(&root));
        Ok(Self { root, distro })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn distro(&self) -> Distro {
        self.distro
    }

    /// Path of a dump relative to the bundle root, `/`-separated.
    pub fn dump_relative(&self, dump: KubectlDump) -> String {
        format!("{}/kubectl/{}", self.distro.as_str(), dump.file_name())
    }

    pub fn dump_path(&self, dump: KubectlDump) -> PathBuf {
        self.root
            .join(self.distro.as_str())
            .join("kubectl")
            .join(dump.file_name())
    }

    /// Joins a caller-supplied relative path onto the root, refusing anything that could leave it.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(TriageError::PathEscapesBundle(relative.to_string()));
                }
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn detect_prefers_k3s_subtree() {
        let tmp = tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("k3s").join("kubectl")).expect("mkdir");
        assert_eq!(Distro::detect(tmp.path()), Distro::K3s);
    }

    #[test]
    fn detect_falls_back_to_rke2() {
        let tmp = tempdir().expect("tempdir");
        assert_eq!(Distro::detect(tmp.path()), Distro::Rke2);
    }

    #[test]
    fn distro_parses_case_insensitively() {
        assert_eq!("RKE2".parse::<Distro>().expect("parse"), Distro::Rke2);
        assert!(matches!(
            "openshift".parse::<Distro>(),
            Err(TriageError::UnknownDistro(raw)) if raw == "openshift"
        ));
    }

    #[test]
    fn open_rejects_missing_root() {
        let tmp = tempdir().expect("tempdir");
        let missing = tmp.path().join("nope");
        assert!(matches!(
            Bundle::open(&missing, None),
            Err(TriageError::BundleNotFound(path)) if path == missing
        ));
    }

    #[test]
    fn explicit_distro_overrides_detection() {
        let tmp = tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("k3s")).expect("mkdir");
        let bundle = Bundle::open(tmp.path(), Some(Distro::Rke2)).expect("open");
        assert_eq!(
            bundle.dump_path(KubectlDump::Pods),
            tmp.path().join("rke2").join("kubectl").join("pods")
        );
        assert_eq!(bundle.dump_relative(KubectlDump::Pods), "rke2/kubectl/pods");
    }

    #[test]
    fn resolve_stays_inside_root() {
        let tmp = tempdir().expect("tempdir");
        let bundle = Bundle::open(tmp.path(), None).expect("open");

        assert_eq!(
            bundle.resolve("./k3s/kubectl/pods").expect("resolve"),
            tmp.path().join("k3s").join("kubectl").join("pods")
        );
        assert!(matches!(
            bundle.resolve("../etc/passwd"),
            Err(TriageError::PathEscapesBundle(_))
        ));
        assert!(matches!(
            bundle.resolve("/etc/passwd"),
            Err(TriageError::PathEscapesBundle(_))
        ));
    }
}

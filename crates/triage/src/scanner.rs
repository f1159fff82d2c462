use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

use crate::truncate::Truncator;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BundleListing {
    pub total_files: usize,
    pub files: Vec<String>,
}

/// Lists every regular file under `root` as sorted `/`-separated relative paths, bounded by
/// the truncator.
pub fn list_bundle_files(root: &Path, truncator: &Truncator) -> BundleListing {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Failed to read bundle entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
    files.sort();

    BundleListing {
        total_files: files.len(),
        files: truncator.bound(&files),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn lists_nested_files_relative_and_sorted() {
        let tmp = tempdir().expect("tempdir");
        let kubectl = tmp.path().join("k3s").join("kubectl");
        std::fs::create_dir_all(&kubectl).expect("mkdir");
        std::fs::write(kubectl.join("pods"), "").expect("write");
        std::fs::write(kubectl.join("events"), "").expect("write");
        std::fs::write(tmp.path().join("README"), "").expect("write");

        let listing = list_bundle_files(tmp.path(), &Truncator::default());
        assert_eq!(
            listing,
            BundleListing {
                total_files: 3,
                files: vec![
                    "README".to_string(),
                    "k3s/kubectl/events".to_string(),
                    "k3s/kubectl/pods".to_string(),
                ],
            }
        );
    }

    #[test]
    fn large_listings_are_bounded() {
        let tmp = tempdir().expect("tempdir");
        for i in 0..20 {
            std::fs::write(tmp.path().join(format!("log-{i:02}")), "").expect("write");
        }

        let listing = list_bundle_files(tmp.path(), &Truncator::default());
        assert_eq!(listing.total_files, 20);
        assert_eq!(listing.files.len(), 16);
        assert_eq!(listing.files[0], "log-00");
        assert_eq!(listing.files[15], "... (5 more items truncated)");
    }
}

use bundle_triage::{list_bundle_files, Bundle, Truncator};

use super::schemas::list_files::ListFilesResult;

pub(super) fn compute_list_files_result(bundle: &Bundle, truncator: &Truncator) -> ListFilesResult {
    let listing = list_bundle_files(bundle.root(), truncator);
    ListFilesResult {
        bundle: bundle.root().display().to_string(),
        truncated: listing.total_files > truncator.max_items(),
        total_files: listing.total_files,
        files: listing.files,
    }
}

use bundle_triage::{BoundedContent, BoundedReader, Bundle, TriageError};

use super::schemas::read_file::{ReadFileResult, ReadFileStatus};
use super::schemas::{Lookup, NotFoundResult};

pub(super) fn compute_read_file_result(
    bundle: &Bundle,
    reader: &BoundedReader,
    file: &str,
) -> Result<Lookup<ReadFileResult>, TriageError> {
    let path = bundle.resolve(file)?;
    let content = reader.read(&path);
    let status = match &content {
        BoundedContent::Absent => return Ok(Lookup::Missing(NotFoundResult::new(&path))),
        BoundedContent::Unreadable(_) => ReadFileStatus::Unreadable,
        other if other.is_truncated() => ReadFileStatus::Truncated,
        _ => ReadFileStatus::Full,
    };

    Ok(Lookup::Found(ReadFileResult {
        file: file.to_string(),
        status,
        omitted_bytes: content.omitted_bytes(),
        content: content.text().unwrap_or_default().to_string(),
    }))
}

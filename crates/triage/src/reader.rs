use bundle_protocol::Limits;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

const MAX_UTF8_LEN: usize = 4;
const SAFEGUARD_MARKER: &str = "\n... [TRUNCATED SAFEGUARD]";

pub(crate) fn excerpt_marker(omitted_bytes: u64) -> String {
    format!("\n\n... [TRUNCATED {omitted_bytes} bytes] ...\n\n")
}

/// Result of one bounded file read. Every textual variant fits the reader's character cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundedContent {
    /// The whole file.
    Full(String),
    /// Head and tail of an oversized file joined by a marker naming the omitted byte count.
    Excerpt { text: String, omitted_bytes: u64 },
    /// Flat trailing cut for text that decoded to more characters than the cap allows.
    Clipped(String),
    Absent,
    /// I/O failure, kept as data.
    Unreadable(String),
}

impl BoundedContent {
    /// Text to hand back to a caller; `None` only for absent files.
    pub fn text(&self) -> Option<&str> {
        match self {
            BoundedContent::Full(text)
            | BoundedContent::Clipped(text)
            | BoundedContent::Unreadable(text) => Some(text),
            BoundedContent::Excerpt { text, .. } => Some(text),
            BoundedContent::Absent => None,
        }
    }

    /// File text reduced to whole lines: truncation markers, their padding, and the lines cut
    /// at a head or tail boundary are dropped. Analyzers count records from this.
    pub fn complete_lines(&self) -> Cow<'_, str> {
        match self {
            BoundedContent::Full(text) => Cow::Borrowed(text),
            BoundedContent::Clipped(text) => {
                let kept = text.strip_suffix(SAFEGUARD_MARKER).unwrap_or(text);
                Cow::Borrowed(whole_head_lines(kept))
            }
            BoundedContent::Excerpt {
                text,
                omitted_bytes,
            } => match text.split_once(excerpt_marker(*omitted_bytes).as_str()) {
                Some((head, tail)) => {
                    Cow::Owned(format!("{}{}", whole_head_lines(head), whole_tail_lines(tail)))
                }
                None => Cow::Borrowed(text),
            },
            BoundedContent::Absent | BoundedContent::Unreadable(_) => Cow::Borrowed(""),
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(
            self,
            BoundedContent::Excerpt { .. } | BoundedContent::Clipped(_)
        )
    }

    pub fn omitted_bytes(&self) -> Option<u64> {
        match self {
            BoundedContent::Excerpt { omitted_bytes, .. } => Some(*omitted_bytes),
            _ => None,
        }
    }
}

/// Reads files under a hard character cap. Never fails: errors come back as
/// [`BoundedContent::Unreadable`].
#[derive(Debug, Clone, Copy)]
pub struct BoundedReader {
    max_chars: usize,
}

impl BoundedReader {
    pub const fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub const fn from_limits(limits: &Limits) -> Self {
        Self::new(limits.max_file_chars)
    }

    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn read(&self, path: &Path) -> BoundedContent {
        if !path.exists() {
            return BoundedContent::Absent;
        }
        match self.try_read(path) {
            Ok(content) => content,
            Err(err) => BoundedContent::Unreadable(format!("Error reading file: {err}")),
        }
    }

    fn try_read(&self, path: &Path) -> io::Result<BoundedContent> {
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();
        if size > self.max_chars as u64 {
            return self.read_excerpt(&mut file, size, path);
        }

        let mut raw = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
        file.read_to_end(&mut raw)?;
        let text = String::from_utf8_lossy(&raw).into_owned();
        if text.chars().count() > self.max_chars {
            return Ok(BoundedContent::Clipped(clip_flat(&text, self.max_chars)));
        }
        Ok(BoundedContent::Full(text))
    }

    fn read_excerpt(&self, file: &mut File, size: u64, path: &Path) -> io::Result<BoundedContent> {
        // `size` bounds the omitted count, so its marker is the longest one we can emit.
        let budget = self
            .max_chars
            .saturating_sub(excerpt_marker(size).chars().count());
        let head_chars = budget / 2;
        let tail_chars = budget - head_chars;

        let mut head_raw = Vec::new();
        file.by_ref()
            .take(window_bytes(head_chars))
            .read_to_end(&mut head_raw)?;
        let (head, head_bytes) = take_head(&decode_lossy(&head_raw), head_chars);

        let tail_start = size
            .saturating_sub(window_bytes(tail_chars))
            .max(head_bytes);
        file.seek(SeekFrom::Start(tail_start))?;
        let mut tail_raw = Vec::new();
        file.by_ref()
            .take(size - tail_start)
            .read_to_end(&mut tail_raw)?;
        let aligned = if tail_start > head_bytes {
            skip_continuation_bytes(&tail_raw)
        } else {
            &tail_raw[..]
        };
        let (tail, tail_bytes) = take_tail(&decode_lossy(aligned), tail_chars);

        let omitted_bytes = size.saturating_sub(head_bytes.saturating_add(tail_bytes));
        if omitted_bytes == 0 {
            return Ok(BoundedContent::Full(head + &tail));
        }

        log::debug!(
            "Truncated {} ({} bytes, {} omitted)",
            path.display(),
            size,
            omitted_bytes
        );
        Ok(BoundedContent::Excerpt {
            text: format!("{head}{}{tail}", excerpt_marker(omitted_bytes)),
            omitted_bytes,
        })
    }
}

fn window_bytes(chars: usize) -> u64 {
    u64::try_from(chars.saturating_mul(MAX_UTF8_LEN)).unwrap_or(u64::MAX)
}

/// Lossy decode that remembers how many raw bytes produced each char.
fn decode_lossy(raw: &[u8]) -> Vec<(char, usize)> {
    let mut decoded = Vec::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        decoded.extend(chunk.valid().chars().map(|ch| (ch, ch.len_utf8())));
        if !chunk.invalid().is_empty() {
            decoded.push((char::REPLACEMENT_CHARACTER, chunk.invalid().len()));
        }
    }
    decoded
}

fn take_head(decoded: &[(char, usize)], max_chars: usize) -> (String, u64) {
    collect_counted(&decoded[..decoded.len().min(max_chars)])
}

fn take_tail(decoded: &[(char, usize)], max_chars: usize) -> (String, u64) {
    collect_counted(&decoded[decoded.len().saturating_sub(max_chars)..])
}

fn collect_counted(decoded: &[(char, usize)]) -> (String, u64) {
    let text = decoded.iter().map(|(ch, _)| *ch).collect();
    let bytes = decoded.iter().map(|(_, len)| *len as u64).sum();
    (text, bytes)
}

fn skip_continuation_bytes(raw: &[u8]) -> &[u8] {
    let skip = raw
        .iter()
        .take(MAX_UTF8_LEN - 1)
        .take_while(|b| (**b & 0xC0) == 0x80)
        .count();
    &raw[skip..]
}

/// Drops a trailing line with no newline; it was cut short.
fn whole_head_lines(head: &str) -> &str {
    match head.rfind('\n') {
        Some(end) => &head[..=end],
        None => "",
    }
}

/// Drops everything up to the first newline; the tail window rarely starts on a line boundary.
fn whole_tail_lines(tail: &str) -> &str {
    match tail.find('\n') {
        Some(start) => &tail[start + 1..],
        None => "",
    }
}

fn clip_flat(text: &str, max_chars: usize) -> String {
    let keep = max_chars.saturating_sub(SAFEGUARD_MARKER.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(SAFEGUARD_MARKER);
    out
}

use bundle_protocol::Limits;
use std::fmt::Display;

const CLIP_MARKER: &str = "...";
const REMAINING_PREFIX: &str = "... (";
const REMAINING_SUFFIX: &str = " more items truncated)";

fn remaining_marker(remaining: usize) -> String {
    format!("{REMAINING_PREFIX}{remaining}{REMAINING_SUFFIX}")
}

fn is_remaining_marker(item: &str) -> bool {
    item.strip_prefix(REMAINING_PREFIX)
        .and_then(|rest| rest.strip_suffix(REMAINING_SUFFIX))
        .is_some_and(|count| !count.is_empty() && count.bytes().all(|b| b.is_ascii_digit()))
}

/// Caps finding lists: per-item character clipping plus a list length cap whose overflow
/// collapses into a single "N more items truncated" entry.
#[derive(Debug, Clone, Copy)]
pub struct Truncator {
    max_items: usize,
    max_line_chars: usize,
}

impl Truncator {
    pub const fn new(max_items: usize, max_line_chars: usize) -> Self {
        Self {
            max_items,
            max_line_chars,
        }
    }

    pub const fn from_limits(limits: &Limits) -> Self {
        Self::new(limits.max_items, limits.max_line_chars)
    }

    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn clip(&self, item: &str) -> String {
        let mut chars = item.char_indices();
        match chars.nth(self.max_line_chars) {
            None => item.to_string(),
            Some((cut, _)) => format!("{}{CLIP_MARKER}", &item[..cut]),
        }
    }

    /// Bounds a list of findings. Re-applying it to its own output changes nothing.
    pub fn bound<I>(&self, items: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
        if items.len() <= self.max_items {
            return items.iter().map(|item| self.clip(item)).collect();
        }

        // Exactly `max_items` entries followed by a remaining-count marker is our own output.
        // Recounting it would turn "N more" into "1 more", so the marker is kept verbatim.
        let already_bounded =
            items.len() == self.max_items + 1 && is_remaining_marker(&items[self.max_items]);
        let mut bounded: Vec<String> = items[..self.max_items]
            .iter()
            .map(|item| self.clip(item))
            .collect();
        if already_bounded {
            bounded.push(items[self.max_items].clone());
        } else {
            bounded.push(remaining_marker(items.len() - self.max_items));
        }
        bounded
    }
}

impl Default for Truncator {
    fn default() -> Self {
        Self::from_limits(&Limits::default())
    }
}

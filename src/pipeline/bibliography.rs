//! Bibliography formatting.
//!
//! A bibliography block is a run of entries, each starting with `[N]` at the
//! beginning of a line. An entry owns every following line up to the next
//! marker, so wrapped citations stay in one piece. Indices are kept exactly
//! as written; duplicates and gaps are not corrected.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

static RE_MARKER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\[\d+\]").unwrap());

static RE_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^\[(\d+)\]\s*(.*)").unwrap());

static RE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(https?://\S+)").unwrap());

/// One numbered citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographyEntry {
    /// Digits of the marker as written (`01` stays `01`).
    pub index: String,
    /// Entry text without the marker, trimmed. May span several lines.
    pub text: String,
}

impl BibliographyEntry {
    /// Render as a `bib-entry` fragment with URLs turned into links.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="bib-entry"><span class="bib-number">[{}]</span> {}</div>"#,
            self.index,
            autolink(&self.text)
        )
    }
}

/// Count `[N]` markers that start a line anywhere in `text`.
pub fn count_markers(text: &str) -> usize {
    RE_MARKER_LINE.find_iter(text).count()
}

/// Split a bibliography block into entries in document order.
///
/// Text before the first marker is dropped.
pub fn parse_entries(block: &str) -> Vec<BibliographyEntry> {
    let mut starts: Vec<usize> = RE_MARKER_LINE.find_iter(block).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    let mut entries = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(block.len());
        let chunk = block[start..end].trim();
        if chunk.is_empty() {
            continue;
        }

        let parsed = RE_ENTRY.captures(chunk).map(|caps| BibliographyEntry {
            index: caps[1].to_string(),
            text: caps[2].trim().to_string(),
        });

        match parsed {
            Some(entry) => entries.push(entry),
            None => warn!(
                "Dropping bibliography text without a usable [N] marker: {:?}",
                chunk.chars().take(40).collect::<String>()
            ),
        }
    }
    entries
}

/// Wrap every `http(s)://` URL in a link that opens in a new window.
pub fn autolink(text: &str) -> String {
    RE_URL
        .replace_all(text, r#"<a href="$1" target="_blank">$1</a>"#)
        .into_owned()
}

/// Format a bibliography block as newline-joined `bib-entry` fragments.
pub fn format_bibliography(block: &str) -> String {
    render_entries(&parse_entries(block))
}

pub fn render_entries(entries: &[BibliographyEntry]) -> String {
    entries
        .iter()
        .map(BibliographyEntry::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

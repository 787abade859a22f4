//! Structural extraction: partition a raw report into title, body and
//! bibliography.
//!
//! ## Partition
//!
//! ```text
//! <!-- TYPE: … -->          dropped (structural comment)
//! # Title                   → title
//! …body…                    → main_body
//! ## Appendix               heading line dropped, following lines kept
//! …
//! ## Bibliography           → bibliography (up to the next `##`)
//! ## Report Metadata        dropped, together with everything after it
//! ```
//!
//! The bibliography is sliced out first; everything from its heading onward
//! is no longer a body candidate. The body is then collected in one forward
//! pass over the remaining lines. Headings are matched in English and Chinese.
//!
//! The `## Appendix` rule only drops the heading line itself. Lines under it
//! stay in the body.

use crate::pipeline::bibliography;
use crate::pipeline::detect::{detect_type, ReportType};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Research Report";

static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());

static RE_GENERATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Generated:\*{0,2}[ \t]*(\S.*)").unwrap());

static RE_TOTAL_SOURCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Total Sources:\*{0,2}\s*(\d+)").unwrap());

static RE_BIB_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^##[ \t]+(?:Bibliography|参考文献)[ \t]*$").unwrap());

static RE_H2_LINE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^##\s+").unwrap());

// Line classifiers, applied to the trimmed line.
static RE_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+").unwrap());
static RE_COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<!--.*-->$").unwrap());
static RE_METADATA_H2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+(?:Report Metadata|报告元数据)").unwrap());
static RE_APPENDIX_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+(?:Appendix|附录)").unwrap());
static RE_BIB_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+(?:Bibliography|参考文献)").unwrap());

/// A report split into the parts the template consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub research_type: ReportType,
    pub title: String,
    pub date: String,
    /// Source count as displayed (explicit metadata value or counted markers).
    pub source_count: String,
    pub main_body: String,
    pub bibliography: String,
}

impl ReportDocument {
    /// Extract with the stock defaults: `Research Report` as title and
    /// today's local date.
    pub fn extract(text: &str) -> Self {
        Self::extract_with(text, DEFAULT_TITLE, None)
    }

    /// Extract with explicit fallbacks for a missing title and a missing
    /// `Generated:` field. `fallback_date = None` means today's local date.
    pub fn extract_with(text: &str, default_title: &str, fallback_date: Option<&str>) -> Self {
        let text = normalise_line_endings(text);
        let (candidate, bibliography) = split_bibliography(&text);

        Self {
            research_type: detect_type(&text),
            title: extract_title(&text).unwrap_or_else(|| default_title.to_string()),
            date: extract_date(&text).unwrap_or_else(|| match fallback_date {
                Some(d) => d.to_string(),
                None => today(),
            }),
            source_count: source_count(&text),
            main_body: extract_main_body(candidate),
            bibliography: bibliography.to_string(),
        }
    }
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Text of the first top-level heading with non-blank text, trimmed.
pub fn extract_title(text: &str) -> Option<String> {
    RE_TITLE
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|t| !t.is_empty())
}

/// Value of the first `Generated:` field, trimmed.
///
/// A bold marker closing after the value (`**Generated: 2024-01-01**`) is
/// not part of it.
pub fn extract_date(text: &str) -> Option<String> {
    RE_GENERATED
        .captures(text)
        .map(|caps| trim_field_value(&caps[1]).to_string())
        .filter(|d| !d.is_empty())
}

/// Strip surrounding whitespace and trailing bold markers from a field value.
pub(crate) fn trim_field_value(raw: &str) -> &str {
    raw.trim().trim_end_matches('*').trim_end()
}

/// Number of sources as displayed: the digits of the `Total Sources:` field
/// exactly as written, otherwise the number of `[N]` markers at the start of
/// a line anywhere in the report.
pub fn source_count(text: &str) -> String {
    match RE_TOTAL_SOURCES.captures(text) {
        Some(caps) => caps[1].to_string(),
        None => bibliography::count_markers(text).to_string(),
    }
}

/// Split at the `## Bibliography` heading.
///
/// Returns `(text before the heading, bibliography block)`. The block runs
/// up to the next second-level heading or the end of the document and is
/// trimmed. Without a bibliography heading the whole text is the candidate.
pub fn split_bibliography(text: &str) -> (&str, &str) {
    let Some(heading) = RE_BIB_HEADING.find(text) else {
        return (text, "");
    };

    let rest = &text[heading.end()..];
    let block = match RE_H2_LINE_START.find(rest) {
        Some(next) => &rest[..next.start()],
        None => rest,
    };

    (&text[..heading.start()], block.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeTitle,
    InBody,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Title,
    Comment,
    Metadata,
    Appendix,
    Bibliography,
    Content,
}

fn classify(line: &str, state: ScanState) -> LineKind {
    let stripped = line.trim();
    if state == ScanState::BeforeTitle && RE_H1.is_match(stripped) {
        LineKind::Title
    } else if RE_COMMENT_LINE.is_match(stripped) {
        LineKind::Comment
    } else if RE_METADATA_H2.is_match(stripped) {
        LineKind::Metadata
    } else if RE_APPENDIX_H2.is_match(stripped) {
        LineKind::Appendix
    } else if RE_BIB_H2.is_match(stripped) {
        LineKind::Bibliography
    } else {
        LineKind::Content
    }
}

/// Collect the report body from the bibliography-free candidate region.
///
/// Drops the first `#` heading, whole-line HTML comments, `## Appendix`
/// heading lines and stray `## Bibliography` headings. Stops for good at
/// `## Report Metadata`. Lines before the title are kept.
pub fn extract_main_body(candidate: &str) -> String {
    let mut state = ScanState::BeforeTitle;
    let mut body: Vec<&str> = Vec::new();

    for line in candidate.split('\n') {
        if state == ScanState::Stopped {
            break;
        }
        match classify(line, state) {
            LineKind::Title => state = ScanState::InBody,
            LineKind::Metadata => state = ScanState::Stopped,
            LineKind::Comment | LineKind::Appendix | LineKind::Bibliography => {}
            LineKind::Content => body.push(line),
        }
    }

    body.join("\n").trim().to_string()
}

//! Metrics dashboard derived from the raw report.
//!
//! Computed from the original document text, not from the extracted body, so
//! metadata and bibliography sections still count.

use crate::pipeline::detect::ReportType;
use crate::pipeline::extract;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODE: &str = "Standard";

static RE_MODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Research Mode:\*{0,2}[ \t]*(\S.*)").unwrap());

static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^##\s+").unwrap());

static RE_CONFIDENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(?:信心等级|Confidence Level|信心水平)\*?\*?[:：]\s*([^\n]+)").unwrap()
});

/// One dashboard cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// Ordered dashboard: Sources, Sections, Words, Mode, then Confidence when the
/// report states one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsDashboard {
    pub metrics: Vec<Metric>,
}

impl MetricsDashboard {
    /// Build the dashboard for a report.
    ///
    /// The research type does not change any value today; it is accepted so
    /// callers pass the same inputs the template routing sees.
    pub fn build(text: &str, _research_type: ReportType) -> Self {
        let mut metrics = vec![
            metric("Sources", extract::source_count(text)),
            metric("Sections", section_count(text).to_string()),
            metric("Words", word_display(word_count(text))),
            metric("Mode", research_mode(text)),
        ];
        if let Some(confidence) = confidence_level(text) {
            metrics.push(metric("Confidence", confidence));
        }
        Self { metrics }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Render as the `metrics-dashboard` block the templates style.
    pub fn to_html(&self) -> String {
        let cells: Vec<String> = self
            .metrics
            .iter()
            .map(|m| {
                format!(
                    r#"<div class="metric"><span class="metric-number">{}</span><span class="metric-label">{}</span></div>"#,
                    m.value, m.label
                )
            })
            .collect();
        format!(r#"<div class="metrics-dashboard">{}</div>"#, cells.join("\n"))
    }
}

fn metric(label: &str, value: String) -> Metric {
    Metric {
        label: label.to_string(),
        value,
    }
}

/// Number of `##` headings in the document.
pub fn section_count(text: &str) -> usize {
    RE_H2.find_iter(text).count()
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `4300` → `"4K+"`, `500` → `"500"`.
pub fn word_display(count: usize) -> String {
    if count >= 1000 {
        format!("{}K+", count / 1000)
    } else {
        count.to_string()
    }
}

/// Value of the `Research Mode:` field, or `Standard`.
pub fn research_mode(text: &str) -> String {
    RE_MODE
        .captures(text)
        .map(|caps| extract::trim_field_value(&caps[1]).to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MODE.to_string())
}

/// Short confidence label, e.g. `**Confidence Level:** High (3 sources)` → `High`.
///
/// Stray `*` and spaces around the value are trimmed and anything from the
/// first `(` or `（` on is cut off.
pub fn confidence_level(text: &str) -> Option<String> {
    let raw = RE_CONFIDENCE.captures(text)?.get(1)?.as_str().trim();
    if raw.is_empty() {
        return None;
    }
    let short = raw.trim_matches(|c| c == '*' || c == ' ');
    let short = short.split('（').next().unwrap_or_default();
    let short = short.split('(').next().unwrap_or_default();
    Some(short.trim().to_string())
}

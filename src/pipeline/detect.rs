//! Research-type detection and template routing.
//!
//! Reports carry their category in a single comment such as
//! `<!-- TYPE: stock -->`. The category picks the layout template; there is
//! no other dispatch on it inside the pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a research report. Unknown labels normalise to [`ReportType::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Technical,
    Comparison,
    Stock,
    Market,
    #[default]
    General,
    Exploratory,
}

impl ReportType {
    pub const ALL: [ReportType; 6] = [
        ReportType::Technical,
        ReportType::Comparison,
        ReportType::Stock,
        ReportType::Market,
        ReportType::General,
        ReportType::Exploratory,
    ];

    /// Parse a type label (case-insensitive). Unknown labels map to `General`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "technical" => ReportType::Technical,
            "comparison" => ReportType::Comparison,
            "stock" => ReportType::Stock,
            "market" => ReportType::Market,
            "exploratory" => ReportType::Exploratory,
            _ => ReportType::General,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Technical => "technical",
            ReportType::Comparison => "comparison",
            ReportType::Stock => "stock",
            ReportType::Market => "market",
            ReportType::General => "general",
            ReportType::Exploratory => "exploratory",
        }
    }

    /// File name of the layout template this type is rendered with.
    ///
    /// | Type | Template |
    /// |------|----------|
    /// | technical | `technical_report_template.html` |
    /// | comparison | `comparison_report_template.html` |
    /// | stock, market | `mckinsey_report_template.html` |
    /// | general, exploratory | `general_report_template.html` |
    pub fn template_file(self) -> &'static str {
        match self {
            ReportType::Technical => "technical_report_template.html",
            ReportType::Comparison => "comparison_report_template.html",
            ReportType::Stock | ReportType::Market => "mckinsey_report_template.html",
            ReportType::General | ReportType::Exploratory => "general_report_template.html",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static RE_TYPE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<!--\s*TYPE:\s*(\w+)\s*-->").unwrap());

/// Return the raw, lower-cased label of the first `<!-- TYPE: x -->` comment.
pub fn type_label(text: &str) -> Option<String> {
    RE_TYPE_COMMENT
        .captures(text)
        .map(|caps| caps[1].to_lowercase())
}

/// Detect the research type of a report. Absence of the annotation is not an
/// error: the report is treated as `general`.
pub fn detect_type(text: &str) -> ReportType {
    type_label(text)
        .map(|label| ReportType::from_label(&label))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_annotation_is_general() {
        assert_eq!(detect_type("# Title\n\nBody text."), ReportType::General);
        assert_eq!(detect_type(""), ReportType::General);
    }

    #[test]
    fn test_annotation_any_case_and_spacing() {
        for doc in [
            "<!-- TYPE: stock -->",
            "<!--TYPE:STOCK-->",
            "<!--   type:   Stock   -->",
            "# Title\n<!-- Type: stock -->\nbody",
        ] {
            assert_eq!(detect_type(doc), ReportType::Stock, "input: {doc:?}");
        }
    }

    #[test]
    fn test_first_annotation_wins() {
        let doc = "<!-- TYPE: market -->\n<!-- TYPE: technical -->";
        assert_eq!(detect_type(doc), ReportType::Market);
    }

    #[test]
    fn test_unknown_label_normalises_to_general() {
        assert_eq!(type_label("<!-- TYPE: academic -->").as_deref(), Some("academic"));
        assert_eq!(detect_type("<!-- TYPE: academic -->"), ReportType::General);
    }

    #[test]
    fn test_template_routing() {
        assert_eq!(ReportType::Stock.template_file(), ReportType::Market.template_file());
        assert_eq!(
            ReportType::Exploratory.template_file(),
            "general_report_template.html"
        );
        assert_eq!(
            ReportType::Technical.template_file(),
            "technical_report_template.html"
        );
        for t in ReportType::ALL {
            assert_eq!(ReportType::from_label(t.as_str()), t);
        }
    }
}

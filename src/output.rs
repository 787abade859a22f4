//! Output types returned by the conversion entry points.

use crate::pipeline::detect::ReportType;
use crate::pipeline::metrics::MetricsDashboard;
use serde::{Deserialize, Serialize};

/// Result of one report conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The filled, self-contained HTML document.
    pub html: String,
    pub research_type: ReportType,
    /// File name of the template the report was routed to.
    pub template_file: String,
    pub title: String,
    pub date: String,
    pub source_count: String,
    pub metrics: MetricsDashboard,
    pub stats: ConversionStats,
}

/// Size and timing figures for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub bibliography_entries: usize,
    /// Whether the root `lang` attribute was rewritten.
    pub localised: bool,
    pub duration_ms: u64,
}

//! # deepresearch-report2html
//!
//! Convert Deep Research Markdown reports into styled, self-contained HTML.
//!
//! A report is ordinary Markdown with a few conventions: a
//! `<!-- TYPE: stock -->` comment naming its category, a `#` title, bold
//! metadata fields (`**Generated:**`, `**Total Sources:**`,
//! `**Research Mode:**`, `**Confidence Level:**`), a `## Bibliography` of
//! `[N]` entries and an optional trailing `## Report Metadata` section. The
//! category selects one of four layout templates; the rest is extracted,
//! rendered and substituted into that template's placeholders.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown report
//!  │
//!  ├─ 1. Detect       <!-- TYPE: x --> → research type → template file
//!  ├─ 2. Extract      title, date, sources, body, bibliography
//!  ├─ 3. Render       body Markdown → HTML (pulldown-cmark)
//!  ├─ 4. Polish       template classes, citations, executive summary, emoji
//!  ├─ 5. Bibliography numbered entries with clickable URLs
//!  ├─ 6. Metrics      Sources / Sections / Words / Mode / Confidence
//!  └─ 7. Fill         {{TITLE}} {{DATE}} {{SOURCE_COUNT}} {{METRICS_DASHBOARD}}
//!                     {{CONTENT}} {{BIBLIOGRAPHY}}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deepresearch_report2html::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .templates_dir("templates")
//!         .build()?;
//!     let (path, output) = convert_to_file("report.md", None, &config).await?;
//!     eprintln!("{} → {} ({} bytes)", output.title, path.display(), output.stats.output_bytes);
//!     Ok(())
//! }
//! ```
//!
//! Embedders that already hold the report and template in memory call
//! [`convert_markdown`], which performs no I/O.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `report2html` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, LangPolicy};
pub use convert::{
    convert, convert_markdown, convert_sync, convert_to_file, default_output_path, load_template,
    template_path,
};
pub use error::ReportError;
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::bibliography::{format_bibliography, BibliographyEntry};
pub use pipeline::detect::{detect_type, ReportType};
pub use pipeline::extract::ReportDocument;
pub use pipeline::metrics::{Metric, MetricsDashboard};
pub use pipeline::postprocess::post_process_html;
pub use pipeline::render::render_markdown;
pub use pipeline::template::fill;

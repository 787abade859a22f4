//! Conversion entry points.
//!
//! [`convert_markdown`] is the deterministic core: report text + template in,
//! HTML out, no I/O. The async functions wrap it with the file layer: read
//! the report, route and read the template, and optionally write the result.
//! Either a complete document is produced or nothing is written.

use crate::config::ConversionConfig;
use crate::error::ReportError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::bibliography;
use crate::pipeline::detect::{detect_type, ReportType};
use crate::pipeline::extract::ReportDocument;
use crate::pipeline::metrics::MetricsDashboard;
use crate::pipeline::{postprocess, render, template};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert report text with an already-loaded template.
///
/// Same text + same template + same config always yields the same `html`.
/// (`fallback_date = None` makes a report without a `Generated:` field
/// depend on today's date.)
pub fn convert_markdown(
    text: &str,
    template_html: &str,
    config: &ConversionConfig,
) -> ConversionOutput {
    let start = Instant::now();

    // ── Step 1-2: Detect type and extract structure ──────────────────────
    let doc = ReportDocument::extract_with(
        text,
        &config.default_title,
        config.fallback_date.as_deref(),
    );
    info!("Research type: {}", doc.research_type);
    info!("Title: {}", doc.title);
    info!("Date: {}", doc.date);
    info!("Sources: {}", doc.source_count);

    // ── Step 3-4: Render and post-process the body ───────────────────────
    let content_html = postprocess::post_process_html(&render::render_markdown(&doc.main_body));
    debug!("Body: {} bytes Markdown → {} bytes HTML", doc.main_body.len(), content_html.len());

    // ── Step 5: Bibliography ─────────────────────────────────────────────
    let entries = bibliography::parse_entries(&doc.bibliography);
    let bibliography_html = bibliography::render_entries(&entries);
    debug!("Bibliography: {} entries", entries.len());

    // ── Step 6: Metrics ──────────────────────────────────────────────────
    let metrics = MetricsDashboard::build(text, doc.research_type);

    // ── Step 7: Fill template ────────────────────────────────────────────
    let localised = config.lang_policy.applies_to(text);
    let template_html = if localised {
        template::localise_root(template_html, &config.locale_tag)
    } else {
        template_html.to_string()
    };
    let html = template::fill(&template_html, &doc, &content_html, &bibliography_html, &metrics);

    let stats = ConversionStats {
        input_bytes: text.len(),
        output_bytes: html.len(),
        bibliography_entries: entries.len(),
        localised,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    ConversionOutput {
        html,
        research_type: doc.research_type,
        template_file: doc.research_type.template_file().to_string(),
        title: doc.title,
        date: doc.date,
        source_count: doc.source_count,
        metrics,
        stats,
    }
}

/// Path of the template a research type is routed to.
pub fn template_path(templates_dir: &Path, research_type: ReportType) -> PathBuf {
    templates_dir.join(research_type.template_file())
}

/// Read the template for `research_type` from `templates_dir`.
pub async fn load_template(
    templates_dir: &Path,
    research_type: ReportType,
) -> Result<String, ReportError> {
    let path = template_path(templates_dir, research_type);
    let html = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ReportError::MissingTemplate {
            path: path.clone(),
            research_type,
            source,
        })?;
    info!("Template: {}", path.display());
    Ok(html)
}

/// Convert a Markdown report file to HTML.
///
/// # Errors
/// - [`ReportError::MissingInput`] if the report cannot be read
/// - [`ReportError::MissingTemplate`] if the routed template cannot be read
pub async fn convert(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ReportError> {
    let input = input.as_ref();
    info!("Starting conversion: {}", input.display());

    let text = tokio::fs::read_to_string(input)
        .await
        .map_err(|source| ReportError::MissingInput {
            path: input.to_path_buf(),
            source,
        })?;

    let research_type = detect_type(&text);
    let template_html = load_template(&config.templates_dir, research_type).await?;

    Ok(convert_markdown(&text, &template_html, config))
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ReportError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ReportError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input, config))
}

/// Default output location: the input path with an `.html` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

/// Convert a report and write the HTML next to it (or to `output`).
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ConversionConfig,
) -> Result<(PathBuf, ConversionOutput), ReportError> {
    let input = input.as_ref();
    let result = convert(input, config).await?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ReportError::OutputWriteFailed {
                path: path.clone(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &result.html)
        .await
        .map_err(|e| ReportError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| ReportError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    info!("Output: {} ({} bytes)", path.display(), result.stats.output_bytes);
    Ok((path, result))
}

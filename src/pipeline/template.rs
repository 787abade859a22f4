//! Template filling.
//!
//! Templates are opaque HTML documents that own six `{{NAME}}` placeholders.
//! Substitution is a single pass over the template: a value that itself
//! contains `{{DATE}}` is inserted verbatim and never expanded again.
//! Placeholders this module does not know are left as they are.

use crate::pipeline::extract::ReportDocument;
use crate::pipeline::metrics::MetricsDashboard;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

pub const PLACEHOLDERS: [&str; 6] = [
    "TITLE",
    "DATE",
    "SOURCE_COUNT",
    "METRICS_DASHBOARD",
    "CONTENT",
    "BIBLIOGRAPHY",
];

pub const ENGLISH_ROOT: &str = r#"<html lang="en">"#;

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").unwrap());

/// Placeholders from [`PLACEHOLDERS`] that do not occur in `template`.
pub fn missing_placeholders(template: &str) -> Vec<&'static str> {
    PLACEHOLDERS
        .iter()
        .copied()
        .filter(|name| !template.contains(&format!("{{{{{name}}}}}")))
        .collect()
}

/// Rewrite the template's English root element to carry `locale_tag`.
pub fn localise_root(template: &str, locale_tag: &str) -> String {
    template.replace(ENGLISH_ROOT, &format!(r#"<html lang="{locale_tag}">"#))
}

/// Substitute every known placeholder occurrence in one pass.
pub fn fill(
    template: &str,
    doc: &ReportDocument,
    content_html: &str,
    bibliography_html: &str,
    metrics: &MetricsDashboard,
) -> String {
    let missing = missing_placeholders(template);
    if !missing.is_empty() {
        warn!("Template is missing placeholders: {}", missing.join(", "));
    }

    let dashboard_html = metrics.to_html();
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let value = match &caps[1] {
                "TITLE" => doc.title.as_str(),
                "DATE" => doc.date.as_str(),
                "SOURCE_COUNT" => doc.source_count.as_str(),
                "METRICS_DASHBOARD" => dashboard_html.as_str(),
                "CONTENT" => content_html,
                "BIBLIOGRAPHY" => bibliography_html,
                _ => return caps[0].to_string(),
            };
            value.to_string()
        })
        .into_owned()
}

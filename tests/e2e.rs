//! End-to-end tests for deepresearch-report2html.
//!
//! Reports are written to a temporary directory and converted with the stock
//! templates shipped in `./templates/`, so these tests exercise the file
//! layer, template routing and every pipeline stage together.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use deepresearch_report2html::{
    convert, convert_markdown, convert_sync, convert_to_file, ConversionConfig, LangPolicy,
    ReportError, ReportType,
};
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config() -> ConversionConfig {
    ConversionConfig::builder()
        .templates_dir(templates_dir())
        .fallback_date("2000-01-01")
        .build()
        .expect("valid config")
}

fn write_report(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).expect("write report");
    path
}

const MY_REPORT: &str = "<!-- TYPE: general -->
# My Report

Generated: 2024-01-01

## Executive Summary

Three sources agree [1] [2].

## Findings

| Metric | Value |
| --- | --- |
| Growth | 12% [3] |

### Detail

- first point
- second point

## Bibliography

[1] Example Source - https://example.com/one
[2] Second Source
    continued on a second line
[3] Third Source - https://example.org/three

## Report Metadata

- METADATA-ONLY-MARKER
- Reviewer notes that must never be published
";

fn assert_html_document(html: &str, context: &str) {
    assert!(html.starts_with("<!DOCTYPE html>"), "[{context}] not a full document");
    assert!(html.trim_end().ends_with("</html>"), "[{context}] truncated document");
    for placeholder in [
        "{{TITLE}}",
        "{{DATE}}",
        "{{SOURCE_COUNT}}",
        "{{METRICS_DASHBOARD}}",
        "{{CONTENT}}",
        "{{BIBLIOGRAPHY}}",
    ] {
        assert!(!html.contains(placeholder), "[{context}] unfilled {placeholder}");
    }
}

// ── Full conversions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_my_report_end_to_end() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "my_report.md", MY_REPORT);

    let out = convert(&input, &config()).await.expect("conversion succeeds");
    let html = &out.html;
    assert_html_document(html, "my_report");

    assert_eq!(out.title, "My Report");
    assert_eq!(out.date, "2024-01-01");
    assert_eq!(out.source_count, "3");
    assert_eq!(out.research_type, ReportType::General);
    assert_eq!(out.template_file, "general_report_template.html");

    assert!(html.contains("<title>My Report</title>"));
    assert!(html.contains("<h1>My Report</h1>"));
    assert!(html.contains("2024-01-01 · 3 sources"));

    assert!(!html.contains("METADATA-ONLY-MARKER"));
    assert!(!html.contains("Reviewer notes"));

    // Body rendering and post-processing
    assert!(html.contains(r#"<div class="section-title">Findings</div>"#));
    assert!(html.contains(r#"<div class="subsection-title">Detail</div>"#));
    assert!(html.contains(r#"<table class="data-table">"#));
    assert!(html.contains(r#"<td>12% <span class="citation">[3]</span></td>"#));
    assert!(html.contains(r#"<div class="executive-summary"><p>Three sources agree"#));
    assert!(html.contains("<li>first point</li>"));

    // Bibliography
    assert_eq!(out.stats.bibliography_entries, 3);
    assert!(html.contains(concat!(
        r#"<span class="bib-number">[1]</span> Example Source - "#,
        r#"<a href="https://example.com/one" target="_blank">"#,
    )));
    assert!(html.contains("continued on a second line"));

    // Dashboard: no confidence field → four entries
    assert_eq!(out.metrics.len(), 4);
    assert_eq!(out.metrics.get("Sections"), Some("4"));
    assert_eq!(out.metrics.get("Mode"), Some("Standard"));

    // Default policy rewrites the root language
    assert!(html.contains(r#"<html lang="zh-CN">"#));
}

#[tokio::test]
async fn test_stock_report_routed_to_mckinsey_template() {
    let dir = TempDir::new().unwrap();
    let input = write_report(
        &dir,
        "stock.md",
        concat!(
            "<!-- TYPE: Stock -->\n# ACME Corp\n\n",
            "**Confidence Level:** High (analyst consensus)\n\n",
            "## Valuation\n\nText.\n",
        ),
    );

    let out = convert(&input, &config()).await.unwrap();
    assert_eq!(out.research_type, ReportType::Stock);
    assert_eq!(out.template_file, "mckinsey_report_template.html");
    assert!(out.html.contains("Market &amp; Investment Brief"));
    assert_eq!(out.metrics.len(), 5);
    assert_eq!(out.metrics.get("Confidence"), Some("High"));
    assert_eq!(out.date, "2000-01-01", "missing date uses the configured fallback");
    assert_eq!(out.source_count, "0");
}

#[tokio::test]
async fn test_unknown_type_uses_general_template() {
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "x.md", "<!-- TYPE: academic -->\nNo title here.\n");

    let out = convert(&input, &config()).await.unwrap();
    assert_eq!(out.research_type, ReportType::General);
    assert_eq!(out.title, "Research Report");
    assert!(out.html.contains("<p>No title here.</p>"));
}

#[tokio::test]
async fn test_chinese_report() {
    let dir = TempDir::new().unwrap();
    let input = write_report(
        &dir,
        "zh.md",
        concat!(
            "<!-- TYPE: technical -->\n# 技术调研 \u{1F680}\n\n",
            "**Generated:** 2025-03-01\n\n",
            "## 执行摘要\n\n结论可靠\u{2705}[1]。\n\n",
            "## 分析\n\n分析内容\n\n",
            "## 附录\n\n附录内容\n\n",
            "## 参考文献\n\n[1] 来源一 https://example.cn/a\n\n",
            "## 报告元数据\n\n- 内部备注\n",
        ),
    );

    let cfg = ConversionConfig::builder()
        .templates_dir(templates_dir())
        .lang_policy(LangPolicy::DetectCjk)
        .build()
        .unwrap();
    let out = convert(&input, &cfg).await.unwrap();
    let html = &out.html;

    assert_eq!(out.template_file, "technical_report_template.html");
    assert_eq!(out.date, "2025-03-01");
    assert!(out.stats.localised);
    assert!(html.contains(r#"<html lang="zh-CN">"#));
    let summary = r#"<div class="executive-summary"><p>结论可靠<span class="citation">[1]</span>。</p>"#;
    assert!(html.contains(summary), "got: {html}");
    assert!(!html.contains('\u{2705}'));
    assert!(html.contains("附录内容"), "appendix body is kept");
    assert!(!html.contains(r#"<div class="section-title">附录</div>"#));
    assert!(!html.contains("内部备注"));
    assert!(html.contains(r#"<a href="https://example.cn/a" target="_blank">"#));
}

#[tokio::test]
async fn test_english_report_keeps_lang_under_detect_policy() {
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "en.md", MY_REPORT);
    let cfg = ConversionConfig::builder()
        .templates_dir(templates_dir())
        .lang_policy(LangPolicy::DetectCjk)
        .build()
        .unwrap();

    let out = convert(&input, &cfg).await.unwrap();
    assert!(out.html.contains(r#"<html lang="en">"#));
    assert!(!out.stats.localised);
}

#[tokio::test]
async fn test_metadata_values_kept_as_written() {
    let dir = TempDir::new().unwrap();
    let input = write_report(
        &dir,
        "raw.md",
        concat!(
            "# Raw\n\n**Generated: 2024-05-06**\n**Research Mode: Deep**\n",
            "**Total Sources:** 007\n\n## Body\n\nText [01].\n\n",
            "## Bibliography\n\n[01] Zero-padded source\n",
        ),
    );

    let out = convert(&input, &config()).await.unwrap();
    assert_eq!(out.date, "2024-05-06");
    assert_eq!(out.source_count, "007");
    assert_eq!(out.metrics.get("Mode"), Some("Deep"));
    assert!(out.html.contains(r#"<span class="bib-number">[01]</span> Zero-padded source"#));
    assert!(!out.html.contains("2024-05-06**"));
}

// ── File layer ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_convert_to_file_default_path() {
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "report.md", MY_REPORT);

    let (path, out) = convert_to_file(&input, None, &config()).await.unwrap();
    assert_eq!(path, dir.path().join("report.html"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, out.html);
    assert_eq!(written.len(), out.stats.output_bytes);
    assert!(!dir.path().join("report.html.tmp").exists());
}

#[tokio::test]
async fn test_convert_to_file_explicit_nested_path() {
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "report.md", MY_REPORT);
    let target = dir.path().join("out/nested/final.html");

    let (path, _) = convert_to_file(&input, Some(target.as_path()), &config()).await.unwrap();
    assert_eq!(path, target);
    assert!(target.exists());
}

#[tokio::test]
async fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let err = convert(dir.path().join("absent.md"), &config()).await.unwrap_err();
    assert!(matches!(err, ReportError::MissingInput { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_missing_template_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let empty_templates = TempDir::new().unwrap();
    let input = write_report(&dir, "report.md", "<!-- TYPE: comparison -->\n# A vs B\n");
    let cfg = ConversionConfig::builder()
        .templates_dir(empty_templates.path())
        .build()
        .unwrap();

    let err = convert_to_file(&input, None, &cfg).await.unwrap_err();
    match err {
        ReportError::MissingTemplate { path, research_type, .. } => {
            assert_eq!(research_type, ReportType::Comparison);
            assert!(path.ends_with("comparison_report_template.html"));
        }
        other => panic!("expected MissingTemplate, got {other:?}"),
    }
    assert!(!dir.path().join("report.html").exists());
}

#[test]
fn test_convert_sync() {
    let dir = TempDir::new().unwrap();
    let input = write_report(&dir, "sync.md", MY_REPORT);
    let out = convert_sync(&input, &config()).unwrap();
    assert_eq!(out.title, "My Report");
}

#[test]
fn test_in_memory_conversion_is_deterministic() {
    let template_path = templates_dir().join("general_report_template.html");
    let template = std::fs::read_to_string(template_path).unwrap();
    let a = convert_markdown(MY_REPORT, &template, &config());
    let b = convert_markdown(MY_REPORT, &template, &config());
    assert_eq!(a.html, b.html);
}

#[test]
fn test_every_stock_template_has_all_placeholders() {
    for t in ReportType::ALL {
        let path: PathBuf = templates_dir().join(t.template_file());
        let html = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let missing = deepresearch_report2html::pipeline::template::missing_placeholders(&html);
        assert!(missing.is_empty(), "{}: missing {missing:?}", t.template_file());
        assert!(html.contains(r#"<html lang="en">"#));
    }
}

//! Post-processing: semantic rewrites of the rendered report HTML.
//!
//! The layout templates style the body through a handful of class names
//! (`section-title`, `subsection-title`, `data-table`, `citation`,
//! `executive-summary`). The Markdown renderer knows nothing about them, so
//! this module rewrites its plain output into the markup the templates expect.
//!
//! ## Rule Order
//!
//! Headings must become section-title divs before the executive-summary rule
//! runs, because that rule looks for the div markers rather than `<h2>`.
//! Decorative symbols are stripped last, after every structural rewrite. A
//! heading that starts with an emoji therefore does not count as the
//! executive summary.
//!
//! Citation styling works on the finished HTML, so `[N]` inside code blocks
//! and table cells is wrapped too.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Apply all post-processing rules to the rendered body HTML.
///
/// Rules (applied in order):
/// 1. `<h2>` → `<div class="section-title">`
/// 2. `<h3>` → `<div class="subsection-title">`
/// 3. `<table>` → `<table class="data-table">`
/// 4. `[N]` → `<span class="citation">[N]</span>`
/// 5. Wrap the first Executive Summary section in `<div class="executive-summary">`
/// 6. Strip emoji, pictographs, dingbats, joiners and variation selectors
pub fn post_process_html(html: &str) -> String {
    let s = section_titles(html);
    let s = subsection_titles(&s);
    let s = tag_tables(&s);
    let s = style_citations(&s);
    let s = wrap_executive_summary(&s);
    strip_decorative_symbols(&s)
}

// ── Rule 1: Section titles ───────────────────────────────────────────────────

static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h2>(.*?)</h2>").unwrap());

fn section_titles(input: &str) -> String {
    RE_H2
        .replace_all(input, r#"<div class="section-title">$1</div>"#)
        .into_owned()
}

// ── Rule 2: Subsection titles ────────────────────────────────────────────────

static RE_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h3>(.*?)</h3>").unwrap());

fn subsection_titles(input: &str) -> String {
    RE_H3
        .replace_all(input, r#"<div class="subsection-title">$1</div>"#)
        .into_owned()
}

// ── Rule 3: Data tables ──────────────────────────────────────────────────────

fn tag_tables(input: &str) -> String {
    input.replace("<table>", r#"<table class="data-table">"#)
}

// ── Rule 4: Citation markers ─────────────────────────────────────────────────

static RE_CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());

fn style_citations(input: &str) -> String {
    RE_CITATION
        .replace_all(input, r#"<span class="citation">[$1]</span>"#)
        .into_owned()
}

// ── Rule 5: Executive summary ────────────────────────────────────────────────
//
// Everything between the "Executive Summary" title and the next section title
// is wrapped. Only the first match is rewritten, and a summary that is the
// last section (no following title) stays unwrapped.

static RE_EXEC_SUMMARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)(<div class="section-title">(?:Executive Summary|执行摘要)</div>\s*)(.*?)(<div class="section-title">)"#,
    )
    .unwrap()
});

fn wrap_executive_summary(input: &str) -> String {
    RE_EXEC_SUMMARY
        .replacen(input, 1, |caps: &Captures<'_>| {
            format!(
                r#"{}<div class="executive-summary">{}</div>{}"#,
                &caps[1], &caps[2], &caps[3]
            )
        })
        .into_owned()
}

// ── Rule 6: Decorative symbols ───────────────────────────────────────────────
//
// Explicit code-point ranges only. None of them touches CJK Unified
// Ideographs (U+4E00–U+9FFF) or CJK punctuation, which Chinese reports
// depend on.

static RE_DECORATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}", // emoticons
        r"\x{1F300}-\x{1F5FF}", // symbols & pictographs
        r"\x{1F680}-\x{1F6FF}", // transport & map
        r"\x{1F1E0}-\x{1F1FF}", // regional indicators (flags)
        r"\x{1F900}-\x{1F9FF}", // supplemental symbols
        r"\x{1FA00}-\x{1FA6F}", // chess symbols
        r"\x{1FA70}-\x{1FAFF}", // symbols extended-A
        r"\x{2600}-\x{26FF}",   // misc symbols
        r"\x{2700}-\x{27BF}",   // dingbats
        r"\x{23E9}-\x{23F3}",   // media control
        r"\x{23F8}-\x{23FA}",   // media control
        r"\x{200D}",            // zero width joiner
        r"\x{FE0F}",            // variation selector-16
        "]+",
    ))
    .unwrap()
});

/// Remove emoji and other pictographic decoration, leaving CJK text intact.
pub fn strip_decorative_symbols(input: &str) -> String {
    RE_DECORATIVE.replace_all(input, "").into_owned()
}

// ── Tests ────────────────────────────────────────────────────────────────────

//! Markdown → HTML rendering of the report body.
//!
//! Uses pulldown-cmark with a deliberately small extension set: GFM tables.
//! Fenced code blocks and CommonMark list handling (a list is loose only when
//! its items are separated by blank lines) are part of the core grammar.
//! Footnotes, task lists, strikethrough and heading attributes stay off so
//! that the post-processor sees plain `<h2>`/`<h3>`/`<table>` tags.

use pulldown_cmark::{html, Options, Parser};
use tracing::debug;

fn render_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options
}

/// Render Markdown body text to an HTML fragment.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, render_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2 + 64);
    html::push_html(&mut out, parser);
    debug!("Rendered {} bytes of Markdown into {} bytes of HTML", markdown.len(), out.len());
    out
}

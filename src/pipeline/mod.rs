//! Pipeline stages for Markdown-report-to-HTML conversion.
//!
//! Each submodule implements one transformation step as a pure function of
//! its input.
//!
//! ## Data Flow
//!
//! ```text
//! detect ──▶ extract ──▶ render ──▶ postprocess ──┐
//!              │                                   │
//!              ├──▶ bibliography ──────────────────┼──▶ template
//!              └──▶ metrics (raw text) ────────────┘
//! ```
//!
//! 1. [`detect`]: research type from `<!-- TYPE: x -->`, template routing
//! 2. [`extract`]: title, date, source count, body, bibliography block
//! 3. [`render`]: body Markdown → HTML (tables, fenced code, lists)
//! 4. [`postprocess`]: template class names, citations, executive summary,
//!    emoji stripping
//! 5. [`bibliography`]: numbered `bib-entry` fragments with links
//! 6. [`metrics`]: Sources / Sections / Words / Mode / Confidence
//! 7. [`template`]: placeholder substitution

pub mod bibliography;
pub mod detect;
pub mod extract;
pub mod metrics;
pub mod postprocess;
pub mod render;
pub mod template;

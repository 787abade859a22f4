//! Error types for the deepresearch-report2html library.
//!
//! A conversion either produces a complete HTML document or fails before
//! anything is written. Only two conditions are fatal to the pipeline itself:
//!
//! * the source report cannot be read ([`ReportError::MissingInput`])
//! * the template routed from the detected research type cannot be read
//!   ([`ReportError::MissingTemplate`])
//!
//! Everything else the extractor meets (no title, no date, no bibliography,
//! malformed metadata) has a defined default and is never an error. The
//! remaining variants belong to the file layer and the config builder.

use crate::pipeline::detect::ReportType;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the deepresearch-report2html library.
#[derive(Debug, Error)]
pub enum ReportError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The Markdown report could not be located or read.
    #[error("Markdown report not found: '{path}'\nCheck the path exists and is readable.")]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The layout template for the detected research type could not be read.
    #[error("Template for research type '{research_type}' not found: '{path}'\nPass --templates-dir to point at the template directory.")]
    MissingTemplate {
        path: PathBuf,
        research_type: ReportType,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    /// True for the two conditions that stop a conversion before any stage runs.
    pub fn is_missing_resource(&self) -> bool {
        matches!(
            self,
            ReportError::MissingInput { .. } | ReportError::MissingTemplate { .. }
        )
    }
}

//! Configuration types for report conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The core stages take no configuration
//! of their own; the config only decides where templates live, what the
//! documented defaults are, and how the root language attribute is handled.

use crate::error::ReportError;
use crate::pipeline::extract::DEFAULT_TITLE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a Markdown-report-to-HTML conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use deepresearch_report2html::{ConversionConfig, LangPolicy};
///
/// let config = ConversionConfig::builder()
///     .templates_dir("skills/deep-research/templates")
///     .lang_policy(LangPolicy::DetectCjk)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Directory holding the layout templates. Default: `templates`.
    pub templates_dir: PathBuf,

    /// When to rewrite `<html lang="en">` to [`Self::locale_tag`]. Default: [`LangPolicy::Always`].
    pub lang_policy: LangPolicy,

    /// Language tag written by the rewrite. Default: `zh-CN`.
    pub locale_tag: String,

    /// Title used when the report has no `#` heading. Default: `Research Report`.
    pub default_title: String,

    /// Date used when the report has no `Generated:` field.
    /// If None, today's local date is used.
    pub fallback_date: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            lang_policy: LangPolicy::default(),
            locale_tag: "zh-CN".to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            fallback_date: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.templates_dir = dir.into();
        self
    }

    pub fn lang_policy(mut self, policy: LangPolicy) -> Self {
        self.config.lang_policy = policy;
        self
    }

    pub fn locale_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.locale_tag = tag.into();
        self
    }

    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.config.default_title = title.into();
        self
    }

    pub fn fallback_date(mut self, date: impl Into<String>) -> Self {
        self.config.fallback_date = Some(date.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ReportError> {
        let c = &self.config;
        if c.default_title.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "Default title must not be empty".into(),
            ));
        }
        if c.locale_tag.trim().is_empty() || c.locale_tag.contains('"') {
            return Err(ReportError::InvalidConfig(format!(
                "Locale tag must be a non-empty attribute value, got {:?}",
                c.locale_tag
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Policy for rewriting the template's `<html lang="en">` root.
///
/// The stock templates are authored in English but the reports are usually
/// Chinese, so the historical behaviour rewrites the root unconditionally.
///
/// | Policy | Rewrites when |
/// |--------|---------------|
/// | `Always` | every conversion (default) |
/// | `Never` | never |
/// | `DetectCjk` | the report contains at least one CJK ideograph |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LangPolicy {
    #[default]
    Always,
    Never,
    DetectCjk,
}

impl LangPolicy {
    /// Whether the root language attribute should be rewritten for `text`.
    pub fn applies_to(self, text: &str) -> bool {
        match self {
            LangPolicy::Always => true,
            LangPolicy::Never => false,
            LangPolicy::DetectCjk => text.chars().any(is_cjk_ideograph),
        }
    }
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // Extension A
        | '\u{F900}'..='\u{FAFF}'   // Compatibility Ideographs
        | '\u{20000}'..='\u{2A6DF}' // Extension B
    )
}

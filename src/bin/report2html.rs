//! CLI binary for deepresearch-report2html.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig`, writes the HTML and prints a summary.

use anyhow::{Context, Result};
use clap::Parser;
use deepresearch_report2html::{convert_to_file, ConversionConfig, ConversionOutput, LangPolicy};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert next to the source (report.md → report.html)
  report2html report.md

  # Explicit output file, then open it
  report2html report.md -o out/report.html --open

  # Templates from another directory
  report2html --templates-dir skills/deep-research/templates report.md

  # Keep <html lang="en"> unless the report contains Chinese
  report2html --lang-policy detect-cjk report.md

TEMPLATE ROUTING (<!-- TYPE: x --> in the report):
  technical            technical_report_template.html
  comparison           comparison_report_template.html
  stock, market        mckinsey_report_template.html
  general, exploratory general_report_template.html   (also the default)

ENVIRONMENT VARIABLES:
  REPORT2HTML_TEMPLATES   Template directory
  REPORT2HTML_LANG        Language policy (always, never, detect-cjk)
  RUST_LOG                Log filter, overrides --verbose / --quiet
"#;

/// Convert Deep Research Markdown reports to styled HTML.
#[derive(Parser, Debug)]
#[command(
    name = "report2html",
    version,
    about = "Convert Deep Research Markdown reports to styled HTML",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the Markdown report file.
    markdown_file: PathBuf,

    /// Output HTML file path (default: same name with .html).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the HTML file in the default viewer after conversion.
    #[arg(long)]
    open: bool,

    /// Directory containing the layout templates.
    #[arg(long, env = "REPORT2HTML_TEMPLATES", default_value = "templates")]
    templates_dir: PathBuf,

    /// When to rewrite <html lang="en"> to the CJK locale tag.
    #[arg(long, env = "REPORT2HTML_LANG", value_enum, default_value = "always")]
    lang_policy: LangArg,

    /// Locale tag written by the language rewrite.
    #[arg(long, default_value = "zh-CN")]
    locale: String,

    /// Print the conversion summary as JSON (without the HTML body) on stdout.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum LangArg {
    Always,
    Never,
    DetectCjk,
}

impl From<LangArg> for LangPolicy {
    fn from(v: LangArg) -> Self {
        match v {
            LangArg::Always => LangPolicy::Always,
            LangArg::Never => LangPolicy::Never,
            LangArg::DetectCjk => LangPolicy::DetectCjk,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = ConversionConfig::builder()
        .templates_dir(&cli.templates_dir)
        .lang_policy(cli.lang_policy.clone().into())
        .locale_tag(&cli.locale)
        .build()
        .context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let (output_path, output) = convert_to_file(&cli.markdown_file, cli.output.as_deref(), &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let mut summary = serde_json::to_value(&output).context("Failed to serialise output")?;
        if let Some(obj) = summary.as_object_mut() {
            obj.remove("html");
            obj.insert(
                "output_path".into(),
                serde_json::Value::String(output_path.display().to_string()),
            );
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise output")?
        );
    } else if !cli.quiet {
        print_summary(&output, &output_path);
    }

    if cli.open && open_in_viewer(&output_path) && !cli.quiet && !cli.json {
        eprintln!("Opened in browser.");
    }

    Ok(())
}

fn print_summary(output: &ConversionOutput, path: &Path) {
    eprintln!("Research type: {}", bold(output.research_type.as_str()));
    eprintln!("Template:      {}", dim(&output.template_file));
    eprintln!("Title:         {}", output.title);
    eprintln!("Date:          {}", output.date);
    eprintln!("Sources:       {}", output.source_count);
    eprintln!(
        "{} {}  {}",
        green("✔"),
        bold(&path.display().to_string()),
        dim(&format!("{} bytes", output.stats.output_bytes)),
    );
}

/// Launch the platform's default viewer. Failures are reported, not fatal.
fn open_in_viewer(path: &Path) -> bool {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    match cmd.arg(path).status() {
        Ok(status) if status.success() => true,
        Ok(status) => {
            tracing::warn!("Viewer exited with {} for {}", status, path.display());
            false
        }
        Err(e) => {
            tracing::warn!("Could not open {}: {}", path.display(), e);
            false
        }
    }
}

//! Render command implementation.
//!
//! The render command:
//! 1. Loads the report document
//! 2. Builds the package hierarchy
//! 3. Calculates the report summary
//! 4. Renders and writes the HTML report
//! 5. Optionally prints a text summary to stdout

use crate::aggregator::calculate_summary;
use crate::output::{render_html, render_summary_text, render_tree_text, write_html};
use crate::session::ReportSession;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the render command
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Path to the input report JSON
    pub input: PathBuf,

    /// Output path for the HTML report
    pub output: PathBuf,

    /// Report title (defaults to the input file name)
    pub title: Option<String>,

    /// Print text summary and tree to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("report.json"),
            output: PathBuf::from("report.html"),
            title: None,
            print_summary: false,
        }
    }
}

/// Execute the render command
///
/// # Errors
/// * Unreadable or malformed input document
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Rendering report: {}", args.input.display());

    // Step 1+2: Load the document and build the hierarchy
    info!("Step 1/4: Loading report document...");
    let mut session = ReportSession::new();
    session
        .load_file(&args.input)
        .context("Failed to load report document")?;

    let loaded = session
        .loaded()
        .context("Session has no document after load")?;

    debug!(
        "Loaded {} packages, {} tree nodes, {} structural warnings",
        loaded.document().packages.len(),
        loaded.tree().len(),
        loaded.tree().warnings().len()
    );

    // Step 3: Calculate report summary
    info!("Step 2/4: Calculating summary...");
    let summary = calculate_summary(loaded.document());
    info!("Summary: {}", summary.summary());

    // Step 4: Render and write the HTML report
    info!("Step 3/4: Rendering HTML report...");
    let title = args.title.clone().unwrap_or_else(|| default_title(&args));
    let html = render_html(loaded, &summary, &title);

    info!("Step 4/4: Writing output file...");
    write_html(&html, &args.output).context("Failed to write HTML report")?;

    info!("✓ Report written to: {}", args.output.display());

    // Print text summary (if requested)
    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("REPORT SUMMARY");
        println!("{}", "=".repeat(80));
        print!("{}", render_summary_text(&summary, loaded.tree().warnings()));
        println!();
        print!("{}", render_tree_text(loaded.tree()));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn default_title(args: &RenderArgs) -> String {
    args.input
        .file_stem()
        .map(|stem| format!("SCA Report - {}", stem.to_string_lossy()))
        .unwrap_or_else(|| "SCA Report".to_string())
}

/// Validate render arguments
///
/// Can be called before `execute_render` for early validation.
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(ext) = args.input.extension() {
        if ext != "json" {
            log::warn!(
                "Input file does not have a .json extension: {}",
                args.input.display()
            );
        }
    }

    if let Some(title) = &args.title {
        if title.trim().is_empty() {
            anyhow::bail!("Title cannot be blank");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_valid() {
        let args = RenderArgs {
            input: PathBuf::from("report.json"),
            output: PathBuf::from("report.html"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = RenderArgs {
            input: PathBuf::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_output() {
        let args = RenderArgs {
            output: PathBuf::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_blank_title() {
        let args = RenderArgs {
            title: Some("   ".to_string()),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_default_title_uses_file_stem() {
        let args = RenderArgs {
            input: PathBuf::from("out/metrics.json"),
            ..Default::default()
        };

        assert_eq!(default_title(&args), "SCA Report - metrics");
    }
}

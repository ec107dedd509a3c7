//! SCA Report Studio CLI
//!
//! Renders precomputed static-code-analysis report documents as a browsable
//! tree-and-table view: an interactive HTML report, or plain text in the
//! terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use sca_report_studio::aggregator::calculate_summary;
use sca_report_studio::commands::{execute_render, validate_args, RenderArgs};
use sca_report_studio::output::{render_summary_text, render_tables_text, render_tree_text};
use sca_report_studio::session::ReportSession;
use sca_report_studio::utils::config::ROOT_PACKAGE_NAME;

/// SCA Report Studio - browsable views over static-code-analysis reports
#[derive(Parser, Debug)]
#[command(name = "sca-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a report document as a self-contained HTML report
    Render {
        /// Path to the report JSON document
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the HTML report
        #[arg(short, long, default_value = "report.html")]
        output: PathBuf,

        /// Report title
        #[arg(long)]
        title: Option<String>,

        /// Print text summary and tree to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Print the package hierarchy to stdout
    Tree {
        /// Path to the report JSON document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the metric tables for one package
    Table {
        /// Path to the report JSON document
        #[arg(short, long)]
        input: PathBuf,

        /// Package identifier to display
        #[arg(short, long)]
        package: String,
    },

    /// Validate a report JSON document
    Validate {
        /// Path to the report JSON document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display input schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output,
            title,
            summary,
        } => {
            let args = RenderArgs {
                input,
                output,
                title,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute render
            execute_render(args)?;
        }

        Commands::Tree { input } => {
            print_tree(input)?;
        }

        Commands::Table { input, package } => {
            print_table(input, &package)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Print the package hierarchy for a report document
fn print_tree(input: PathBuf) -> Result<()> {
    let mut session = ReportSession::new();
    session
        .load_file(&input)
        .context("Failed to load report document")?;

    let tree = session.tree().context("Session has no tree after load")?;
    print!("{}", render_tree_text(tree));

    for warning in tree.warnings() {
        eprintln!("warning: {warning}");
    }

    Ok(())
}

/// Print the metric tables for a selected package
fn print_table(input: PathBuf, package: &str) -> Result<()> {
    if package.is_empty() {
        anyhow::bail!("Package identifier cannot be empty");
    }

    let mut session = ReportSession::new();
    session
        .load_file(&input)
        .context("Failed to load report document")?;

    match session.select(package) {
        Some(tables) => print!("{}", render_tables_text(package, &tables)),
        None => println!("{ROOT_PACKAGE_NAME} is the tree root; select a package instead"),
    }

    Ok(())
}

/// Validate a report JSON document
fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let mut session = ReportSession::new();
    session
        .load_file(&file_path)
        .context("Report failed validation")?;

    let loaded = session.loaded().context("Session has no document")?;
    let summary = calculate_summary(loaded.document());

    println!("✓ Valid report JSON");
    print!(
        "  {}",
        render_summary_text(&summary, loaded.tree().warnings())
    );
    println!("  Tree nodes: {}", loaded.tree().len());

    Ok(())
}

/// Display input schema information
fn display_schema(show_details: bool) {
    println!("SCA Report Studio Input Schema");
    println!();

    if show_details {
        println!("Document Structure:");
        println!("  pkg: array                 - Analyzed packages");
        println!("    ssca_PkgName: string     - Slash-delimited identifier");
        println!("    ssca_sFile: array        - Source files");
        println!("      ssca_FileName: string? - File name");
        println!("      ssca_funct: array      - Function metrics");
        println!("        ssca_FunctionName: string - Function name");
        println!("        ssca_cyc: number     - Cyclomatic complexity");
        println!("        ssca_cmp: number     - Time-complexity class");
        println!("        ssca_mn: number      - Maximum nesting");
        println!("        ssca_nl: number      - Number of lines");
        println!("        ssca_ps: number      - Parameter count");
        println!("    ssca_hFile: array        - Header files");
        println!("      ssca_cls: array        - Classes");
        println!("        ssca_ClassName: string? - Class name");
        println!("        ssca_i: string?      - Unique class id");
        println!("        ssca_w: number?      - Class width");
        println!("        ssca_d: number?      - Inheritance depth");
        println!("        ssca_method: array   - Method metrics");
        println!("          ssca_i: string     - Unique method id");
        println!("          ssca_MethodName: string - Method name");
        println!("          (plus the five metric fields above)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
fn display_version() {
    println!("SCA Report Studio v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Browsable tree-and-table rendering for static-code-analysis reports.");
}

//! SCA Report Studio
//!
//! Browsable tree-and-table rendering for static-code-analysis report
//! documents.
//!
//! This crate provides the core implementation for the `sca-report` CLI
//! tool: it reconstructs the package hierarchy from a report's flat package
//! list, aggregates per-package metric tables, and renders them as a
//! self-contained HTML report or plain text.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install sca-report-studio
//! sca-report --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod session;
pub mod utils;

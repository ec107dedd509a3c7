//! Output writers for the report view.
//!
//! This module handles rendering computed data to its display forms:
//! - Self-contained HTML report (tree + tables)
//! - Plain-text tree, tables and summary for the terminal

pub mod html;
pub mod text;

// Re-export main functions
pub use html::{render_html, write_html};
pub use text::{render_summary_text, render_tables_text, render_tree_text};

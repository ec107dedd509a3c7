//! Hierarchy reconstruction and metric aggregation.
//!
//! This module transforms the loaded report document into:
//! - The rooted package hierarchy (with synthesized ancestors)
//! - Display-ready, deduplicated metric rows per package
//! - Report-wide summary statistics

pub mod hierarchy;
pub mod metrics;

// Re-export main types and functions
pub use hierarchy::{build_package_tree, NodeId, PackageNode, PackageTree, StructuralWarning};
pub use metrics::{
    aggregate_package, calculate_summary, class_rows, function_rows, method_rows, ClassRow,
    MetricRow, PackageTables, ReportSummary,
};

//! Report parsing and schema definitions.
//!
//! This module handles:
//! - The serde model of the analyzer's JSON document
//! - Lenient loading of report files
//! - Identifier normalization

pub mod report;
pub mod schema;

// Re-export main types
pub use report::{load_report, parse_report};
pub use schema::{
    ClassRecord, FunctionMetric, HeaderFile, MethodMetric, PackageRecord, ReportDocument,
    SourceFile,
};

//! Input report document schema.
//!
//! This module defines the structure of the JSON documents the analyzer
//! emits. Field names follow the analyzer's `ssca_` attribute vocabulary;
//! the Rust-side names are the readable ones.

use serde::{Deserialize, Serialize};

/// Top-level report document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Flat list of analyzed packages
    #[serde(rename = "pkg", default)]
    pub packages: Vec<PackageRecord>,
}

/// One analyzed package
///
/// The identifier is a slash-delimited path. The document is not required to
/// contain a record for every intermediate ancestor path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Slash-delimited package identifier, unique within the document
    #[serde(rename = "ssca_PkgName")]
    pub name: String,

    /// Source files belonging to this package
    #[serde(rename = "ssca_sFile", default)]
    pub source_files: Vec<SourceFile>,

    /// Header files belonging to this package
    #[serde(rename = "ssca_hFile", default)]
    pub header_files: Vec<HeaderFile>,
}

/// A source file with its free functions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFile {
    /// File name (not emitted by all analyzer versions)
    #[serde(rename = "ssca_FileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Function metric records, in analysis order
    #[serde(rename = "ssca_funct", default)]
    pub functions: Vec<FunctionMetric>,
}

/// A header file with its class declarations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderFile {
    /// File name (not emitted by all analyzer versions)
    #[serde(rename = "ssca_FileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Class records, in analysis order
    #[serde(rename = "ssca_cls", default)]
    pub classes: Vec<ClassRecord>,
}

/// A class declaration and its methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Class name
    #[serde(rename = "ssca_ClassName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Unique class identity assigned by the analyzer
    #[serde(rename = "ssca_i", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Class width (member count)
    #[serde(rename = "ssca_w", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    /// Inheritance depth
    #[serde(rename = "ssca_d", default, skip_serializing_if = "Option::is_none")]
    pub inheritance_depth: Option<u64>,

    /// Method metric records, in analysis order
    #[serde(rename = "ssca_method", default)]
    pub methods: Vec<MethodMetric>,
}

/// Per-function metrics, precomputed by the analyzer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionMetric {
    /// Function name
    #[serde(rename = "ssca_FunctionName")]
    pub name: String,

    /// Cyclomatic complexity
    #[serde(rename = "ssca_cyc", default)]
    pub cyclomatic: u64,

    /// Time-complexity class (the k in O(n^k))
    #[serde(rename = "ssca_cmp", default)]
    pub time_complexity: u64,

    /// Maximum nesting depth
    #[serde(rename = "ssca_mn", default)]
    pub max_nesting: u64,

    /// Number of lines
    #[serde(rename = "ssca_nl", default)]
    pub num_lines: u64,

    /// Parameter count
    #[serde(rename = "ssca_ps", default)]
    pub param_size: u64,
}

/// Per-method metrics, precomputed by the analyzer
///
/// Unlike functions, methods carry a unique identity: method names collide
/// across classes, so `id` is the deduplication key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodMetric {
    /// Unique method identity assigned by the analyzer
    #[serde(rename = "ssca_i")]
    pub id: String,

    /// Method name
    #[serde(rename = "ssca_MethodName")]
    pub name: String,

    /// Cyclomatic complexity
    #[serde(rename = "ssca_cyc", default)]
    pub cyclomatic: u64,

    /// Time-complexity class (the k in O(n^k))
    #[serde(rename = "ssca_cmp", default)]
    pub time_complexity: u64,

    /// Maximum nesting depth
    #[serde(rename = "ssca_mn", default)]
    pub max_nesting: u64,

    /// Number of lines
    #[serde(rename = "ssca_nl", default)]
    pub num_lines: u64,

    /// Parameter count
    #[serde(rename = "ssca_ps", default)]
    pub param_size: u64,
}

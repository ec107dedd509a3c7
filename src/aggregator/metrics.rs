//! Aggregate per-package metric records into display-ready rows.
//!
//! Aggregation is a pure read of the loaded document: rows are copied
//! verbatim from the metric records, never computed, and repeated calls for
//! the same package are side-effect free.

use crate::parser::schema::{PackageRecord, ReportDocument};
use crate::utils::config::ANONYMOUS_CLASS_NAME;
use log::debug;
use std::collections::HashSet;

/// One row of the function or method table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    /// Display name
    pub name: String,

    /// Cyclomatic complexity
    pub cyclomatic: u64,

    /// Time-complexity class
    pub time_complexity: u64,

    /// Maximum nesting depth
    pub max_nesting: u64,

    /// Number of lines
    pub num_lines: u64,

    /// Parameter count
    pub param_size: u64,
}

/// One row of the class table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRow {
    /// Class name, or a placeholder when the analyzer recorded none
    pub name: String,

    /// Class width (member count), when recorded
    pub width: Option<u64>,

    /// Inheritance depth, when recorded
    pub inheritance_depth: Option<u64>,

    /// Number of method records in the class
    pub method_count: usize,
}

/// The display tables for one selected package
#[derive(Debug, Clone, Default)]
pub struct PackageTables {
    /// Function-level rows, from source files
    pub function_rows: Vec<MetricRow>,

    /// Method-level rows, from header files' classes
    pub method_rows: Vec<MetricRow>,

    /// Class-level rows, from header files
    pub class_rows: Vec<ClassRow>,
}

impl PackageTables {
    /// True when every table is empty
    pub fn is_empty(&self) -> bool {
        self.function_rows.is_empty() && self.method_rows.is_empty() && self.class_rows.is_empty()
    }
}

/// Aggregate all display tables for one package
pub fn aggregate_package(pkg: &PackageRecord) -> PackageTables {
    let tables = PackageTables {
        function_rows: function_rows(pkg),
        method_rows: method_rows(pkg),
        class_rows: class_rows(pkg),
    };
    debug!(
        "Aggregated {:?}: {} function rows, {} method rows, {} class rows",
        pkg.name,
        tables.function_rows.len(),
        tables.method_rows.len(),
        tables.class_rows.len()
    );
    tables
}

/// Function rows across the package's source files, in document order
///
/// Functions are deduplicated by name: the first occurrence wins and later
/// duplicates are skipped, even across files.
pub fn function_rows(pkg: &PackageRecord) -> Vec<MetricRow> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();

    for file in &pkg.source_files {
        for function in &file.functions {
            if !seen.insert(function.name.as_str()) {
                continue;
            }
            rows.push(MetricRow {
                name: function.name.clone(),
                cyclomatic: function.cyclomatic,
                time_complexity: function.time_complexity,
                max_nesting: function.max_nesting,
                num_lines: function.num_lines,
                param_size: function.param_size,
            });
        }
    }

    rows
}

/// Method rows across the package's header files, in document order
///
/// Methods are deduplicated by their unique id, not by name: method names
/// collide across classes.
pub fn method_rows(pkg: &PackageRecord) -> Vec<MetricRow> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();

    for file in &pkg.header_files {
        for class in &file.classes {
            for method in &class.methods {
                if !seen.insert(method.id.as_str()) {
                    continue;
                }
                rows.push(MetricRow {
                    name: method.name.clone(),
                    cyclomatic: method.cyclomatic,
                    time_complexity: method.time_complexity,
                    max_nesting: method.max_nesting,
                    num_lines: method.num_lines,
                    param_size: method.param_size,
                });
            }
        }
    }

    rows
}

/// Class rows across the package's header files, in document order
///
/// Classes carrying an id are deduplicated by it; classes without one are
/// kept as-is since there is nothing reliable to key on.
pub fn class_rows(pkg: &PackageRecord) -> Vec<ClassRow> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();

    for file in &pkg.header_files {
        for class in &file.classes {
            if let Some(id) = class.id.as_deref() {
                if !seen.insert(id) {
                    continue;
                }
            }
            rows.push(ClassRow {
                name: class
                    .name
                    .clone()
                    .unwrap_or_else(|| ANONYMOUS_CLASS_NAME.to_string()),
                width: class.width,
                inheritance_depth: class.inheritance_depth,
                method_count: class.methods.len(),
            });
        }
    }

    rows
}

/// Report-wide totals and maxima
///
/// Counts are taken before deduplication: they describe the document, not
/// the rendered tables.
#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    /// Number of package records
    pub package_count: usize,

    /// Number of function records
    pub function_count: usize,

    /// Number of method records
    pub method_count: usize,

    /// Number of class records
    pub class_count: usize,

    /// Highest cyclomatic complexity in the document
    pub max_cyclomatic: u64,

    /// Name of the function or method carrying `max_cyclomatic`
    pub max_cyclomatic_name: Option<String>,
}

impl ReportSummary {
    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        let peak = match &self.max_cyclomatic_name {
            Some(name) => format!("{} ({})", self.max_cyclomatic, name),
            None => "-".to_string(),
        };
        format!(
            "Packages: {} | Functions: {} | Methods: {} | Classes: {} | Peak cyclomatic: {}",
            self.package_count, self.function_count, self.method_count, self.class_count, peak
        )
    }
}

/// Calculate report-wide summary statistics
pub fn calculate_summary(document: &ReportDocument) -> ReportSummary {
    let mut summary = ReportSummary {
        package_count: document.packages.len(),
        ..Default::default()
    };

    for pkg in &document.packages {
        for file in &pkg.source_files {
            for function in &file.functions {
                summary.function_count += 1;
                if function.cyclomatic > summary.max_cyclomatic {
                    summary.max_cyclomatic = function.cyclomatic;
                    summary.max_cyclomatic_name = Some(function.name.clone());
                }
            }
        }
        for file in &pkg.header_files {
            for class in &file.classes {
                summary.class_count += 1;
                for method in &class.methods {
                    summary.method_count += 1;
                    if method.cyclomatic > summary.max_cyclomatic {
                        summary.max_cyclomatic = method.cyclomatic;
                        summary.max_cyclomatic_name = Some(method.name.clone());
                    }
                }
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{
        ClassRecord, FunctionMetric, HeaderFile, MethodMetric, SourceFile,
    };

    fn function(name: &str, cyclomatic: u64) -> FunctionMetric {
        FunctionMetric {
            name: name.to_string(),
            cyclomatic,
            time_complexity: 1,
            max_nesting: 2,
            num_lines: 10,
            param_size: 1,
        }
    }

    fn method(id: &str, name: &str, cyclomatic: u64) -> MethodMetric {
        MethodMetric {
            id: id.to_string(),
            name: name.to_string(),
            cyclomatic,
            time_complexity: 1,
            max_nesting: 1,
            num_lines: 5,
            param_size: 0,
        }
    }

    #[test]
    fn test_function_rows_dedup_by_name_across_files() {
        let pkg = PackageRecord {
            name: "core".to_string(),
            source_files: vec![
                SourceFile {
                    file_name: None,
                    functions: vec![function("helper", 3), function("main", 7)],
                },
                SourceFile {
                    file_name: None,
                    functions: vec![function("helper", 9)],
                },
            ],
            header_files: vec![],
        };

        let rows = function_rows(&pkg);
        assert_eq!(rows.len(), 2);
        // First-encountered record's values survive
        assert_eq!(rows[0].name, "helper");
        assert_eq!(rows[0].cyclomatic, 3);
        assert_eq!(rows[1].name, "main");
    }

    #[test]
    fn test_method_rows_dedup_by_id_not_name() {
        let pkg = PackageRecord {
            name: "core".to_string(),
            source_files: vec![],
            header_files: vec![HeaderFile {
                file_name: None,
                classes: vec![
                    ClassRecord {
                        methods: vec![method("m1", "get", 1), method("m1", "get", 4)],
                        ..Default::default()
                    },
                    ClassRecord {
                        methods: vec![method("m2", "get", 2)],
                        ..Default::default()
                    },
                ],
            }],
        };

        let rows = method_rows(&pkg);
        // Same name, different ids: both kept. Same id: skipped.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cyclomatic, 1);
        assert_eq!(rows[1].cyclomatic, 2);
    }

    #[test]
    fn test_class_rows_dedup_and_placeholder() {
        let pkg = PackageRecord {
            name: "core".to_string(),
            source_files: vec![],
            header_files: vec![HeaderFile {
                file_name: None,
                classes: vec![
                    ClassRecord {
                        name: Some("Socket".to_string()),
                        id: Some("c1".to_string()),
                        width: Some(4),
                        inheritance_depth: Some(1),
                        methods: vec![method("m1", "open", 1)],
                    },
                    ClassRecord {
                        name: Some("Socket".to_string()),
                        id: Some("c1".to_string()),
                        ..Default::default()
                    },
                    ClassRecord::default(),
                ],
            }],
        };

        let rows = class_rows(&pkg);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Socket");
        assert_eq!(rows[0].method_count, 1);
        assert_eq!(rows[1].name, ANONYMOUS_CLASS_NAME);
    }

    #[test]
    fn test_empty_package_yields_empty_tables() {
        let pkg = PackageRecord {
            name: "core".to_string(),
            ..Default::default()
        };
        assert!(aggregate_package(&pkg).is_empty());
    }

    #[test]
    fn test_summary_counts_and_peak() {
        let document = ReportDocument {
            packages: vec![PackageRecord {
                name: "core".to_string(),
                source_files: vec![SourceFile {
                    file_name: None,
                    functions: vec![function("a", 3), function("b", 21)],
                }],
                header_files: vec![HeaderFile {
                    file_name: None,
                    classes: vec![ClassRecord {
                        methods: vec![method("m1", "tiny", 1)],
                        ..Default::default()
                    }],
                }],
            }],
        };

        let summary = calculate_summary(&document);
        assert_eq!(summary.package_count, 1);
        assert_eq!(summary.function_count, 2);
        assert_eq!(summary.method_count, 1);
        assert_eq!(summary.class_count, 1);
        assert_eq!(summary.max_cyclomatic, 21);
        assert_eq!(summary.max_cyclomatic_name.as_deref(), Some("b"));
        assert!(summary.summary().contains("Peak cyclomatic: 21 (b)"));
    }
}

//! Plain-text rendering for the terminal.
//!
//! Tree, tables and summary render as strings; printing is left to the
//! caller.

use crate::aggregator::{
    MetricRow, NodeId, PackageTables, PackageTree, ReportSummary, StructuralWarning,
};
use crate::utils::config::{CLASS_COLUMNS, METRIC_COLUMNS};

/// Render the package hierarchy with box-drawing indentation
pub fn render_tree_text(tree: &PackageTree) -> String {
    let mut out = String::new();
    out.push_str(&tree.root().name);
    out.push('\n');
    render_subtree(tree, PackageTree::ROOT, "", &mut out);
    out
}

fn render_subtree(tree: &PackageTree, id: NodeId, prefix: &str, out: &mut String) {
    let children = &tree.node(id).children;
    for (pos, &child) in children.iter().enumerate() {
        let last = pos + 1 == children.len();
        let node = tree.node(child);

        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&node.name);
        if node.is_synthesized() && child != PackageTree::ROOT {
            out.push_str(" (no record)");
        }
        out.push('\n');

        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_subtree(tree, child, &child_prefix, out);
    }
}

/// Render the display tables for one selected package
pub fn render_tables_text(identifier: &str, tables: &PackageTables) -> String {
    let mut out = format!("Package: {identifier}\n");

    if tables.is_empty() {
        out.push_str("  (no metric records)\n");
        return out;
    }

    if !tables.function_rows.is_empty() {
        out.push_str("\nFunctions\n");
        out.push_str(&render_metric_rows(&tables.function_rows));
    }
    if !tables.method_rows.is_empty() {
        out.push_str("\nMethods\n");
        out.push_str(&render_metric_rows(&tables.method_rows));
    }
    if !tables.class_rows.is_empty() {
        out.push_str("\nClasses\n");
        let rows: Vec<Vec<String>> = tables
            .class_rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    optional(row.width),
                    optional(row.inheritance_depth),
                    row.method_count.to_string(),
                ]
            })
            .collect();
        out.push_str(&render_table(CLASS_COLUMNS, &rows));
    }

    out
}

fn render_metric_rows(rows: &[MetricRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.name.clone(),
                row.cyclomatic.to_string(),
                row.time_complexity.to_string(),
                row.max_nesting.to_string(),
                row.num_lines.to_string(),
                row.param_size.to_string(),
            ]
        })
        .collect();
    render_table(METRIC_COLUMNS, &cells)
}

/// Render an aligned column table
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if cell.len() > widths[idx] {
                widths[idx] = cell.len();
            }
        }
    }

    let mut out = String::new();
    render_row(&mut out, headers.iter().map(|h| *h), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        render_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn render_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:<width$}", cell, width = widths[idx]));
    }
    // Trailing spaces from the last column are harmless but ugly
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

fn optional(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Render the report summary and structural warnings block
pub fn render_summary_text(summary: &ReportSummary, warnings: &[StructuralWarning]) -> String {
    let mut out = summary.summary();
    out.push('\n');
    if !warnings.is_empty() {
        out.push_str(&format!("Structural warnings: {}\n", warnings.len()));
        for warning in warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_package_tree;
    use crate::parser::schema::PackageRecord;
    use pretty_assertions::assert_eq;

    fn record(name: &str) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_tree_indentation() {
        let tree = build_package_tree(&[record("a"), record("a/b"), record("x")]);
        let text = render_tree_text(&tree);

        assert_eq!(
            text,
            "ROOT\n\
             ├── a\n\
             │   └── a/b\n\
             └── x\n"
        );
    }

    #[test]
    fn test_render_tree_marks_synthesized() {
        let tree = build_package_tree(&[record("a/b")]);
        let text = render_tree_text(&tree);

        assert!(text.contains("a (no record)"));
        assert!(!text.contains("a/b (no record)"));
    }

    #[test]
    fn test_render_empty_tables() {
        let text = render_tables_text("core", &PackageTables::default());
        assert!(text.contains("(no metric records)"));
    }

    #[test]
    fn test_render_metric_table_alignment() {
        let rows = vec![
            MetricRow {
                name: "a_rather_long_function_name".to_string(),
                cyclomatic: 1,
                time_complexity: 2,
                max_nesting: 3,
                num_lines: 4,
                param_size: 5,
            },
            MetricRow {
                name: "b".to_string(),
                cyclomatic: 10,
                time_complexity: 20,
                max_nesting: 30,
                num_lines: 40,
                param_size: 50,
            },
        ];
        let tables = PackageTables {
            function_rows: rows,
            ..Default::default()
        };

        let text = render_tables_text("core", &tables);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Package: core");
        assert_eq!(lines[2], "Functions");
        // Header and rows start with the name column padded to equal width
        let name_col = "a_rather_long_function_name".len();
        assert!(lines[3].starts_with(&format!("{:<width$}", "Name", width = name_col)));
        assert!(lines[5].starts_with("a_rather_long_function_name"));
        assert!(lines[6].starts_with(&format!("{:<width$}", "b", width = name_col)));
    }

    #[test]
    fn test_render_summary_with_warnings() {
        let summary = ReportSummary {
            package_count: 2,
            ..Default::default()
        };
        let warnings = vec![StructuralWarning::DuplicateIdentifier {
            identifier: "a".to_string(),
        }];

        let text = render_summary_text(&summary, &warnings);
        assert!(text.contains("Packages: 2"));
        assert!(text.contains("Structural warnings: 1"));
        assert!(text.contains("duplicate package identifier"));
    }
}

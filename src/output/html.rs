//! Self-contained HTML report writer.
//!
//! Generates a single HTML file with embedded CSS and a small table-sort
//! script. The package hierarchy renders as nested `<details>` elements;
//! each record-backed package gets a section with its function, method and
//! class tables. Works offline, no external assets.

use crate::aggregator::{
    aggregate_package, ClassRow, MetricRow, NodeId, PackageTree, ReportSummary,
};
use crate::session::LoadedReport;
use crate::utils::config::{
    CLASS_COLUMNS, CYCLOMATIC_COMPLEXITY_LIMIT, CYCLOMATIC_TOOLTIP, MAX_NESTING_TOOLTIP,
    NAME_TOOLTIP, NUM_LINES_TOOLTIP, PARAM_SIZE_TOOLTIP, TIME_COMPLEXITY_LIMIT,
    TIME_COMPLEXITY_TOOLTIP,
};
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the full HTML report
///
/// Pure string assembly from already-computed data; file I/O lives in
/// [`write_html`].
pub fn render_html(loaded: &LoadedReport, summary: &ReportSummary, title: &str) -> String {
    let tree = loaded.tree();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<div class="container">
<h1>{title}</h1>
<p class="summary">{summary}</p>
<div class="layout">
<nav class="tree">{tree_nav}</nav>
<main class="packages">{sections}</main>
</div>
<footer>Generated at {generated_at}</footer>
</div>
<script>{js}</script>
</body>
</html>"#,
        title = escape(title),
        css = inline_css(),
        summary = escape(&summary.summary()),
        tree_nav = render_tree_node(loaded, PackageTree::ROOT),
        sections = render_package_sections(loaded),
        generated_at = Utc::now().to_rfc3339(),
        js = inline_javascript(),
    )
}

/// One tree node as a nested `<details>` element
fn render_tree_node(loaded: &LoadedReport, id: NodeId) -> String {
    let tree = loaded.tree();
    let node = tree.node(id);

    let label = match node.record {
        Some(idx) => format!(
            r##"<a href="#pkg-{idx}">{}</a>"##,
            escape(&node.name)
        ),
        None => escape(&node.name),
    };

    if node.children.is_empty() {
        return format!(r#"<div class="leaf">{label}</div>"#);
    }

    let children: String = node
        .children
        .iter()
        .map(|&child| render_tree_node(loaded, child))
        .collect();

    format!(r#"<details open><summary>{label}</summary>{children}</details>"#)
}

/// Sections for every record-backed package, in tree order
///
/// Duplicate identifiers share a record; the section is emitted once.
fn render_package_sections(loaded: &LoadedReport) -> String {
    let tree = loaded.tree();
    let mut emitted: HashSet<usize> = HashSet::new();
    let mut out = String::new();

    for id in tree.iter_depth_first() {
        let Some(idx) = tree.node(id).record else {
            continue;
        };
        if !emitted.insert(idx) {
            continue;
        }
        let record = &loaded.document().packages[idx];
        let tables = aggregate_package(record);

        out.push_str(&format!(
            r#"<section id="pkg-{idx}"><h3>{}</h3>"#,
            escape(&tree.node(id).name)
        ));
        out.push_str(&render_metric_table("Functions", &tables.function_rows));
        out.push_str(&render_metric_table("Methods", &tables.method_rows));
        out.push_str(&render_class_table(&tables.class_rows));
        out.push_str("</section>");
    }

    out
}

/// A sortable function/method metric table
fn render_metric_table(caption: &str, rows: &[MetricRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut out = format!(
        r#"<table class="metrics"><caption>{caption}</caption><thead><tr>"#
    );
    for (label, tooltip) in [
        ("Name", NAME_TOOLTIP),
        ("Cyclomatic Cmplx", CYCLOMATIC_TOOLTIP),
        ("Time Cmplx", TIME_COMPLEXITY_TOOLTIP),
        ("Maximum nesting", MAX_NESTING_TOOLTIP),
        ("Num lines", NUM_LINES_TOOLTIP),
        ("Parameter size", PARAM_SIZE_TOOLTIP),
    ] {
        out.push_str(&format!(
            r#"<th>{label} <span class="question" title="{}">?</span></th>"#,
            escape(tooltip)
        ));
    }
    out.push_str("</tr></thead><tbody>");

    for row in rows {
        let cyc_class = flag(row.cyclomatic > CYCLOMATIC_COMPLEXITY_LIMIT);
        let cmp_class = flag(row.time_complexity > TIME_COMPLEXITY_LIMIT);
        out.push_str(&format!(
            "<tr><td>{}</td><td{cyc_class}>{}</td><td{cmp_class}>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.name),
            row.cyclomatic,
            row.time_complexity,
            row.max_nesting,
            row.num_lines,
            row.param_size,
        ));
    }

    out.push_str("</tbody></table>");
    out
}

/// The class table for a package
fn render_class_table(rows: &[ClassRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<table class="metrics"><caption>Classes</caption><thead><tr>"#);
    for label in CLASS_COLUMNS {
        out.push_str(&format!("<th>{label}</th>"));
    }
    out.push_str("</tr></thead><tbody>");

    for row in rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.name),
            optional(row.width),
            optional(row.inheritance_depth),
            row.method_count,
        ));
    }

    out.push_str("</tbody></table>");
    out
}

fn flag(over_limit: bool) -> &'static str {
    if over_limit {
        r#" class="over-limit""#
    } else {
        ""
    }
}

fn optional(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Escape text for HTML element and attribute contexts
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn inline_css() -> &'static str {
    r#"
body { font-family: sans-serif; margin: 0; color: #222; }
.container { max-width: 1100px; margin: 0 auto; padding: 1rem; }
.summary { color: #555; }
.layout { display: flex; gap: 2rem; align-items: flex-start; }
nav.tree { min-width: 220px; font-size: 0.9rem; }
nav.tree details { margin-left: 0.8rem; }
nav.tree .leaf { margin-left: 1.6rem; }
nav.tree summary { cursor: pointer; }
main.packages { flex: 1; }
section { margin-bottom: 2rem; }
table.metrics { border-collapse: collapse; width: 100%; margin: 0.5rem 0 1.5rem; }
table.metrics caption { text-align: left; font-weight: bold; padding: 0.3rem 0; }
table.metrics th, table.metrics td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
table.metrics th { background: #f0f0f0; cursor: pointer; }
td.over-limit { background: #fbe3e4; font-weight: bold; }
.question { color: #888; cursor: help; }
footer { color: #888; font-size: 0.8rem; margin-top: 2rem; }
"#
}

/// Column-sort handler attached to every metric table header
fn inline_javascript() -> &'static str {
    r#"
document.querySelectorAll('table.metrics th').forEach(function (th) {
  th.addEventListener('click', function () {
    var table = th.closest('table');
    var body = table.tBodies[0];
    var col = Array.prototype.indexOf.call(th.parentNode.children, th);
    var asc = th.dataset.asc !== 'true';
    th.dataset.asc = asc;
    var rows = Array.prototype.slice.call(body.rows);
    rows.sort(function (a, b) {
      var x = a.cells[col].textContent, y = b.cells[col].textContent;
      var nx = parseFloat(x), ny = parseFloat(y);
      var cmp = (!isNaN(nx) && !isNaN(ny)) ? nx - ny : x.localeCompare(y);
      return asc ? cmp : -cmp;
    });
    rows.forEach(function (r) { body.appendChild(r); });
  });
});
"#
}

/// Write HTML content to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - empty path or directory target
pub fn write_html(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing HTML report to: {}", output_path.display());

    validate_html_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory: {}", e))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "HTML report written successfully ({} bytes, {:.2} KB)",
        content.len(),
        content.len() as f64 / 1024.0
    );

    Ok(())
}

/// Validate output path for HTML
fn validate_html_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(ext) = path.extension() {
        if ext != "html" && ext != "htm" {
            debug!(
                "Warning: File does not have .html extension: {}",
                path.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::calculate_summary;
    use crate::session::ReportSession;
    use tempfile::NamedTempFile;

    const DOC: &str = r#"{ "pkg": [
        { "ssca_PkgName": "core/net",
          "ssca_sFile": [ { "ssca_funct": [
            { "ssca_FunctionName": "open<T>", "ssca_cyc": 42,
              "ssca_cmp": 1, "ssca_mn": 2, "ssca_nl": 30, "ssca_ps": 3 }
          ] } ] }
    ] }"#;

    fn render_fixture() -> String {
        let mut session = ReportSession::new();
        session.load_str(DOC).unwrap();
        let loaded = session.loaded().unwrap();
        let summary = calculate_summary(loaded.document());
        render_html(loaded, &summary, "Test Report")
    }

    #[test]
    fn test_render_contains_tree_and_tables() {
        let html = render_fixture();

        // Root and both tree levels render as details elements
        assert!(html.contains("<summary>ROOT</summary>"));
        assert!(html.contains("<summary>core</summary>"));
        assert!(html.contains("pkg-0"));
        // One function row, escaped name
        assert!(html.contains("open&lt;T&gt;"));
        assert!(!html.contains("open<T>"));
    }

    #[test]
    fn test_over_limit_cell_is_flagged() {
        let html = render_fixture();
        assert!(html.contains("over-limit"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
    }

    #[test]
    fn test_write_html_roundtrip() {
        let temp_file = NamedTempFile::new().unwrap();
        write_html("<html></html>", temp_file.path()).unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "<html></html>");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.html");

        write_html("<html></html>", &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_validate_html_path_empty() {
        assert!(validate_html_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_html_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_html_path(temp_dir.path()).is_err());
    }
}

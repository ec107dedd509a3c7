use sca_report_studio::aggregator::calculate_summary;
use sca_report_studio::output::{render_html, render_tables_text, render_tree_text, write_html};
use sca_report_studio::session::ReportSession;
use tempfile::tempdir;

const DOC: &str = r#"{ "pkg": [
    { "ssca_PkgName": "core" },
    { "ssca_PkgName": "core/net",
      "ssca_sFile": [ { "ssca_funct": [
        { "ssca_FunctionName": "connect", "ssca_cyc": 25,
          "ssca_cmp": 4, "ssca_mn": 5, "ssca_nl": 120, "ssca_ps": 6 }
      ] } ],
      "ssca_hFile": [ { "ssca_cls": [
        { "ssca_ClassName": "Conn", "ssca_i": "c1", "ssca_w": 3, "ssca_d": 0,
          "ssca_method": [
            { "ssca_i": "m1", "ssca_MethodName": "close", "ssca_cyc": 1,
              "ssca_cmp": 1, "ssca_mn": 1, "ssca_nl": 5, "ssca_ps": 0 }
        ] }
      ] } ] },
    { "ssca_PkgName": "ui" }
] }"#;

fn loaded_session() -> ReportSession {
    let mut session = ReportSession::new();
    session.load_str(DOC).unwrap();
    session
}

#[test]
fn test_html_report_structure() {
    let session = loaded_session();
    let loaded = session.loaded().unwrap();
    let summary = calculate_summary(loaded.document());

    let html = render_html(loaded, &summary, "Example");

    // Tree: one expandable node per non-leaf, one leaf per childless node
    assert!(html.contains("<summary>ROOT</summary>"));
    assert!(html.contains(r##"<summary><a href="#pkg-0">core</a></summary>"##));
    assert!(html.contains(r##"<a href="#pkg-1">core/net</a>"##));
    // Sections only for record-backed packages
    assert!(html.contains(r#"<section id="pkg-0">"#));
    assert!(html.contains(r#"<section id="pkg-1">"#));
    assert!(html.contains(r#"<section id="pkg-2">"#));
    // Tables for the package that has records
    assert!(html.contains("<caption>Functions</caption>"));
    assert!(html.contains("<caption>Methods</caption>"));
    assert!(html.contains("<caption>Classes</caption>"));
    // Guideline breach: cyclomatic 25 > 20 and time class 4 > 3
    assert!(html.contains("over-limit"));
    // Self-contained: styles and script embedded
    assert!(html.contains("<style>"));
    assert!(html.contains("<script>"));
}

#[test]
fn test_html_written_to_nested_path() {
    let session = loaded_session();
    let loaded = session.loaded().unwrap();
    let summary = calculate_summary(loaded.document());
    let html = render_html(loaded, &summary, "Example");

    let dir = tempdir().unwrap();
    let path = dir.path().join("out/reports/example.html");
    write_html(&html, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, html);
}

#[test]
fn test_write_html_rejects_directory() {
    let dir = tempdir().unwrap();
    assert!(write_html("<html></html>", dir.path()).is_err());
}

#[test]
fn test_text_tree_layout() {
    let session = loaded_session();
    let text = render_tree_text(session.tree().unwrap());

    assert_eq!(
        text,
        "ROOT\n\
         ├── core\n\
         │   └── core/net\n\
         └── ui\n"
    );
}

#[test]
fn test_text_tables_for_selection() {
    let session = loaded_session();
    let tables = session.select("core/net").unwrap();
    let text = render_tables_text("core/net", &tables);

    assert!(text.starts_with("Package: core/net"));
    assert!(text.contains("Functions"));
    assert!(text.contains("connect"));
    assert!(text.contains("Methods"));
    assert!(text.contains("close"));
    assert!(text.contains("Classes"));
    assert!(text.contains("Conn"));
}

#[test]
fn test_text_tables_for_empty_package() {
    let session = loaded_session();
    let tables = session.select("ui").unwrap();
    let text = render_tables_text("ui", &tables);

    assert!(text.contains("(no metric records)"));
}

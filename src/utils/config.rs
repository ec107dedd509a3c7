//! Configuration and constants for the CLI.

/// Identifier of the synthetic tree root. Never backed by a package record.
pub const ROOT_PACKAGE_NAME: &str = "ROOT";

/// Separator character in package identifiers
pub const PATH_SEPARATOR: char = '/';

/// Placeholder shown for classes without a recorded name
pub const ANONYMOUS_CLASS_NAME: &str = "<anonymous>";

// Guideline limits from the analyzer documentation. Values above the limit
// are flagged in rendered reports.
pub const CYCLOMATIC_COMPLEXITY_LIMIT: u64 = 20;
pub const TIME_COMPLEXITY_LIMIT: u64 = 3;

/// Column labels for the function/method metric tables, in display order
pub const METRIC_COLUMNS: &[&str] = &[
    "Name",
    "Cyclomatic Cmplx",
    "Time Cmplx",
    "Maximum nesting",
    "Num lines",
    "Parameter size",
];

/// Column labels for the class table, in display order
pub const CLASS_COLUMNS: &[&str] = &["Name", "Width", "Inheritance depth", "Methods"];

// Tooltip texts shown next to the metric column headers in the HTML report.
pub const NAME_TOOLTIP: &str = "Method/Function name";
pub const CYCLOMATIC_TOOLTIP: &str = "Cyclomatic complexity is a metric that tells how many \
different branches are possible inside a given function. This in turn tells the number of test \
cases needed to cover all the different paths possible inside the function. Recommended upper \
limit: 20";
pub const TIME_COMPLEXITY_TOOLTIP: &str = "Time complexity O(n). Recommended upper limit: 3";
pub const MAX_NESTING_TOOLTIP: &str = "Maximum level of nesting in the function";
pub const NUM_LINES_TOOLTIP: &str = "Number of lines in the function";
pub const PARAM_SIZE_TOOLTIP: &str = "This metric represents the number of fields in a method. \
Although a large number of fields is not necessarily an indication of bad code, it does suggest \
the possibility of grouping fields together and extracting classes";

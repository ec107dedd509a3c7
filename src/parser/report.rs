//! Report document loading.
//!
//! Parses raw JSON produced by the analyzer into a [`ReportDocument`].
//! Loading is lenient at the record level: a malformed package entry is
//! skipped with a warning rather than failing the whole document, matching
//! the one-shot, user-retriggered load model.

use super::schema::{PackageRecord, ReportDocument};
use crate::utils::error::ParseError;
use crate::utils::paths;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Load and parse a report document from a file
///
/// # Errors
/// * `ParseError::Io` - the file cannot be read
/// * `ParseError::JsonError` - the content is not valid JSON
/// * `ParseError::InvalidFormat` - the JSON is not a report document
pub fn load_report(path: impl AsRef<Path>) -> Result<ReportDocument, ParseError> {
    let path = path.as_ref();
    debug!("Loading report document: {}", path.display());

    let text = fs::read_to_string(path)?;
    parse_report(&text)
}

/// Parse a report document from a JSON string
///
/// Accepts either the canonical `{ "pkg": [...] }` object or a bare array of
/// package records (older analyzer versions emitted the array directly).
///
/// # Errors
/// * `ParseError::JsonError` - invalid JSON
/// * `ParseError::InvalidFormat` - valid JSON that is not a report document
pub fn parse_report(text: &str) -> Result<ReportDocument, ParseError> {
    let raw: serde_json::Value = serde_json::from_str(text)?;

    let entries = match &raw {
        serde_json::Value::Object(obj) => match obj.get("pkg") {
            Some(serde_json::Value::Array(entries)) => entries.as_slice(),
            Some(other) => {
                return Err(ParseError::InvalidFormat(format!(
                    "'pkg' must be an array, found {other}"
                )))
            }
            None => {
                return Err(ParseError::InvalidFormat(
                    "Document has no 'pkg' package list".to_string(),
                ))
            }
        },
        serde_json::Value::Array(entries) => {
            debug!("Document is a bare package array, accepting without wrapper");
            entries.as_slice()
        }
        _ => {
            return Err(ParseError::InvalidFormat(
                "Report must be a JSON object or array".to_string(),
            ))
        }
    };

    let packages = parse_package_array(entries)?;
    debug!("Parsed {} package records", packages.len());

    Ok(ReportDocument { packages })
}

/// Parse the package record array, skipping malformed entries
fn parse_package_array(entries: &[serde_json::Value]) -> Result<Vec<PackageRecord>, ParseError> {
    let mut packages = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<PackageRecord>(entry.clone()) {
            Ok(mut record) => {
                record.name = paths::normalize(&record.name);
                packages.push(record);
            }
            Err(e) => {
                // Log but don't fail - a single bad record should not lose the load
                warn!("Failed to parse package record {}: {}", index, e);
            }
        }
    }

    if packages.is_empty() && !entries.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All package records failed to parse".to_string(),
        ));
    }

    Ok(packages)
}

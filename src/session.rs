//! The current document / current tree state.
//!
//! A [`ReportSession`] owns the loaded report and its derived hierarchy,
//! replacing process-wide globals with an explicit load/replace/clear
//! lifecycle. A failed load leaves the previous state untouched; a
//! successful load replaces it wholesale.

use crate::aggregator::{aggregate_package, build_package_tree, PackageTables, PackageTree};
use crate::parser::schema::{PackageRecord, ReportDocument};
use crate::parser::{load_report, parse_report};
use crate::utils::config::ROOT_PACKAGE_NAME;
use crate::utils::error::ParseError;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

/// A loaded document together with everything derived from it
#[derive(Debug, Clone)]
pub struct LoadedReport {
    document: ReportDocument,
    tree: PackageTree,
    // Identifier -> package index. First-write-wins on duplicates, so lookup
    // always resolves to the first record carrying a name.
    index: HashMap<String, usize>,
}

impl LoadedReport {
    fn new(document: ReportDocument) -> Self {
        let tree = build_package_tree(&document.packages);

        let mut index = HashMap::with_capacity(document.packages.len());
        for (idx, pkg) in document.packages.iter().enumerate() {
            index.entry(pkg.name.clone()).or_insert(idx);
        }

        Self {
            document,
            tree,
            index,
        }
    }

    /// The raw document
    pub fn document(&self) -> &ReportDocument {
        &self.document
    }

    /// The reconstructed hierarchy
    pub fn tree(&self) -> &PackageTree {
        &self.tree
    }
}

/// Session state: at most one loaded report at a time
#[derive(Debug, Default)]
pub struct ReportSession {
    current: Option<LoadedReport>,
}

impl ReportSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a report from a file, replacing any prior document and tree
    ///
    /// On error the previous state is kept: the caller's view stays
    /// consistent with the last successful load.
    ///
    /// # Errors
    /// * `ParseError` - unreadable file, invalid JSON, or not a report
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        let document = load_report(path)?;
        self.install(document);
        Ok(())
    }

    /// Load a report from a JSON string, replacing any prior state
    ///
    /// # Errors
    /// * `ParseError` - invalid JSON or not a report document
    pub fn load_str(&mut self, text: &str) -> Result<(), ParseError> {
        let document = parse_report(text)?;
        self.install(document);
        Ok(())
    }

    fn install(&mut self, document: ReportDocument) {
        let loaded = LoadedReport::new(document);
        info!(
            "Session loaded: {} packages, {} tree nodes",
            loaded.document.packages.len(),
            loaded.tree.len()
        );
        self.current = Some(loaded);
    }

    /// Drop the current document and tree
    pub fn clear(&mut self) {
        debug!("Session cleared");
        self.current = None;
    }

    /// True when a document is loaded
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// The loaded report, if any
    pub fn loaded(&self) -> Option<&LoadedReport> {
        self.current.as_ref()
    }

    /// The current document, if any
    pub fn document(&self) -> Option<&ReportDocument> {
        self.current.as_ref().map(LoadedReport::document)
    }

    /// The current tree, if any
    pub fn tree(&self) -> Option<&PackageTree> {
        self.current.as_ref().map(LoadedReport::tree)
    }

    /// Resolve an identifier to its package record
    ///
    /// Resolution is independent of tree structure: it consults the
    /// identifier index, not the hierarchy. Synthesized ancestor identifiers
    /// and the root sentinel resolve to `None`.
    pub fn lookup(&self, identifier: &str) -> Option<&PackageRecord> {
        let loaded = self.current.as_ref()?;
        let idx = *loaded.index.get(identifier)?;
        loaded.document.packages.get(idx)
    }

    /// Produce the display tables for a selected identifier
    ///
    /// Returns `None` for the root sentinel (selection of the root updates
    /// no tables) and empty tables for identifiers without a backing record.
    pub fn select(&self, identifier: &str) -> Option<PackageTables> {
        self.current.as_ref()?;
        if identifier == ROOT_PACKAGE_NAME {
            return None;
        }
        Some(match self.lookup(identifier) {
            Some(record) => aggregate_package(record),
            None => PackageTables::default(),
        })
    }
}

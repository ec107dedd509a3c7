//! Build the package hierarchy from the flat record list.
//!
//! Package records arrive as a flat list of slash-delimited identifiers, not
//! guaranteed to include every intermediate ancestor. This module
//! reconstructs the rooted tree, synthesizing unbacked nodes for the missing
//! ancestors.
//!
//! Ancestor matching policy: when several constructed nodes carry the parent
//! identifier, a record-backed node is preferred over a synthesized one, and
//! among nodes of the same kind the most recently constructed wins.

use crate::parser::schema::PackageRecord;
use crate::utils::config::ROOT_PACKAGE_NAME;
use crate::utils::paths;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Index of a node inside its [`PackageTree`] arena
pub type NodeId = usize;

/// One node of the package hierarchy
#[derive(Debug, Clone)]
pub struct PackageNode {
    /// Package identifier (the root carries the `ROOT` sentinel)
    pub name: String,

    /// Index of the backing record in the document's package list.
    /// `None` for the root and for synthesized ancestors.
    pub record: Option<usize>,

    /// Child nodes, in construction order
    pub children: Vec<NodeId>,
}

impl PackageNode {
    fn new(name: impl Into<String>, record: Option<usize>) -> Self {
        Self {
            name: name.into(),
            record,
            children: Vec::new(),
        }
    }

    /// True for ancestors synthesized from path structure alone
    pub fn is_synthesized(&self) -> bool {
        self.record.is_none()
    }
}

/// Non-fatal anomalies observed while building the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralWarning {
    /// Identifier was empty or had no resolvable segment; the node was
    /// attached directly under the root
    MalformedIdentifier { identifier: String },

    /// The same identifier appears more than once in the document; lookup
    /// resolves to the first record
    DuplicateIdentifier { identifier: String },
}

impl std::fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedIdentifier { identifier } => {
                write!(f, "malformed package identifier {identifier:?}, attached under root")
            }
            Self::DuplicateIdentifier { identifier } => {
                write!(f, "duplicate package identifier {identifier:?}, first record wins")
            }
        }
    }
}

/// The reconstructed package hierarchy
///
/// Arena-allocated: nodes are stored in a flat vector and reference each
/// other by index. Node 0 is always the root sentinel.
#[derive(Debug, Clone)]
pub struct PackageTree {
    nodes: Vec<PackageNode>,
    warnings: Vec<StructuralWarning>,
}

impl PackageTree {
    /// Id of the root sentinel node
    pub const ROOT: NodeId = 0;

    fn new() -> Self {
        Self {
            nodes: vec![PackageNode::new(ROOT_PACKAGE_NAME, None)],
            warnings: Vec::new(),
        }
    }

    /// The root sentinel node
    pub fn root(&self) -> &PackageNode {
        &self.nodes[Self::ROOT]
    }

    /// Node by id
    ///
    /// # Panics
    /// Panics on an id not issued by this tree.
    pub fn node(&self, id: NodeId) -> &PackageNode {
        &self.nodes[id]
    }

    /// Total node count, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Structural anomalies recorded during construction
    pub fn warnings(&self) -> &[StructuralWarning] {
        &self.warnings
    }

    /// First node carrying the identifier, in depth-first pre-order
    pub fn find(&self, identifier: &str) -> Option<NodeId> {
        self.iter_depth_first()
            .find(|&id| self.nodes[id].name == identifier)
    }

    /// Depth-first pre-order traversal of node ids, starting at the root
    pub fn iter_depth_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        DepthFirst {
            tree: self,
            stack: vec![Self::ROOT],
        }
    }

    fn push(&mut self, node: PackageNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].children.push(child);
    }
}

struct DepthFirst<'a> {
    tree: &'a PackageTree,
    stack: Vec<NodeId>,
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Children pushed in reverse so pre-order visits them left to right
        let children = &self.tree.nodes[id].children;
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}

/// Build the package hierarchy from the document's flat record list
///
/// # Algorithm
/// 1. Group record identifiers by depth (separator count)
/// 2. Process depths in increasing order; for each identifier, construct a
///    node and attach it to the node matching its parent identifier
/// 3. When no parent is active yet, synthesize the whole missing ancestor
///    chain up to the nearest active node or the root
///
/// Construction never fails: malformed identifiers fall back to the root and
/// are recorded as [`StructuralWarning`]s.
pub fn build_package_tree(packages: &[PackageRecord]) -> PackageTree {
    debug!("Building package hierarchy from {} records", packages.len());

    let mut tree = PackageTree::new();

    // Identifier -> first record carrying it. First-write-wins, matching the
    // lookup policy: later duplicates resolve to the first record.
    let mut record_index: HashMap<&str, usize> = HashMap::new();
    for (idx, pkg) in packages.iter().enumerate() {
        record_index.entry(pkg.name.as_str()).or_insert(idx);
    }

    // Group identifiers by depth; malformed ones are handled separately.
    let mut by_depth: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    let mut malformed: Vec<usize> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for (idx, pkg) in packages.iter().enumerate() {
        let name = pkg.name.as_str();
        if !paths::is_well_formed(name) {
            warn!("Malformed package identifier {:?}", name);
            tree.warnings
                .push(StructuralWarning::MalformedIdentifier {
                    identifier: name.to_string(),
                });
            malformed.push(idx);
            continue;
        }
        if !seen.insert(name) {
            warn!("Duplicate package identifier {:?}", name);
            tree.warnings
                .push(StructuralWarning::DuplicateIdentifier {
                    identifier: name.to_string(),
                });
        }
        by_depth.entry(paths::depth(name)).or_default().push(name);
    }

    // Nodes constructed so far, in construction order. The attachment scan
    // walks this list backward.
    let mut active: Vec<NodeId> = vec![PackageTree::ROOT];

    for names in by_depth.values() {
        for name in names {
            let record = record_index.get(name).copied();
            let child = tree.push(PackageNode::new(*name, record));
            attach(&mut tree, &mut active, child);
        }
    }

    // Malformed identifiers fall back to direct children of the root
    for idx in malformed {
        let child = tree.push(PackageNode::new(packages[idx].name.as_str(), Some(idx)));
        tree.add_child(PackageTree::ROOT, child);
    }

    debug!(
        "Built hierarchy: {} nodes, {} warnings",
        tree.len(),
        tree.warnings.len()
    );

    tree
}

/// Attach a freshly constructed node under its parent, synthesizing the
/// missing ancestor chain when the parent is not active yet
fn attach(tree: &mut PackageTree, active: &mut Vec<NodeId>, child: NodeId) {
    let parent_name = paths::dir_name(&tree.node(child).name).map(str::to_string);

    if let Some(parent) = find_active(tree, active, parent_name.as_deref()) {
        tree.add_child(parent, child);
        active.push(child);
        return;
    }

    // No active ancestor: synthesize the chain from the nearest active
    // ancestor (or the root) down to the direct parent.
    let mut missing: Vec<String> = Vec::new();
    let mut cursor = parent_name;
    let anchor = loop {
        match cursor {
            Some(name) => match find_active(tree, active, Some(&name)) {
                Some(id) => break id,
                None => {
                    cursor = paths::dir_name(&name).map(str::to_string);
                    missing.push(name);
                }
            },
            None => break PackageTree::ROOT,
        }
    };

    debug!(
        "Synthesizing {} ancestor(s) for {:?}",
        missing.len(),
        tree.node(child).name
    );

    // Topmost missing ancestor first
    let mut parent = anchor;
    for name in missing.into_iter().rev() {
        let synthesized = tree.push(PackageNode::new(name, None));
        tree.add_child(parent, synthesized);
        active.push(synthesized);
        parent = synthesized;
    }

    tree.add_child(parent, child);
    active.push(child);
}

/// Find the active node the given parent identifier resolves to
///
/// `None` resolves to the root. Record-backed nodes win over synthesized
/// ones; within the same kind the most recently constructed node wins.
fn find_active(tree: &PackageTree, active: &[NodeId], parent_name: Option<&str>) -> Option<NodeId> {
    let Some(parent_name) = parent_name else {
        return Some(PackageTree::ROOT);
    };

    let mut synthesized_match = None;
    for &id in active.iter().rev() {
        let node = tree.node(id);
        if node.name != parent_name {
            continue;
        }
        if node.record.is_some() {
            return Some(id);
        }
        if synthesized_match.is_none() {
            synthesized_match = Some(id);
        }
    }
    synthesized_match
}

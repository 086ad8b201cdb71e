//! Data models for relationship sheets

pub mod edge;
pub mod node;

pub use edge::{Edge, EdgeKind, LINK, LINK_REVERSE};
pub use node::{Node, NodeColor, NodeId};

use std::collections::BTreeSet;
use std::fmt;

/// Everything read from one sheet: nodes in row order and the deduplicated edge set
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    /// One node per data row, in row order
    pub nodes: Vec<Node>,
    /// Relations, deduplicated by kind and unordered endpoint pair
    pub edges: BTreeSet<Edge>,
}

impl SheetData {
    /// Create an empty sheet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: BTreeSet::new(),
        }
    }

    /// Add an edge. Returns `false` when an equal edge was already present,
    /// in which case the existing one is kept unchanged.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    /// Look up a node by identifier (first row wins when ids repeat)
    #[must_use]
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}

impl fmt::Display for SheetData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes ({}):", self.nodes.len())?;
        for node in &self.nodes {
            writeln!(f, "  {node}")?;
        }
        writeln!(f)?;
        writeln!(f, "Edges ({}):", self.edges.len())?;
        for edge in &self.edges {
            writeln!(f, "  {edge}")?;
        }
        Ok(())
    }
}

//! Relation graph: draw partitions plus a directed `petgraph` graph for layout
//!
//! Link edges keep their declared direction. Every other kind is a synonym
//! relation: its endpoints are put in canonical order and the pairs are
//! deduplicated again without regard to kind, so `(X, Y, "alias")` and
//! `(Y, X, "synonym")` end up as a single undirected line.

use crate::core::models::{NodeColor, NodeId, SheetData};
use crate::{debug, warn};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// How an arc of the relation graph is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    /// `link` relation: solid arrow from source to target
    Directed,
    /// Synonym relation: dotted line, stored low → high
    Undirected,
}

/// Graph built from a loaded sheet, ready for layout and drawing
#[derive(Debug, Clone)]
pub struct RelationGraph {
    /// Directed graph over node ids; synonym arcs point from the smaller id
    pub graph: DiGraph<NodeId, EdgeStyle>,
    /// Node id → label text
    pub labels: HashMap<NodeId, String>,
    /// Ids drawn with a red marker, in row order
    pub red_nodes: Vec<NodeId>,
    /// Ids drawn with a blue marker, in row order
    pub blue_nodes: Vec<NodeId>,
    /// Directed `(source, target)` pairs
    pub links: Vec<(NodeId, NodeId)>,
    /// Canonical undirected `(low, high)` pairs
    pub synonyms: Vec<(NodeId, NodeId)>,
    index: HashMap<NodeId, NodeIndex>,
}

impl RelationGraph {
    /// Build the graph from loaded sheet data
    #[must_use]
    pub fn build(sheet: &SheetData) -> Self {
        let mut labels = HashMap::new();
        let mut red_nodes = Vec::new();
        let mut blue_nodes = Vec::new();

        for node in &sheet.nodes {
            // A repeated id takes the label of its last row
            if labels.insert(node.id.clone(), node.text.clone()).is_some() {
                debug!("Node {} appears on more than one row", node.id);
            }
            match node.color {
                NodeColor::Red => red_nodes.push(node.id.clone()),
                NodeColor::Blue => blue_nodes.push(node.id.clone()),
                NodeColor::Other(ref color) => {
                    debug!("Node {} has color '{color}' and is not drawn", node.id);
                }
            }
        }

        let mut links = Vec::new();
        let mut synonym_pairs = BTreeSet::new();
        for edge in &sheet.edges {
            if edge.kind.is_directed() {
                links.push((edge.source.clone(), edge.target.clone()));
            } else {
                let (low, high) = edge.endpoints();
                synonym_pairs.insert((low.clone(), high.clone()));
            }
        }
        let synonyms: Vec<(NodeId, NodeId)> = synonym_pairs.into_iter().collect();

        let mut relation_graph = Self {
            graph: DiGraph::new(),
            labels,
            red_nodes,
            blue_nodes,
            links,
            synonyms,
            index: HashMap::new(),
        };
        relation_graph.populate();
        relation_graph
    }

    /// Add red and blue nodes, then every edge with implicit endpoints
    fn populate(&mut self) {
        let drawn: Vec<NodeId> = self
            .red_nodes
            .iter()
            .chain(self.blue_nodes.iter())
            .cloned()
            .collect();
        for id in drawn {
            self.ensure_node(&id);
        }

        let arcs: Vec<(NodeId, NodeId, EdgeStyle)> = self
            .links
            .iter()
            .map(|(s, t)| (s.clone(), t.clone(), EdgeStyle::Directed))
            .chain(
                self.synonyms
                    .iter()
                    .map(|(s, t)| (s.clone(), t.clone(), EdgeStyle::Undirected)),
            )
            .collect();
        for (source, target, style) in arcs {
            let from = self.ensure_node(&source);
            let to = self.ensure_node(&target);
            self.graph.add_edge(from, to, style);
        }
    }

    fn ensure_node(&mut self, id: &NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        if !self.labels.contains_key(id) {
            warn!("Relation references unknown node id '{id}'");
        } else if !self.is_drawn(id) {
            debug!("Node {id} is referenced by a relation but has no marker");
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id.clone(), idx);
        idx
    }

    /// Graph index of a node id, if it is part of the graph
    #[must_use]
    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Label text of a node id
    #[must_use]
    pub fn label(&self, id: &NodeId) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Whether a node id gets a red or blue marker
    #[must_use]
    pub fn is_drawn(&self, id: &NodeId) -> bool {
        self.red_nodes.contains(id) || self.blue_nodes.contains(id)
    }

    /// Number of vertices in the graph (drawn plus implicit)
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of arcs in the graph
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl fmt::Display for RelationGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ids: &[NodeId]| {
            ids.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(
            f,
            "Relation graph ({} nodes, {} arcs):",
            self.node_count(),
            self.edge_count()
        )?;
        writeln!(f, "  red:  [{}]", join(&self.red_nodes))?;
        writeln!(f, "  blue: [{}]", join(&self.blue_nodes))?;
        for (source, target) in &self.links {
            writeln!(f, "  {source} -> {target}")?;
        }
        for (low, high) in &self.synonyms {
            writeln!(f, "  {low} .. {high}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Edge, EdgeKind, Node};

    fn node(color: &str, id: i64, text: &str) -> Node {
        Node::new(NodeColor::parse(color), NodeId::Int(id), text.to_string())
    }

    fn edge(kind: &str, source: i64, target: i64) -> Edge {
        Edge::new(EdgeKind::from_tag(kind), NodeId::Int(source), NodeId::Int(target))
    }

    #[test]
    fn test_two_node_link() {
        let mut sheet = SheetData::new();
        sheet.nodes.push(node("red", 1, "A"));
        sheet.nodes.push(node("blue", 2, "B"));
        sheet.add_edge(edge("link", 1, 2));

        let graph = RelationGraph::build(&sheet);
        assert_eq!(graph.red_nodes, vec![NodeId::Int(1)]);
        assert_eq!(graph.blue_nodes, vec![NodeId::Int(2)]);
        assert_eq!(graph.links, vec![(NodeId::Int(1), NodeId::Int(2))]);
        assert!(graph.synonyms.is_empty());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.label(&NodeId::Int(2)), Some("B"));
    }

    #[test]
    fn test_synonyms_collapse_across_kind_and_direction() {
        let mut sheet = SheetData::new();
        sheet.nodes.push(node("red", 1, "X"));
        sheet.nodes.push(node("red", 2, "Y"));
        sheet.add_edge(edge("synonym", 2, 1));
        sheet.add_edge(edge("alias", 1, 2));
        assert_eq!(sheet.edges.len(), 2);

        let graph = RelationGraph::build(&sheet);
        assert_eq!(graph.synonyms, vec![(NodeId::Int(1), NodeId::Int(2))]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_other_colors_are_not_drawn_but_can_be_referenced() {
        let mut sheet = SheetData::new();
        sheet.nodes.push(node("red", 1, "A"));
        sheet.nodes.push(node("green", 2, "G"));
        sheet.nodes.push(node("green", 3, "Lonely"));
        sheet.add_edge(edge("link", 1, 2));

        let graph = RelationGraph::build(&sheet);
        assert!(!graph.is_drawn(&NodeId::Int(2)));
        assert!(graph.node_index(&NodeId::Int(2)).is_some());
        assert!(graph.node_index(&NodeId::Int(3)).is_none());
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_dangling_reference_becomes_implicit_vertex() {
        let mut sheet = SheetData::new();
        sheet.nodes.push(node("blue", 1, "A"));
        sheet.add_edge(edge("synonym", 1, 99));

        let graph = RelationGraph::build(&sheet);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.label(&NodeId::Int(99)).is_none());
    }

    #[test]
    fn test_repeated_id_takes_last_label() {
        let mut sheet = SheetData::new();
        sheet.nodes.push(node("red", 4, "First"));
        sheet.nodes.push(node("red", 4, "Second"));

        let graph = RelationGraph::build(&sheet);
        assert_eq!(graph.label(&NodeId::Int(4)), Some("Second"));
    }

    #[test]
    fn test_red_nodes_are_added_first() {
        let mut sheet = SheetData::new();
        sheet.nodes.push(node("blue", 1, "B"));
        sheet.nodes.push(node("red", 2, "R"));

        let graph = RelationGraph::build(&sheet);
        assert_eq!(graph.node_index(&NodeId::Int(2)).map(NodeIndex::index), Some(0));
        assert_eq!(graph.node_index(&NodeId::Int(1)).map(NodeIndex::index), Some(1));
    }
}

//! Relation edges and their symmetric identity
//!
//! Two edges are the same relation when they have the same kind and join the
//! same unordered pair of nodes, whatever direction each was declared in.
//! `Eq`, `Hash` and `Ord` all follow that rule so a set of edges collapses
//! `(k, A, B)` and `(k, B, A)` into whichever was inserted first.

use super::NodeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Relation tag for directed edges
pub const LINK: &str = "link";

/// Relation tag that produces a `link` edge pointing back at the row's node
pub const LINK_REVERSE: &str = "linkReverse";

/// Kind of relation between two nodes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    /// Directed relation, drawn as an arrow
    Link,
    /// Any other tag; undirected and drawn as a dotted line
    Synonym(String),
}

impl EdgeKind {
    /// Map a relation tag to a kind
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag == LINK {
            Self::Link
        } else {
            Self::Synonym(tag.to_string())
        }
    }

    /// Whether edges of this kind are drawn with a direction
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        matches!(self, Self::Link)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => write!(f, "{LINK}"),
            Self::Synonym(tag) => write!(f, "{tag}"),
        }
    }
}

/// A relation between two nodes
#[derive(Debug, Clone)]
pub struct Edge {
    /// Relation kind
    pub kind: EdgeKind,
    /// Declared source node
    pub source: NodeId,
    /// Declared target node
    pub target: NodeId,
}

impl Edge {
    /// Create a new edge
    #[must_use]
    pub const fn new(kind: EdgeKind, source: NodeId, target: NodeId) -> Self {
        Self {
            kind,
            source,
            target,
        }
    }

    /// Build the edge described by one `(peer, relation)` pair on a sheet row
    ///
    /// `linkReverse` becomes a `link` from the peer to the row's node; every
    /// other tag points from the row's node to the peer.
    #[must_use]
    pub fn from_relation(row_id: &NodeId, peer_id: &NodeId, relation: &str) -> Self {
        if relation == LINK_REVERSE {
            Self::new(EdgeKind::Link, peer_id.clone(), row_id.clone())
        } else {
            Self::new(EdgeKind::from_tag(relation), row_id.clone(), peer_id.clone())
        }
    }

    /// Endpoints in canonical order (smaller id first)
    #[must_use]
    pub fn endpoints(&self) -> (&NodeId, &NodeId) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }

    /// Whether both endpoints are the same node
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    fn identity(&self) -> (&EdgeKind, &NodeId, &NodeId) {
        let (low, high) = self.endpoints();
        (&self.kind, low, high)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.kind.is_directed() { "->" } else { "--" };
        write!(f, "{}: {} {arrow} {}", self.kind, self.source, self.target)
    }
}

//! Connected components and biconnected blocks of a simple undirected graph

use std::collections::VecDeque;

/// A maximal biconnected subgraph. A block with two vertices is a bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Vertices in discovery order
    pub vertices: Vec<usize>,
    /// Undirected edges, each listed once
    pub edges: Vec<(usize, usize)>,
}

impl Block {
    fn from_edges(edges: Vec<(usize, usize)>) -> Self {
        let mut vertices = Vec::new();
        for &(a, b) in &edges {
            for v in [a, b] {
                if !vertices.contains(&v) {
                    vertices.push(v);
                }
            }
        }
        Self { vertices, edges }
    }

    /// Whether this block is a single edge
    #[must_use]
    pub fn is_bridge(&self) -> bool {
        self.vertices.len() == 2
    }
}

/// Connected components, each listed in BFS order from its smallest vertex
#[must_use]
pub fn connected_components(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; adj.len()];
    let mut components = Vec::new();

    for start in 0..adj.len() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            component.push(u);
            for &v in &adj[u] {
                if !seen[v] {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Biconnected blocks of the component containing `root` (Tarjan's edge-stack method)
///
/// The depth-first search keeps its own stack, so long chains do not grow the
/// call stack.
#[must_use]
pub fn biconnected_blocks(adj: &[Vec<usize>], root: usize) -> Vec<Block> {
    let mut disc: Vec<Option<usize>> = vec![None; adj.len()];
    let mut low = vec![0; adj.len()];
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut blocks = Vec::new();

    disc[root] = Some(0);
    let mut time = 1;
    let mut frames = vec![Frame {
        vertex: root,
        parent: None,
        disc: 0,
        next: 0,
    }];

    while let Some(&Frame {
        vertex: u,
        parent,
        disc: disc_u,
        next,
    }) = frames.last()
    {
        if let Some(&v) = adj[u].get(next) {
            if let Some(top) = frames.last_mut() {
                top.next += 1;
            }
            match disc[v] {
                None => {
                    edges.push((u, v));
                    disc[v] = Some(time);
                    low[v] = time;
                    frames.push(Frame {
                        vertex: v,
                        parent: Some(u),
                        disc: time,
                        next: 0,
                    });
                    time += 1;
                }
                Some(disc_v) if Some(v) != parent && disc_v < disc_u => {
                    edges.push((u, v));
                    low[u] = low[u].min(disc_v);
                }
                Some(_) => {}
            }
            continue;
        }

        frames.pop();
        let Some(p) = parent else {
            continue;
        };
        low[p] = low[p].min(low[u]);
        let disc_p = disc[p].unwrap_or(0);
        if low[u] >= disc_p {
            let mut block = Vec::new();
            while let Some(edge) = edges.pop() {
                block.push(edge);
                if edge == (p, u) {
                    break;
                }
            }
            blocks.push(Block::from_edges(block));
        }
    }
    blocks
}

/// One vertex of the depth-first search in progress
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    parent: Option<usize>,
    disc: usize,
    /// Index of the next neighbor to look at
    next: usize,
}

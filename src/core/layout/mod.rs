//! Planar straight-line layout
//!
//! Each connected component is split into biconnected blocks, which form a
//! tree hanging from the component's first vertex. Every subtree of that tree
//! is confined to a wedge: a cone of directions with its apex at the vertex
//! the subtree hangs from. A block is drawn in a triangle in the middle of its
//! wedge with a fixed edge length, and the wedge is handed on to the blocks
//! below its outer corners, so long chains keep their spacing. Blocks hanging
//! from a vertex inside another block are shrunk to fit the free space around
//! that vertex. Components are laid side by side and the result is centered
//! and scaled so the largest coordinate is 1.

pub mod blocks;
pub mod embedding;
pub mod tutte;

use crate::debug;
use blocks::{biconnected_blocks, connected_components, Block};
use embedding::{embed_block, Faces};
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::f64::consts::{FRAC_PI_3, FRAC_PI_6, PI, TAU};

/// Horizontal gap between laid out components, in component-size units
const COMPONENT_GAP: f64 = 0.5;
/// Fraction of a vertex's clearance used for blocks nested inside a face
const CLEARANCE_SHARE: f64 = 0.45;
/// Widest wedge a single block and its subtree may occupy
const MAX_WEDGE: f64 = 2.0 * FRAC_PI_3;
/// Widest half-angle of a wedge carved out of a face for nested blocks
const MAX_NESTED_HALF_ANGLE: f64 = FRAC_PI_6;

/// A position in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (up is positive)
    pub y: f64,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point `length` away in direction `angle` (radians)
    #[must_use]
    pub fn offset(self, angle: f64, length: f64) -> Self {
        Self::new(self.x + length * angle.cos(), self.y + length * angle.sin())
    }

    /// Direction from this point to another, in radians
    #[must_use]
    pub fn angle_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Compute planar coordinates for every node of `graph`, indexed by node index
///
/// Direction, self-loops and parallel arcs are ignored; the layout only
/// depends on the underlying simple undirected graph.
///
/// # Errors
/// Returns an error if the graph is not planar
pub fn planar_layout<N, E>(graph: &DiGraph<N, E>) -> Result<Vec<Point>, String> {
    let adj = simple_adjacency(graph);
    let mut positions = vec![Point::default(); adj.len()];
    let mut cursor = 0.0;

    for component in connected_components(&adj) {
        let local = layout_component(&adj, &component)?;
        cursor = place_component(&local, cursor, &mut positions) + COMPONENT_GAP;
    }

    rescale(&mut positions);
    debug!("Planar layout computed for {} vertices", positions.len());
    Ok(positions)
}

fn simple_adjacency<N, E>(graph: &DiGraph<N, E>) -> Vec<Vec<usize>> {
    let mut sets = vec![BTreeSet::new(); graph.node_count()];
    for edge in graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            sets[a].insert(b);
            sets[b].insert(a);
        }
    }
    sets.into_iter().map(|set| set.into_iter().collect()).collect()
}

fn layout_component(adj: &[Vec<usize>], component: &[usize]) -> Result<HashMap<usize, Point>, String> {
    let root = component[0];
    let tree = BlockTree::new(adj, root)?;
    let mut assembly = Assembly::default();
    assembly.positions.insert(root, Point::default());

    let mut tasks = vec![Task::Fan {
        vertex: root,
        wedge: Wedge::new(-PI, PI),
        length: 1.0,
    }];
    while let Some(task) = tasks.pop() {
        let (vertex, wedge, length) = match task {
            Task::Fan {
                vertex,
                wedge,
                length,
            } => (vertex, wedge, length),
            Task::Nested { vertex } => {
                let (wedge, length) = assembly.nested_wedge(vertex, tree.depth_below(vertex));
                (vertex, wedge, length)
            }
        };
        let hanging = tree.hanging(vertex);
        let weights: Vec<f64> = hanging.iter().map(|&block| tree.weight[block]).collect();
        for (&block, piece) in hanging.iter().zip(wedge.split(&weights)) {
            assembly.hang(&tree, block, piece.capped(MAX_WEDGE), length, &mut tasks);
        }
    }
    Ok(assembly.positions)
}

/// Range of directions in radians, narrower than a half-turn except at a root
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wedge {
    start: f64,
    end: f64,
}

impl Wedge {
    const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    fn middle(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    fn width(self) -> f64 {
        self.end - self.start
    }

    /// The centered part of this wedge no wider than `limit`
    fn capped(self, limit: f64) -> Self {
        if self.width() <= limit {
            return self;
        }
        let middle = self.middle();
        Self::new(middle - limit / 2.0, middle + limit / 2.0)
    }

    /// Consecutive pieces with widths proportional to `weights`
    fn split(self, weights: &[f64]) -> Vec<Self> {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return vec![self; weights.len()];
        }
        let mut start = self.start;
        weights
            .iter()
            .map(|weight| {
                let end = start + self.width() * weight / total;
                let piece = Self::new(start, end);
                start = end;
                piece
            })
            .collect()
    }
}

/// Pending work while drawing one component
enum Task {
    /// Blocks hanging from `vertex` share `wedge`
    Fan { vertex: usize, wedge: Wedge, length: f64 },
    /// Blocks hanging from a vertex drawn inside another block
    Nested { vertex: usize },
}

/// Blocks of one component arranged as a tree below its root vertex
struct BlockTree {
    blocks: Vec<Block>,
    faces: Vec<Option<Faces>>,
    /// Vertex each block hangs from
    apex: Vec<usize>,
    /// Blocks hanging from each vertex
    children: HashMap<usize, Vec<usize>>,
    /// Vertices below each block, its apex excluded
    weight: Vec<f64>,
    /// Blocks on the longest path down from each block, itself included
    depth: Vec<f64>,
}

impl BlockTree {
    fn new(adj: &[Vec<usize>], root: usize) -> Result<Self, String> {
        let blocks = biconnected_blocks(adj, root);
        let faces = blocks
            .iter()
            .map(|block| {
                if block.is_bridge() {
                    Ok(None)
                } else {
                    embed_block(&block.vertices, &block.edges).map(Some)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut blocks_of: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, block) in blocks.iter().enumerate() {
            for &v in &block.vertices {
                blocks_of.entry(v).or_default().push(index);
            }
        }

        let mut apex = vec![root; blocks.len()];
        let mut visited = vec![false; blocks.len()];
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut order = Vec::with_capacity(blocks.len());
        let mut queue = VecDeque::from([root]);
        while let Some(v) = queue.pop_front() {
            let hanging: Vec<usize> = blocks_of
                .get(&v)
                .into_iter()
                .flatten()
                .copied()
                .filter(|&block| !visited[block])
                .collect();
            for &block in &hanging {
                visited[block] = true;
                apex[block] = v;
                order.push(block);
                queue.extend(blocks[block].vertices.iter().copied().filter(|&w| w != v));
            }
            if !hanging.is_empty() {
                children.insert(v, hanging);
            }
        }

        let mut weight = vec![0.0; blocks.len()];
        let mut depth = vec![1.0; blocks.len()];
        for &block in order.iter().rev() {
            let mut below = (blocks[block].vertices.len() - 1) as f64;
            let mut deepest: f64 = 0.0;
            for v in blocks[block].vertices.iter().filter(|&&v| v != apex[block]) {
                for &child in children.get(v).into_iter().flatten() {
                    below += weight[child];
                    deepest = deepest.max(depth[child]);
                }
            }
            weight[block] = below;
            depth[block] = 1.0 + deepest;
        }

        Ok(Self {
            blocks,
            faces,
            apex,
            children,
            weight,
            depth,
        })
    }

    fn hanging(&self, vertex: usize) -> &[usize] {
        self.children.get(&vertex).map_or(&[], Vec::as_slice)
    }

    fn depth_below(&self, vertex: usize) -> f64 {
        self.hanging(vertex)
            .iter()
            .map(|&block| self.depth[block])
            .fold(1.0, f64::max)
    }
}

/// Drawing of one component, built block by block
#[derive(Default)]
struct Assembly {
    positions: HashMap<usize, Point>,
    segments: Vec<(usize, usize)>,
    /// Triangles the drawn blocks were fitted into
    outlines: Vec<[Point; 3]>,
}

impl Assembly {
    /// Draw `block` below its apex, inside `wedge`, and queue the blocks below it
    fn hang(&mut self, tree: &BlockTree, block: usize, wedge: Wedge, length: f64, tasks: &mut Vec<Task>) {
        let apex = tree.apex[block];
        let origin = self.positions.get(&apex).copied().unwrap_or_default();
        let direction = wedge.middle();
        let vertices = &tree.blocks[block].vertices;
        self.segments.extend(tree.blocks[block].edges.iter().copied());

        let Some(faces) = &tree.faces[block] else {
            for &v in vertices.iter().filter(|&&v| v != apex) {
                self.positions.insert(v, origin.offset(direction, length));
                if !tree.hanging(v).is_empty() {
                    tasks.push(Task::Fan {
                        vertex: v,
                        wedge,
                        length,
                    });
                }
            }
            return;
        };

        let half_angle = wedge.width() / 4.0;
        let corners = [
            origin,
            origin.offset(direction - half_angle, length),
            origin.offset(direction + half_angle, length),
        ];
        let drawn = tutte::draw_block(vertices, faces, apex, corners);
        let pinned = |p: Point, corner: Point| p.distance(corner) <= length * 1e-12;

        // Outer corners pass the wedge on; vertices inside the triangle nest
        let (mut left, mut right) = (None, None);
        for &v in vertices.iter().filter(|&&v| v != apex) {
            let Some(&p) = drawn.get(&v) else {
                continue;
            };
            self.positions.insert(v, p);
            if tree.hanging(v).is_empty() {
                continue;
            }
            if pinned(p, corners[1]) {
                left = Some(v);
            } else if pinned(p, corners[2]) {
                right = Some(v);
            } else {
                tasks.push(Task::Nested { vertex: v });
            }
        }
        self.outlines.push(corners);

        match (left, right) {
            (Some(left), Some(right)) => {
                tasks.push(Task::Fan {
                    vertex: left,
                    wedge: Wedge::new(wedge.start, direction),
                    length,
                });
                tasks.push(Task::Fan {
                    vertex: right,
                    wedge: Wedge::new(direction, wedge.end),
                    length,
                });
            }
            (Some(vertex), None) | (None, Some(vertex)) => tasks.push(Task::Fan {
                vertex,
                wedge,
                length,
            }),
            (None, None) => {}
        }
    }

    /// Free wedge and edge length for blocks hanging from a vertex inside a block
    fn nested_wedge(&self, vertex: usize, depth: f64) -> (Wedge, f64) {
        let origin = self.positions.get(&vertex).copied().unwrap_or_default();
        let (start, width) = widest_gap(&self.occupied_directions(vertex, origin));
        let middle = start + width / 2.0;
        let half_angle = (width / 4.0).min(MAX_NESTED_HALF_ANGLE);
        let length = CLEARANCE_SHARE * self.clearance(vertex, origin) / depth;
        (Wedge::new(middle - half_angle, middle + half_angle), length)
    }

    /// Directions from `vertex` along its drawn edges
    fn occupied_directions(&self, vertex: usize, origin: Point) -> Vec<(f64, f64)> {
        self.segments
            .iter()
            .filter_map(|&(a, b)| match (a == vertex, b == vertex) {
                (true, false) => Some(b),
                (false, true) => Some(a),
                _ => None,
            })
            .filter_map(|other| self.positions.get(&other))
            .map(|&p| {
                let angle = origin.angle_to(p);
                (angle, angle)
            })
            .collect()
    }

    /// Distance from `vertex` to the nearest vertex, non-incident segment or block outline
    fn clearance(&self, vertex: usize, origin: Point) -> f64 {
        let to_vertices = self
            .positions
            .iter()
            .filter(|&(&v, _)| v != vertex)
            .map(|(_, &p)| origin.distance(p));
        let to_segments = self
            .segments
            .iter()
            .filter(|&&(a, b)| a != vertex && b != vertex)
            .filter_map(|(a, b)| Some((*self.positions.get(a)?, *self.positions.get(b)?)))
            .map(|(p, q)| segment_distance(origin, p, q));
        let to_outlines = self
            .outlines
            .iter()
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .map(|(p, q)| segment_distance(origin, p, q))
            .filter(|&d| d > 0.0);
        let nearest = to_vertices
            .chain(to_segments)
            .chain(to_outlines)
            .fold(f64::INFINITY, f64::min);
        if nearest.is_finite() && nearest > 0.0 {
            nearest
        } else {
            1.0
        }
    }
}

/// Start angle and width of the widest direction range not covered by `occupied`
fn widest_gap(occupied: &[(f64, f64)]) -> (f64, f64) {
    let mut spans: Vec<(f64, f64)> = Vec::with_capacity(occupied.len() + 1);
    for &(low, high) in occupied {
        let start = low.rem_euclid(TAU);
        let end = start + (high - low).max(0.0);
        if end > TAU {
            spans.push((start, TAU));
            spans.push((0.0, end - TAU));
        } else {
            spans.push((start, end));
        }
    }
    if spans.is_empty() {
        return (0.0, TAU);
    }
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let last = merged[merged.len() - 1];
    let mut best = (last.1, merged[0].0 + TAU - last.1);
    for pair in merged.windows(2) {
        let width = pair[1].0 - pair[0].1;
        if width > best.1 {
            best = (pair[0].1, width);
        }
    }
    best
}

fn segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx.mul_add(dx, dy * dy);
    if length_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point.x - a.x).mul_add(dx, (point.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance(Point::new(t.mul_add(dx, a.x), t.mul_add(dy, a.y)))
}

/// Scale a component to unit size and place it with its left edge at `cursor`
///
/// Returns the x coordinate of the component's right edge.
fn place_component(local: &HashMap<usize, Point>, cursor: f64, positions: &mut [Point]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in local.values() {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let size = (max_x - min_x).max(max_y - min_y);
    let scale = if size > 0.0 { 1.0 / size } else { 1.0 };
    let middle_y = (min_y + max_y) / 2.0;

    for (&v, p) in local {
        positions[v] = Point::new(cursor + (p.x - min_x) * scale, (p.y - middle_y) * scale);
    }
    cursor + (max_x - min_x) * scale
}

/// Center on the mean and scale so the largest absolute coordinate is 1
fn rescale(positions: &mut [Point]) {
    if positions.is_empty() {
        return;
    }
    let count = positions.len() as f64;
    let mean_x = positions.iter().map(|p| p.x).sum::<f64>() / count;
    let mean_y = positions.iter().map(|p| p.y).sum::<f64>() / count;
    let mut limit: f64 = 0.0;
    for p in positions.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }
    if limit > 0.0 {
        for p in positions.iter_mut() {
            p.x /= limit;
            p.y /= limit;
        }
    }
}

//! Planar embedding of a biconnected block (Demoucron–Malgrange–Pertuiset)
//!
//! Starting from any cycle, fragments of the remaining graph are embedded one
//! path at a time into a face that contains all of their attachment vertices.
//! A fragment with no such face proves the block is not planar. Because every
//! step joins two distinct vertices of a simple cycle, each face stays a
//! simple cycle, which is what the drawing step relies on.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Faces of a planar embedding, each a cycle of vertices
pub type Faces = Vec<Vec<usize>>;

/// Part of the graph not yet embedded, hanging off embedded vertices
#[derive(Debug)]
struct Fragment {
    /// Embedded vertices the fragment touches
    attachments: Vec<usize>,
    /// Vertices of the fragment that are not yet embedded (empty for a chord)
    interior: Vec<usize>,
}

/// Embed a biconnected block with at least three vertices
///
/// `vertices` and `edges` use caller ids; the returned faces use them too.
///
/// # Errors
/// Returns an error when the block is not planar (or is not biconnected)
pub fn embed_block(vertices: &[usize], edges: &[(usize, usize)]) -> Result<Faces, String> {
    let local: HashMap<usize, usize> = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let mut adj = vec![Vec::new(); vertices.len()];
    for &(a, b) in edges {
        let (la, lb) = (local[&a], local[&b]);
        adj[la].push(lb);
        adj[lb].push(la);
    }

    let faces = Embedder::new(&adj)?.run()?;
    Ok(faces
        .into_iter()
        .map(|face| face.into_iter().map(|v| vertices[v]).collect())
        .collect())
}

struct Embedder<'a> {
    adj: &'a [Vec<usize>],
    embedded: Vec<bool>,
    edges: HashSet<(usize, usize)>,
    faces: Faces,
    edge_total: usize,
}

impl<'a> Embedder<'a> {
    fn new(adj: &'a [Vec<usize>]) -> Result<Self, String> {
        let cycle = find_cycle(adj).ok_or("block has no cycle to start the embedding from")?;
        let mut embedded = vec![false; adj.len()];
        let mut edges = HashSet::new();
        for (i, &v) in cycle.iter().enumerate() {
            embedded[v] = true;
            edges.insert(undirected(v, cycle[(i + 1) % cycle.len()]));
        }
        let reversed: Vec<usize> = cycle.iter().rev().copied().collect();
        let edge_total = adj.iter().map(Vec::len).sum::<usize>() / 2;

        Ok(Self {
            adj,
            embedded,
            edges,
            faces: vec![cycle, reversed],
            edge_total,
        })
    }

    fn run(mut self) -> Result<Faces, String> {
        while self.edges.len() < self.edge_total {
            let fragments = self.fragments();
            let mut choice: Option<(usize, usize)> = None;

            for (index, fragment) in fragments.iter().enumerate() {
                let admissible: Vec<usize> = self
                    .faces
                    .iter()
                    .enumerate()
                    .filter(|(_, face)| fragment.attachments.iter().all(|a| face.contains(a)))
                    .map(|(face_index, _)| face_index)
                    .collect();
                match admissible.as_slice() {
                    [] => {
                        return Err(format!(
                            "graph is not planar: no face can hold the fragment attached at {} vertices",
                            fragment.attachments.len()
                        ))
                    }
                    [only] => {
                        choice = Some((index, *only));
                        break;
                    }
                    [first, ..] if choice.is_none() => choice = Some((index, *first)),
                    _ => {}
                }
            }

            let (fragment_index, face_index) =
                choice.ok_or("embedding stalled with edges left but no fragments")?;
            let path = self.fragment_path(&fragments[fragment_index])?;
            self.embed_path(face_index, &path);
        }
        Ok(self.faces)
    }

    /// Chords between embedded vertices plus components of the unembedded rest
    fn fragments(&self) -> Vec<Fragment> {
        let mut fragments = Vec::new();

        for u in 0..self.adj.len() {
            if !self.embedded[u] {
                continue;
            }
            for &v in &self.adj[u] {
                if u < v && self.embedded[v] && !self.edges.contains(&(u, v)) {
                    fragments.push(Fragment {
                        attachments: vec![u, v],
                        interior: Vec::new(),
                    });
                }
            }
        }

        let mut seen = vec![false; self.adj.len()];
        for start in 0..self.adj.len() {
            if self.embedded[start] || seen[start] {
                continue;
            }
            seen[start] = true;
            let mut interior = Vec::new();
            let mut attachments = BTreeSet::new();
            let mut queue = VecDeque::from([start]);
            while let Some(u) = queue.pop_front() {
                interior.push(u);
                for &v in &self.adj[u] {
                    if self.embedded[v] {
                        attachments.insert(v);
                    } else if !seen[v] {
                        seen[v] = true;
                        queue.push_back(v);
                    }
                }
            }
            fragments.push(Fragment {
                attachments: attachments.into_iter().collect(),
                interior,
            });
        }
        fragments
    }

    /// A path through the fragment joining two distinct attachments
    fn fragment_path(&self, fragment: &Fragment) -> Result<Vec<usize>, String> {
        if fragment.interior.is_empty() {
            return Ok(fragment.attachments.clone());
        }
        let stuck = || "fragment has fewer than two attachments; block is not biconnected".to_string();

        let start = *fragment.attachments.first().ok_or_else(stuck)?;
        let inside: HashSet<usize> = fragment.interior.iter().copied().collect();
        let first = *self.adj[start]
            .iter()
            .find(|&&v| inside.contains(&v))
            .ok_or_else(stuck)?;

        let mut previous: HashMap<usize, usize> = HashMap::new();
        let mut queue = VecDeque::from([first]);
        let mut visited = HashSet::from([first]);
        while let Some(u) = queue.pop_front() {
            if let Some(&end) = self.adj[u]
                .iter()
                .find(|&&v| self.embedded[v] && v != start)
            {
                let mut walk = vec![u];
                let mut cursor = u;
                while let Some(&back) = previous.get(&cursor) {
                    walk.push(back);
                    cursor = back;
                }
                walk.reverse();

                let mut path = Vec::with_capacity(walk.len() + 2);
                path.push(start);
                path.extend(walk);
                path.push(end);
                return Ok(path);
            }
            for &v in &self.adj[u] {
                if inside.contains(&v) && visited.insert(v) {
                    previous.insert(v, u);
                    queue.push_back(v);
                }
            }
        }
        Err(stuck())
    }

    /// Split a face along a path whose ends lie on it
    fn embed_path(&mut self, face_index: usize, path: &[usize]) {
        let face = self.faces.swap_remove(face_index);
        let (first, second) = split_face(&face, path);
        self.faces.push(first);
        self.faces.push(second);

        for window in path.windows(2) {
            self.edges.insert(undirected(window[0], window[1]));
        }
        for &v in path {
            self.embedded[v] = true;
        }
    }
}

const fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Split `face` along `path` (ends on the face, interior new) into two faces
fn split_face(face: &[usize], path: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let n = face.len();
    let position = |v: usize| face.iter().position(|&f| f == v).unwrap_or(0);
    let from = position(path[0]);
    let to = position(path[path.len() - 1]);
    let walk = |mut k: usize, end: usize| {
        let mut out = vec![face[k]];
        while k != end {
            k = (k + 1) % n;
            out.push(face[k]);
        }
        out
    };
    let interior = &path[1..path.len() - 1];

    let mut first = walk(from, to);
    first.extend(interior.iter().rev());
    let mut second = walk(to, from);
    second.extend(interior.iter());
    (first, second)
}

/// Any simple cycle of the graph (length ≥ 3), found by depth-first search
fn find_cycle(adj: &[Vec<usize>]) -> Option<Vec<usize>> {
    if adj.is_empty() {
        return None;
    }
    let mut visited = vec![false; adj.len()];
    let mut on_path = vec![false; adj.len()];
    let mut path = vec![0];
    let mut cursor = vec![0usize];
    visited[0] = true;
    on_path[0] = true;

    while let Some(&u) = path.last() {
        let top = cursor.len() - 1;
        if cursor[top] < adj[u].len() {
            let v = adj[u][cursor[top]];
            cursor[top] += 1;
            if path.len() >= 2 && v == path[path.len() - 2] {
                continue;
            }
            if on_path[v] {
                let start = path.iter().position(|&x| x == v)?;
                return Some(path[start..].to_vec());
            }
            if !visited[v] {
                visited[v] = true;
                on_path[v] = true;
                path.push(v);
                cursor.push(0);
            }
        } else {
            on_path[u] = false;
            path.pop();
            cursor.pop();
        }
    }
    None
}

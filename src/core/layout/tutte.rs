//! Straight-line drawing of an embedded block (Tutte barycentric method)
//!
//! Faces longer than a triangle get a dummy vertex joined to every corner.
//! The result is a simple maximal planar graph, hence 3-connected, so pinning
//! one triangular face to a convex triangle and placing every other vertex at
//! the average of its neighbors yields a planar straight-line drawing.

use super::embedding::Faces;
use super::Point;
use std::collections::{BTreeSet, HashMap};

const MAX_ITERATIONS: usize = 10_000;
const TOLERANCE: f64 = 1e-9;

/// Draw a biconnected block with `apex` pinned at `corners[0]`
///
/// The two other outer vertices go to `corners[1]` and `corners[2]`; every
/// other vertex lands strictly inside that triangle.
#[must_use]
pub fn draw_block(
    vertices: &[usize],
    faces: &Faces,
    apex: usize,
    corners: [Point; 3],
) -> HashMap<usize, Point> {
    let local: HashMap<usize, usize> = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let mut adj: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); vertices.len()];
    let mut face_centers: Vec<Option<usize>> = Vec::with_capacity(faces.len());
    let local_faces: Vec<Vec<usize>> = faces
        .iter()
        .map(|face| face.iter().map(|v| local[v]).collect())
        .collect();

    for face in &local_faces {
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            adj[a].insert(b);
            adj[b].insert(a);
        }
        if face.len() > 3 {
            let center = adj.len();
            adj.push(face.iter().copied().collect());
            for &v in face {
                adj[v].insert(center);
            }
            face_centers.push(Some(center));
        } else {
            face_centers.push(None);
        }
    }

    let apex_local = local.get(&apex).copied().unwrap_or(0);
    let outer = outer_triangle(&local_faces, &face_centers, apex_local);

    let mut positions = vec![centroid(&corners); adj.len()];
    let mut fixed = vec![false; adj.len()];
    for (corner, &v) in corners.iter().zip(outer.iter()) {
        positions[v] = *corner;
        fixed[v] = true;
    }
    relax(&adj, &fixed, &mut positions, spread(&corners));

    vertices
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, positions[i]))
        .collect()
}

/// A triangular face through `apex`, listed apex first
fn outer_triangle(faces: &[Vec<usize>], centers: &[Option<usize>], apex: usize) -> [usize; 3] {
    let chosen = faces
        .iter()
        .zip(centers)
        .find_map(|(face, center)| face.iter().position(|&v| v == apex).map(|i| (face, center, i)))
        .or_else(|| faces.first().zip(centers.first()).map(|(face, center)| (face, center, 0)));

    match chosen {
        Some((face, None, i)) => [
            face[i],
            face[(i + 1) % face.len()],
            face[(i + 2) % face.len()],
        ],
        Some((face, Some(center), i)) => [face[i], face[(i + 1) % face.len()], *center],
        None => [apex, apex, apex],
    }
}

/// Gauss–Seidel iteration of the barycentric equations
fn relax(adj: &[BTreeSet<usize>], fixed: &[bool], positions: &mut [Point], scale: f64) {
    let tolerance = TOLERANCE * scale.max(f64::MIN_POSITIVE);
    for _ in 0..MAX_ITERATIONS {
        let mut largest_move: f64 = 0.0;
        for v in 0..adj.len() {
            if fixed[v] || adj[v].is_empty() {
                continue;
            }
            let count = adj[v].len() as f64;
            let (sx, sy) = adj[v].iter().fold((0.0, 0.0), |(sx, sy), &w| {
                (sx + positions[w].x, sy + positions[w].y)
            });
            let next = Point::new(sx / count, sy / count);
            largest_move = largest_move.max(next.distance(positions[v]));
            positions[v] = next;
        }
        if largest_move <= tolerance {
            break;
        }
    }
}

fn centroid(points: &[Point; 3]) -> Point {
    Point::new(
        (points[0].x + points[1].x + points[2].x) / 3.0,
        (points[0].y + points[1].y + points[2].y) / 3.0,
    )
}

fn spread(points: &[Point; 3]) -> f64 {
    points[0]
        .distance(points[1])
        .max(points[1].distance(points[2]))
        .max(points[0].distance(points[2]))
}

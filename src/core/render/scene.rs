//! Drawable scene: markers, labels and edge segments in layout coordinates

use crate::core::config::RenderConfig;
use crate::core::graph::RelationGraph;
use crate::core::layout::Point;
use crate::core::models::NodeId;
use crate::debug;

/// Horizontal margin around the labels, as a share of their span
const X_MARGIN: f64 = 0.3;
/// Vertical margin around the labels, as a share of their span
const Y_MARGIN: f64 = 0.15;

/// Marker fill of a drawn node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    /// `red` rows
    Red,
    /// `blue` rows
    Blue,
}

impl MarkerColor {
    /// SVG fill color
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Red => "#ff0000",
            Self::Blue => "#0000ff",
        }
    }
}

/// A node marker
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Node id the marker stands for
    pub id: NodeId,
    /// Marker center
    pub position: Point,
    /// Fill
    pub color: MarkerColor,
}

/// A text label, anchored at its left edge
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Anchor point
    pub position: Point,
    /// Text to draw
    pub text: String,
}

/// An edge between two node positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start (source of a link)
    pub from: Point,
    /// End (target of a link)
    pub to: Point,
}

/// Visible data window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge
    pub min_x: f64,
    /// Right edge
    pub max_x: f64,
    /// Bottom edge
    pub min_y: f64,
    /// Top edge
    pub max_y: f64,
}

impl Bounds {
    /// Window around `points` with the given relative margins
    ///
    /// An axis with no extent gets a window of ±1 around its coordinate.
    #[must_use]
    pub fn around(points: &[Point], x_margin: f64, y_margin: f64) -> Self {
        let (min_x, max_x) = padded(points.iter().map(|p| p.x), x_margin);
        let (min_y, max_y) = padded(points.iter().map(|p| p.y), y_margin);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Window width
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Window height
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

fn padded(values: impl Iterator<Item = f64>, margin: f64) -> (f64, f64) {
    let (low, high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), v| {
        (low.min(v), high.max(v))
    });
    if !low.is_finite() {
        return (-1.0, 1.0);
    }
    let span = high - low;
    if span <= 0.0 {
        return (low - 1.0, high + 1.0);
    }
    (margin.mul_add(-span, low), margin.mul_add(span, high))
}

/// Everything needed to draw a relation graph
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Red markers first, then blue, in row order
    pub markers: Vec<Marker>,
    /// One label per laid out vertex
    pub labels: Vec<Label>,
    /// Directed link edges
    pub arrows: Vec<Segment>,
    /// Undirected synonym edges
    pub dotted: Vec<Segment>,
    /// Visible window
    pub bounds: Bounds,
}

impl Scene {
    /// Place markers, labels and edges of `graph` at `positions`
    ///
    /// `positions` is indexed by the graph's node indices, as returned by
    /// [`planar_layout`](crate::core::layout::planar_layout).
    #[must_use]
    pub fn build(graph: &RelationGraph, positions: &[Point], config: &RenderConfig) -> Self {
        let position = |id: &NodeId| {
            graph
                .node_index(id)
                .and_then(|idx| positions.get(idx.index()).copied())
        };

        let markers = graph
            .red_nodes
            .iter()
            .map(|id| (id, MarkerColor::Red))
            .chain(graph.blue_nodes.iter().map(|id| (id, MarkerColor::Blue)))
            .filter_map(|(id, color)| {
                position(id).map(|position| Marker {
                    id: id.clone(),
                    position,
                    color,
                })
            })
            .collect();

        let labels: Vec<Label> = graph
            .graph
            .node_indices()
            .filter_map(|idx| {
                let id = &graph.graph[idx];
                let p = positions.get(idx.index())?;
                Some(Label {
                    position: Point::new(p.x + config.label_offset, p.y),
                    text: graph.label(id).map_or_else(|| id.to_string(), str::to_string),
                })
            })
            .collect();

        let segments = |pairs: &[(NodeId, NodeId)]| -> Vec<Segment> {
            pairs
                .iter()
                .filter_map(|(source, target)| {
                    if source == target {
                        debug!("Skipping self-loop on {source}");
                        return None;
                    }
                    Some(Segment {
                        from: position(source)?,
                        to: position(target)?,
                    })
                })
                .collect()
        };
        let arrows = segments(graph.links.as_slice());
        let dotted = segments(graph.synonyms.as_slice());

        let anchors: Vec<Point> = labels.iter().map(|l| l.position).collect();
        let bounds = Bounds::around(&anchors, X_MARGIN, Y_MARGIN);

        Self {
            markers,
            labels,
            arrows,
            dotted,
            bounds,
        }
    }
}

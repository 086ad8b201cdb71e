//! SVG drawing of a scene
//!
//! Edges are quadratic curves bent like matplotlib's `arc3` connection style:
//! the control point sits off the chord midpoint by `curvature` times the
//! chord length, on the chord's normal.

use crate::core::config::RenderConfig;
use crate::core::layout::Point;
use crate::core::render::scene::{Bounds, Scene, Segment};
use crate::shared::escape_xml;
use std::fmt::Write;

const LINK_COLOR: &str = "#0000ff";
const SYNONYM_COLOR: &str = "#666666";
const LABEL_COLOR: &str = "#000000";
const EDGE_WIDTH: f64 = 1.2;
/// Extra distance kept between an edge end and the marker it points at
const END_GAP: f64 = 0.7;

/// Maps layout coordinates onto the pixel canvas (y grows downwards)
#[derive(Debug, Clone, Copy)]
struct Canvas {
    bounds: Bounds,
    width: f64,
    height: f64,
}

impl Canvas {
    fn pixel(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.bounds.min_x) / self.bounds.width() * self.width,
            self.height - (p.y - self.bounds.min_y) / self.bounds.height() * self.height,
        )
    }
}

/// Renders a [`Scene`] as a standalone SVG document
pub struct SvgRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> SvgRenderer<'a> {
    /// Create a renderer with the given drawing settings
    #[must_use]
    pub const fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Render the scene to SVG markup
    #[must_use]
    pub fn render(&self, scene: &Scene) -> String {
        let width = f64::from(self.config.width.max(1));
        let height = f64::from(self.config.height.max(1));
        let canvas = Canvas {
            bounds: scene.bounds,
            width,
            height,
        };

        let mut output = String::new();
        let _ = writeln!(
            output,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.config.width.max(1),
            h = self.config.height.max(1),
        );
        let _ = writeln!(
            output,
            r#"  <defs><marker id="arrowhead" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto"><path d="M 0 0 L 10 5 L 0 10 z" fill="{LINK_COLOR}"/></marker></defs>"#
        );
        output.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

        output.push_str("  <g class=\"synonyms\">\n");
        for segment in &scene.dotted {
            let path = self.curve(&canvas, *segment);
            let _ = writeln!(
                output,
                r#"    <path d="{path}" fill="none" stroke="{SYNONYM_COLOR}" stroke-width="{EDGE_WIDTH}" stroke-dasharray="2,3"/>"#
            );
        }
        output.push_str("  </g>\n");

        output.push_str("  <g class=\"links\">\n");
        for segment in &scene.arrows {
            let path = self.curve(&canvas, *segment);
            let _ = writeln!(
                output,
                r#"    <path d="{path}" fill="none" stroke="{LINK_COLOR}" stroke-width="{EDGE_WIDTH}" marker-end="url(#arrowhead)"/>"#
            );
        }
        output.push_str("  </g>\n");

        output.push_str("  <g class=\"nodes\">\n");
        for marker in &scene.markers {
            let center = canvas.pixel(marker.position);
            let _ = writeln!(
                output,
                r#"    <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"><title>{}</title></circle>"#,
                center.x,
                center.y,
                self.config.node_radius,
                marker.color.hex(),
                escape_xml(&marker.id.to_string()),
            );
        }
        output.push_str("  </g>\n");

        output.push_str("  <g class=\"labels\">\n");
        for label in &scene.labels {
            let anchor = canvas.pixel(label.position);
            let _ = writeln!(
                output,
                r#"    <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" fill="{LABEL_COLOR}" text-anchor="start" dominant-baseline="middle">{}</text>"#,
                anchor.x,
                anchor.y,
                self.config.font_size,
                escape_xml(&label.text),
            );
        }
        output.push_str("  </g>\n");

        output.push_str("</svg>\n");
        output
    }

    /// Path data for one curved edge, shortened at both ends
    fn curve(&self, canvas: &Canvas, segment: Segment) -> String {
        let start = canvas.pixel(segment.from);
        let end = canvas.pixel(segment.to);
        let control = arc_control(end, start, self.config.curvature);
        let shrink = self.config.node_radius + END_GAP;
        let start = toward(start, control, shrink);
        let end = toward(end, control, shrink);
        format!(
            "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
            start.x, start.y, control.x, control.y, end.x, end.y
        )
    }
}

/// Control point of an `arc3` curve from `a` to `b` in pixel coordinates
fn arc_control(a: Point, b: Point, curvature: f64) -> Point {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    Point::new(
        curvature.mul_add(-dy, (a.x + b.x) / 2.0),
        curvature.mul_add(dx, (a.y + b.y) / 2.0),
    )
}

/// Move `from` by `distance` towards `to`, never past it
fn toward(from: Point, to: Point, distance: f64) -> Point {
    let length = from.distance(to);
    if length <= f64::EPSILON {
        return from;
    }
    let t = (distance / length).min(0.5);
    Point::new(t.mul_add(to.x - from.x, from.x), t.mul_add(to.y - from.y, from.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::NodeId;
    use crate::core::render::scene::{Label, Marker, MarkerColor};

    fn scene() -> Scene {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        Scene {
            markers: vec![
                Marker {
                    id: NodeId::Int(1),
                    position: a,
                    color: MarkerColor::Red,
                },
                Marker {
                    id: NodeId::Int(2),
                    position: b,
                    color: MarkerColor::Blue,
                },
            ],
            labels: vec![
                Label {
                    position: Point::new(0.04, 0.0),
                    text: "A & <B>".to_string(),
                },
                Label {
                    position: Point::new(1.04, 0.0),
                    text: "B".to_string(),
                },
            ],
            arrows: vec![Segment { from: a, to: b }],
            dotted: vec![],
            bounds: Bounds::around(&[a, b], 0.3, 0.15),
        }
    }

    #[test]
    fn test_svg_contains_markers_and_arrow() {
        let config = RenderConfig::default();
        let svg = SvgRenderer::new(&config).render(&scene());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1920" height="1080""#));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("#ff0000"));
        assert_eq!(svg.matches("marker-end=\"url(#arrowhead)\"").count(), 1);
        assert!(!svg.contains("stroke-dasharray=\"2,3\"/>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let config = RenderConfig::default();
        let svg = SvgRenderer::new(&config).render(&scene());
        assert!(svg.contains("A &amp; &lt;B&gt;"));
        assert!(!svg.contains("<B>"));
    }

    #[test]
    fn test_dotted_edges_have_no_arrowhead() {
        let config = RenderConfig::default();
        let mut scene = scene();
        scene.dotted = std::mem::take(&mut scene.arrows);
        let svg = SvgRenderer::new(&config).render(&scene);
        assert!(!svg.contains("marker-end"));
        assert_eq!(svg.matches("stroke-dasharray").count(), 1);
    }

    #[test]
    fn test_canvas_flips_y() {
        let canvas = Canvas {
            bounds: Bounds {
                min_x: 0.0,
                max_x: 2.0,
                min_y: 0.0,
                max_y: 1.0,
            },
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(canvas.pixel(Point::new(0.0, 0.0)), Point::new(0.0, 100.0));
        assert_eq!(canvas.pixel(Point::new(2.0, 1.0)), Point::new(200.0, 0.0));
    }

    #[test]
    fn test_arc_control_is_off_the_chord() {
        let control = arc_control(Point::new(0.0, 0.0), Point::new(10.0, 0.0), -0.3);
        assert!((control.x - 5.0).abs() < 1e-12);
        assert!((control.y + 3.0).abs() < 1e-12);
        let straight = arc_control(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0.0);
        assert_eq!(straight, Point::new(5.0, 0.0));
    }

    #[test]
    fn test_toward_stops_halfway() {
        let p = toward(Point::new(0.0, 0.0), Point::new(4.0, 0.0), 10.0);
        assert_eq!(p, Point::new(2.0, 0.0));
    }
}

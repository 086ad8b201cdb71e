//! Static drawing of a relation graph
//!
//! A [`Scene`] is built from the graph and its planar layout, then written as
//! SVG, as an HTML page filling the browser window, or as a PNG image.

pub mod html;
pub mod png;
pub mod scene;
pub mod svg;

pub use html::HtmlRenderer;
pub use png::PngRenderer;
pub use scene::{Bounds, Label, Marker, MarkerColor, Scene, Segment};
pub use svg::SvgRenderer;

use crate::core::config::RenderConfig;
use crate::core::graph::RelationGraph;
use crate::core::layout::planar_layout;
use crate::{debug, info};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Standalone SVG image
    Svg,
    /// HTML page showing the SVG full screen
    Html,
    /// Raster PNG image
    Png,
}

impl RenderFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::Png => "png",
        }
    }

    /// Guess the format from a file name's extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            "png" => Ok(Self::Png),
            _ => Err(format!("Unknown render format: {s}")),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Html => write!(f, "html"),
            Self::Png => write!(f, "png"),
        }
    }
}

/// Lay out `graph` and build its scene
///
/// # Errors
/// Returns an error if the graph is not planar
pub fn build_scene(graph: &RelationGraph, config: &RenderConfig) -> Result<Scene, String> {
    let positions = planar_layout(&graph.graph)?;
    let scene = Scene::build(graph, &positions, config);
    debug!(
        "Scene has {} markers, {} labels, {} arrows, {} dotted lines",
        scene.markers.len(),
        scene.labels.len(),
        scene.arrows.len(),
        scene.dotted.len()
    );
    Ok(scene)
}

/// Write `scene` to `output_path` in the given format
///
/// Parent directories are created as needed. The HTML page title is the
/// file stem.
///
/// # Errors
/// Returns an error if rasterizing fails or the file cannot be written
pub fn render_to_file(
    scene: &Scene,
    format: RenderFormat,
    config: &RenderConfig,
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let bytes = match format {
        RenderFormat::Svg => SvgRenderer::new(config).render(scene).into_bytes(),
        RenderFormat::Html => {
            let title = output_path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("relgraph");
            HtmlRenderer::new(config, title).render(scene).into_bytes()
        }
        RenderFormat::Png => PngRenderer::new(config).render(scene)?,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output_path, bytes)?;
    info!("Wrote {format} drawing to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_and_display() {
        assert_eq!("SVG".parse::<RenderFormat>().unwrap(), RenderFormat::Svg);
        assert_eq!("htm".parse::<RenderFormat>().unwrap(), RenderFormat::Html);
        assert_eq!("png".parse::<RenderFormat>().unwrap(), RenderFormat::Png);
        assert!("pdf".parse::<RenderFormat>().is_err());
        assert_eq!(RenderFormat::Html.to_string(), "html");
        assert_eq!(RenderFormat::Png.extension(), "png");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RenderFormat::from_path(Path::new("out/graph.svg")),
            Some(RenderFormat::Svg)
        );
        assert_eq!(RenderFormat::from_path(Path::new("graph")), None);
    }
}

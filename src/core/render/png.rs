//! PNG rasterization of the SVG drawing (`usvg` + `resvg` + `tiny-skia`)

use crate::core::config::RenderConfig;
use crate::core::render::scene::Scene;
use crate::core::render::svg::SvgRenderer;
use crate::debug;
use std::error::Error;

/// Renders a scene to PNG bytes at the configured canvas size
pub struct PngRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> PngRenderer<'a> {
    /// Create a PNG renderer
    #[must_use]
    pub const fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Rasterize the scene
    ///
    /// # Errors
    /// Returns an error if the SVG cannot be parsed, the canvas cannot be
    /// allocated or PNG encoding fails
    pub fn render(&self, scene: &Scene) -> Result<Vec<u8>, Box<dyn Error>> {
        let svg = SvgRenderer::new(self.config).render(scene);

        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!("Loaded {} font faces for rasterizing", options.fontdb.len());

        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| format!("Failed to parse generated SVG: {e}"))?;
        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| format!("Cannot allocate a {}x{} canvas", size.width(), size.height()))?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        let png = pixmap
            .encode_png()
            .map_err(|e| format!("Failed to encode PNG: {e}"))?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Point;
    use crate::core::render::scene::{Bounds, Marker, MarkerColor};
    use crate::core::models::NodeId;

    #[test]
    fn test_png_has_signature_and_size() {
        let config = RenderConfig {
            width: 64,
            height: 48,
            ..RenderConfig::default()
        };
        let scene = Scene {
            markers: vec![Marker {
                id: NodeId::Int(1),
                position: Point::default(),
                color: MarkerColor::Red,
            }],
            labels: vec![],
            arrows: vec![],
            dotted: vec![],
            bounds: Bounds::around(&[Point::default()], 0.3, 0.15),
        };
        let png = PngRenderer::new(&config).render(&scene).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        // IHDR width and height, big endian
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 64);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 48);
    }
}

//! Full-viewport HTML page around the SVG drawing

use crate::core::config::RenderConfig;
use crate::core::render::scene::Scene;
use crate::core::render::svg::SvgRenderer;
use crate::shared::escape_xml;

/// Embedded page template
const HTML_TEMPLATE: &str = include_str!("templates/viewer.html");

/// Renders a scene as a self-contained HTML page that fills the browser window
pub struct HtmlRenderer<'a> {
    config: &'a RenderConfig,
    title: String,
}

impl<'a> HtmlRenderer<'a> {
    /// Create an HTML renderer with a page title
    #[must_use]
    pub fn new(config: &'a RenderConfig, title: &str) -> Self {
        Self {
            config,
            title: title.to_string(),
        }
    }

    /// Render the page
    #[must_use]
    pub fn render(&self, scene: &Scene) -> String {
        let svg = SvgRenderer::new(self.config).render(scene);
        HTML_TEMPLATE
            .replace("{{title}}", &escape_xml(&self.title))
            .replace("{{svg}}", svg.trim_end())
    }
}

//! The host region a chart is drawn into.

use super::svg::Element;

/// A render target identified by a stable element id.
///
/// Every render replaces the whole content, so repeated renders never
/// accumulate stale elements.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    element_id: String,
    content: Option<Element>,
    render_count: usize,
}

impl RenderTarget {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            content: None,
            render_count: 0,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Replace the target's content with `root`.
    pub fn replace(&mut self, root: Element) {
        self.content = Some(root);
        self.render_count += 1;
    }

    pub fn clear(&mut self) {
        self.content = None;
    }

    pub fn content(&self) -> Option<&Element> {
        self.content.as_ref()
    }

    /// Number of times content has been replaced.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn element_count(&self) -> usize {
        self.content.as_ref().map_or(0, Element::element_count)
    }

    /// Serialized SVG document, or an empty string before the first render.
    pub fn to_svg(&self) -> String {
        self.content
            .as_ref()
            .map(|root| root.to_string())
            .unwrap_or_default()
    }
}

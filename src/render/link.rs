//! Link and image strategies.

use serde_json::json;

use super::context::StyleContext;
use super::node::{Action, RenderedNode};
use super::Renderer;
use crate::style::StyleKey;
use crate::syntax::Element;

impl Renderer {
    /// Link content is styled with the link style alone; ancestor styles
    /// do not reach into links.
    pub(crate) fn render_link(&self, element: &Element, key: &str) -> RenderedNode {
        let context = StyleContext::new().cascade(self.style(StyleKey::Link));
        let children = self.walk(&element.children, Some(key), &context);
        let href = element.attributes.href.as_deref().unwrap_or_default();

        if let Some(renderer) = &self.hooks.link {
            return renderer.render_link(href, element.attributes.title.as_deref(), children);
        }

        RenderedNode::pressable(Action::OpenLink {
            href: href.to_string(),
            source_tag: self.link_source_tag.clone(),
        })
        .with_key(format!("linkWrapper_{key}"))
        .with_optional_style(self.style(StyleKey::LinkWrapper))
        .with_children(children)
    }

    pub(crate) fn render_image(&self, element: &Element, key: &str) -> RenderedNode {
        let attributes = &element.attributes;
        let src = attributes.src.as_deref().unwrap_or_default();

        if let Some(renderer) = &self.hooks.image {
            return renderer.render_image(src, attributes.alt.as_deref(), attributes.title.as_deref());
        }

        RenderedNode::view()
            .with_key(format!("imageWrapper_{key}"))
            .with_optional_style(self.style(StyleKey::ImageWrapper))
            .with_child(
                RenderedNode::image(src)
                    .with_optional_style(self.style(StyleKey::Image))
                    .with_prop("resizeMode", json!("contain")),
            )
    }
}

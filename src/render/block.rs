//! Block, block-quote, code fence and rule strategies.

use super::context::StyleContext;
use super::node::{Primitive, RenderedNode};
use super::Renderer;
use crate::style::{Dimension, Style, StyleKey};
use crate::syntax::Element;

const FENCE_BACKGROUND: &str = "#444444";
const FENCE_PADDING: f32 = 30.0;

impl Renderer {
    /// Generic block. Consumes the block-quote flag: a flagged block gets
    /// quote styling, its descendants do not unless they are quotes too.
    pub(crate) fn render_block(
        &self,
        element: &Element,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        let (quoted, context) = context.take_block_quote();
        let mut nodes = self.walk(&element.children, Some(key), &context);

        if !quoted {
            return RenderedNode::view()
                .with_key(format!("block_{key}"))
                .with_optional_style(self.style(StyleKey::Block))
                .with_children(nodes);
        }

        let single_text = nodes.len() == 1
            && nodes[0].as_ref().is_some_and(RenderedNode::is_plain_text);
        let content = if single_text {
            let mut quote_text = RenderedNode::new(Primitive::Text)
                .with_optional_style(self.style(StyleKey::BlockQuoteText));
            if let Some(text) = nodes.pop().flatten() {
                quote_text = quote_text.with_child(text);
            }
            quote_text
        } else {
            RenderedNode::view()
                .with_style(Style {
                    align_items: Some("center".to_string()),
                    justify_content: Some("center".to_string()),
                    align_self: Some("center".to_string()),
                    ..Style::default()
                })
                .with_children(nodes)
        };

        RenderedNode::view()
            .with_key(format!("blockQuote_{key}"))
            .with_optional_style(self.style(StyleKey::Block))
            .with_optional_style(self.style(StyleKey::BlockQuote))
            .with_child(content)
    }

    pub(crate) fn render_block_quote(
        &self,
        element: &Element,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        self.render_block(element, key, &context.with_block_quote())
    }

    /// Code block: a dark padded box. Quoted fences look the same as
    /// unquoted ones.
    pub(crate) fn render_fence(
        &self,
        element: &Element,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        let (_quoted, context) = context.take_block_quote();
        let nodes = self.walk(&element.children, Some(key), &context);

        RenderedNode::view()
            .with_key(format!("fence_{key}"))
            .with_style(Style {
                width: Some(Dimension::percent(100)),
                ..Style::default()
            })
            .with_child(
                RenderedNode::view()
                    .with_key(format!("block_{key}"))
                    .with_optional_style(self.style(StyleKey::Fence))
                    .with_style(Style {
                        overflow: Some("hidden".to_string()),
                        background_color: Some(FENCE_BACKGROUND.to_string()),
                        width: Some(Dimension::percent(100)),
                        padding: Some(FENCE_PADDING),
                        ..Style::default()
                    })
                    .with_children(nodes),
            )
    }

    pub(crate) fn render_line(&self, key: &str) -> RenderedNode {
        RenderedNode::view()
            .with_key(format!("hr_{key}"))
            .with_optional_style(self.style(StyleKey::HorizontalRule))
    }
}

//! Text, heading and inline-anchor strategies.

use super::context::StyleContext;
use super::node::{Action, RenderedNode};
use super::Renderer;
use crate::style::{Dimension, Style, StyleKey};
use crate::syntax::{Element, SyntaxNode};

impl Renderer {
    /// Render a text run or a styled wrapper.
    ///
    /// Wrappers pass `context` on to their children inside a plain
    /// container; leaves become text styled with the base text style
    /// followed by every cascaded style.
    pub(crate) fn render_text(
        &self,
        node: &SyntaxNode,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        match node {
            SyntaxNode::Element(element) => RenderedNode::view()
                .with_key(key)
                .with_children(self.walk(&element.children, Some(key), context)),
            SyntaxNode::Text(text) => RenderedNode::text(text.as_str())
                .with_key(key)
                .with_styles(self.text_styles(context)),
        }
    }

    /// Headings render as text in a full-width container.
    pub(crate) fn render_heading(
        &self,
        node: &SyntaxNode,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        RenderedNode::view()
            .with_key(format!("heading_{key}"))
            .with_style(Style {
                width: Some(Dimension::percent(100)),
                ..Style::default()
            })
            .with_child(self.render_text(node, key, context))
    }

    /// Inline `<a>` tags. Only anchors whose `class` matches the messenger
    /// sentinel become pressable; others render their first child as text.
    pub(crate) fn render_html_anchor(
        &self,
        element: &Element,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        let is_messenger = element.attributes.class.as_deref().is_some_and(|class| {
            class
                .split_whitespace()
                .any(|name| name == self.messenger_anchor_class)
        });

        if is_messenger {
            return RenderedNode::pressable(Action::LaunchMessenger)
                .with_key(format!("linkWrapper_{key}"))
                .with_optional_style(self.style(StyleKey::LinkWrapper))
                .with_children(self.walk(&element.children, Some(key), context));
        }

        let content = element
            .children
            .first()
            .map(SyntaxNode::plain_text)
            .unwrap_or_default();
        RenderedNode::text(content)
            .with_key(key)
            .with_styles(self.text_styles(context))
    }

    /// The base text style followed by the cascaded styles.
    pub(crate) fn text_styles(&self, context: &StyleContext) -> Vec<Style> {
        self.style(StyleKey::Text)
            .cloned()
            .into_iter()
            .chain(context.styles())
            .collect()
    }
}

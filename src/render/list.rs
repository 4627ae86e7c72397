//! List and list-item strategies.

use super::context::StyleContext;
use super::node::RenderedNode;
use super::Renderer;
use crate::style::{Style, StyleKey};
use crate::syntax::Element;

impl Renderer {
    /// Lists start a fresh context that only carries the `ordered` flag.
    pub(crate) fn render_list(&self, element: &Element, key: &str, ordered: bool) -> RenderedNode {
        RenderedNode::view()
            .with_key(format!("list_{key}"))
            .with_optional_style(self.style(StyleKey::List))
            .with_children(self.walk(
                &element.children,
                Some(key),
                &StyleContext::for_list(ordered),
            ))
    }

    /// Marker and content side by side.
    pub(crate) fn render_list_item(
        &self,
        element: &Element,
        key: &str,
        index: usize,
        context: &StyleContext,
    ) -> RenderedNode {
        let children = self.walk(&element.children, Some(key), context);
        let ordered = context.ordered();
        let marker = match &self.hooks.bullet {
            Some(renderer) => renderer.render_bullet(ordered, index),
            None => self.render_list_bullet(ordered, index),
        };

        RenderedNode::view()
            .with_key(format!("listItem_{key}"))
            .with_optional_style(self.style(StyleKey::ListItem))
            .with_style(Style {
                flex_direction: Some("row".to_string()),
                ..Style::default()
            })
            .with_child(marker)
            .with_child(
                RenderedNode::view()
                    .with_key(format!("listItemContent_{key}"))
                    .with_optional_style(self.style(StyleKey::ListItemContent))
                    .with_children(children),
            )
    }

    /// Built-in marker: `"{n}."` for ordered lists, a bullet dot otherwise.
    pub(crate) fn render_list_bullet(&self, ordered: bool, index: usize) -> RenderedNode {
        if ordered {
            return RenderedNode::text(format!("{}.", index + 1))
                .with_key(format!("listBullet_{index}"))
                .with_optional_style(self.style(StyleKey::ListItemNumber));
        }
        RenderedNode::view()
            .with_key(format!("listBullet_{index}"))
            .with_optional_style(self.style(StyleKey::ListItemBullet))
    }
}

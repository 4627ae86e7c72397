//! Node dispatch and tree walking.

use super::context::StyleContext;
use super::node::RenderedNode;
use super::Renderer;
use crate::style::StyleKey;
use crate::syntax::{MAX_HEADING_LEVEL, NodeKind, SyntaxNode};

impl Renderer {
    /// Render a sequence of sibling nodes, one slot per input node.
    ///
    /// Keys are `parent_key + "_" + index`, or the bare index at the root.
    pub fn walk(
        &self,
        nodes: &[SyntaxNode],
        parent_key: Option<&str>,
        context: &StyleContext,
    ) -> Vec<Option<RenderedNode>> {
        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let key = parent_key.map_or_else(
                    || index.to_string(),
                    |parent| format!("{parent}_{index}"),
                );
                self.dispatch_node(Some(node), &key, index, context)
            })
            .collect()
    }

    /// Render one node with the strategy for its kind.
    ///
    /// Returns `None` for absent or sentinel nodes and for unsupported
    /// kinds.
    pub fn dispatch_node(
        &self,
        node: Option<&SyntaxNode>,
        key: &str,
        index: usize,
        context: &StyleContext,
    ) -> Option<RenderedNode> {
        let node = node.filter(|node| !node.is_sentinel())?;

        let element = match node {
            SyntaxNode::Text(_) => return Some(self.render_text(node, key, context)),
            SyntaxNode::Element(element) => element,
        };

        let rendered = match &element.kind {
            NodeKind::Heading(level) if (1..=MAX_HEADING_LEVEL).contains(level) => {
                let context = context.cascade(self.style(StyleKey::Heading(*level)));
                self.render_heading(node, key, &context)
            }
            NodeKind::HtmlAnchor => {
                let context = context.cascade(self.style(StyleKey::HtmlTagLink));
                self.render_html_anchor(element, key, &context)
            }
            NodeKind::BlockItem => {
                let context = context.cascade(self.style(StyleKey::BlockItem));
                self.render_text(node, key, &context)
            }
            NodeKind::Fence => {
                let context = context.cascade(self.style(StyleKey::Fence));
                self.render_fence(element, key, &context)
            }
            NodeKind::HorizontalRule => self.render_line(key),
            NodeKind::Block => self.render_block(element, key, context),
            NodeKind::UnorderedList => self.render_list(element, key, false),
            NodeKind::OrderedList => self.render_list(element, key, true),
            NodeKind::ListItem => self.render_list_item(element, key, index, context),
            NodeKind::Link => self.render_link(element, key),
            NodeKind::Image => self.render_image(element, key),
            NodeKind::Strong => {
                let context = context.cascade(self.style(StyleKey::Strong));
                self.render_text(node, key, &context)
            }
            NodeKind::Strikethrough => {
                let context = context.cascade(self.style(StyleKey::Strikethrough));
                self.render_text(node, key, &context)
            }
            NodeKind::Emphasis => {
                let context = context.cascade(self.style(StyleKey::Emphasis));
                self.render_text(node, key, &context)
            }
            NodeKind::Underline => {
                let context = context.cascade(self.style(StyleKey::Underline));
                self.render_text(node, key, &context)
            }
            NodeKind::BlockQuote => self.render_block_quote(element, key, context),
            NodeKind::Table => self.render_table(element, key),
            NodeKind::TableHead => self.render_thead(element, key),
            NodeKind::TableBody => self.render_tbody(element, key),
            NodeKind::TableHeaderCell => {
                let context = context.cascade(self.style(StyleKey::TableHeaderCell));
                self.render_th(element, key, &context)
            }
            NodeKind::TableRow => {
                let context = context.cascade(self.style(StyleKey::TableRow));
                self.render_tr(element, key, index, &context)
            }
            NodeKind::TableDataCell => {
                let context = context.cascade(self.style(StyleKey::TableDataCell));
                self.render_td(element, key, &context)
            }
            NodeKind::Heading(_) | NodeKind::Unsupported(_) => {
                if self.debug {
                    tracing::warn!(kind = %element.kind, key, "node kind is not supported");
                }
                return None;
            }
        };
        Some(rendered)
    }
}

//! Table strategies.
//!
//! Tables, heads and bodies start from a fresh context; rows and cells
//! cascade their own styles onto whatever they receive.

use super::context::StyleContext;
use super::node::RenderedNode;
use super::Renderer;
use crate::style::Style;
use crate::syntax::Element;

pub(crate) const ROW_BORDER_COLOR: &str = "#DDDDDD";
pub(crate) const EVEN_ROW_BACKGROUND: &str = "#FBFBFB";
pub(crate) const ODD_ROW_BACKGROUND: &str = "white";

fn flex_one() -> Style {
    Style {
        flex: Some(1.0),
        ..Style::default()
    }
}

/// Background for the row at `index`.
pub(crate) const fn row_background(index: usize) -> &'static str {
    if index % 2 == 0 {
        EVEN_ROW_BACKGROUND
    } else {
        ODD_ROW_BACKGROUND
    }
}

impl Renderer {
    pub(crate) fn render_table(&self, element: &Element, key: &str) -> RenderedNode {
        RenderedNode::horizontal_scroll()
            .with_key(format!("table_{key}"))
            .with_style(Style {
                margin_bottom: Some(32.0),
                ..flex_one()
            })
            .with_child(RenderedNode::view().with_style(flex_one()).with_children(
                self.walk(&element.children, Some(key), &StyleContext::new()),
            ))
    }

    pub(crate) fn render_thead(&self, element: &Element, key: &str) -> RenderedNode {
        RenderedNode::view()
            .with_key(format!("thead_{key}"))
            .with_style(Style {
                border_bottom_width: Some(1.0),
                border_color: Some(ROW_BORDER_COLOR.to_string()),
                ..flex_one()
            })
            .with_children(self.walk(&element.children, Some(key), &StyleContext::new()))
    }

    pub(crate) fn render_tbody(&self, element: &Element, key: &str) -> RenderedNode {
        RenderedNode::view()
            .with_key(format!("tbody_{key}"))
            .with_style(Style {
                background_color: Some(EVEN_ROW_BACKGROUND.to_string()),
                ..flex_one()
            })
            .with_children(self.walk(&element.children, Some(key), &StyleContext::new()))
    }

    /// Rows are striped by position: even rows and odd rows alternate.
    pub(crate) fn render_tr(
        &self,
        element: &Element,
        key: &str,
        index: usize,
        context: &StyleContext,
    ) -> RenderedNode {
        RenderedNode::view()
            .with_key(format!("tr_{key}"))
            .with_style(Style {
                flex_direction: Some("row".to_string()),
                border_bottom_width: Some(1.0),
                border_color: Some(ROW_BORDER_COLOR.to_string()),
                background_color: Some(row_background(index).to_string()),
                ..flex_one()
            })
            .with_children(self.walk(&element.children, Some(key), context))
    }

    pub(crate) fn render_th(
        &self,
        element: &Element,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        self.render_cell(element, format!("th_{key}"), key, context)
    }

    pub(crate) fn render_td(
        &self,
        element: &Element,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        self.render_cell(element, format!("td_{key}"), key, context)
    }

    fn render_cell(
        &self,
        element: &Element,
        node_key: String,
        key: &str,
        context: &StyleContext,
    ) -> RenderedNode {
        RenderedNode::view()
            .with_key(node_key)
            .with_style(Style {
                flex_direction: Some("column".to_string()),
                ..flex_one()
            })
            .with_children(self.walk(&element.children, Some(key), context))
    }
}

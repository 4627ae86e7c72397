//! Rendered node types.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::style::Style;

/// What happens when a pressable node is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Open a link through the caller's link handler
    #[serde(rename_all = "camelCase")]
    OpenLink { href: String, source_tag: String },
    /// Open the external messaging composer
    LaunchMessenger,
}

/// The visual primitive a node is painted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Primitive {
    View,
    Text,
    Pressable { action: Action },
    Image { uri: String },
    HorizontalScroll,
}

impl Primitive {
    /// Short display name, used in debug outlines.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Text => "Text",
            Self::Pressable { .. } => "Pressable",
            Self::Image { .. } => "Image",
            Self::HorizontalScroll => "ScrollView",
        }
    }
}

/// One node of the rendered tree.
///
/// Children keep a slot per walked syntax node: `None` marks a node that
/// rendered nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    primitive: Primitive,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    styles: Vec<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Option<RenderedNode>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    props: BTreeMap<String, serde_json::Value>,
}

impl RenderedNode {
    pub const fn new(primitive: Primitive) -> Self {
        Self {
            key: None,
            primitive,
            styles: Vec::new(),
            text: None,
            children: Vec::new(),
            props: BTreeMap::new(),
        }
    }

    /// A container view.
    pub const fn view() -> Self {
        Self::new(Primitive::View)
    }

    /// A text leaf.
    pub fn text(content: impl Into<String>) -> Self {
        let mut node = Self::new(Primitive::Text);
        node.text = Some(content.into());
        node
    }

    /// A pressable region.
    pub const fn pressable(action: Action) -> Self {
        Self::new(Primitive::Pressable { action })
    }

    pub fn image(uri: impl Into<String>) -> Self {
        Self::new(Primitive::Image { uri: uri.into() })
    }

    pub const fn horizontal_scroll() -> Self {
        Self::new(Primitive::HorizontalScroll)
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: Vec<Style>) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.styles.push(style);
        self
    }

    /// Append a style when present; a missing style sheet entry adds nothing.
    #[must_use]
    pub fn with_optional_style(mut self, style: Option<&Style>) -> Self {
        if let Some(style) = style {
            self.styles.push(style.clone());
        }
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Option<Self>>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(Some(child));
        self
    }

    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: BTreeMap<String, serde_json::Value>) -> Self {
        self.props.extend(props);
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub const fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Text content of a text leaf.
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Option<Self>] {
        &self.children
    }

    pub fn prop(&self, name: &str) -> Option<&serde_json::Value> {
        self.props.get(name)
    }

    /// Returns true for a text leaf without children.
    pub fn is_plain_text(&self) -> bool {
        self.primitive == Primitive::Text && self.text.is_some() && self.children.is_empty()
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in self.children.iter().flatten() {
            out.push_str(&child.plain_text());
        }
        out
    }

    /// Depth-first search for the first node matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Self) -> bool) -> Option<&Self> {
        if predicate(self) {
            return Some(self);
        }
        self.children
            .iter()
            .flatten()
            .find_map(|child| child.find(predicate))
    }

    /// Every node in the subtree, depth first, including `self`.
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = vec![self];
        for child in self.children.iter().flatten() {
            out.extend(child.descendants());
        }
        out
    }

    /// Indented outline of the subtree: one line per node with its key and
    /// primitive.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, level: usize) {
        let _ = write!(
            out,
            "{}> {}, NODE TYPE: {}",
            "-".repeat(level),
            self.key.as_deref().unwrap_or("-"),
            self.primitive.display_name()
        );
        if let Some(text) = &self.text {
            let _ = write!(out, " {text:?}");
        }
        out.push('\n');
        for child in self.children.iter().flatten() {
            child.write_outline(out, level + 1);
        }
    }
}

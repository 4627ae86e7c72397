//! Syntax tree types handed from the parser to the render engine.

use std::fmt;

/// Heading levels supported by markdown (`h1` through `h6`).
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Discriminant of a syntax element.
///
/// The set is closed: anything the parser emits that the engine cannot
/// render ends up as [`NodeKind::Unsupported`] with its original tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Heading with level (1-6)
    Heading(u8),
    /// Inline `<a ...>` HTML tag folded with its content
    HtmlAnchor,
    /// Opaque line of block content (code lines, raw HTML blocks)
    BlockItem,
    /// Fenced or indented code block
    Fence,
    HorizontalRule,
    /// Generic block container (paragraphs)
    Block,
    UnorderedList,
    OrderedList,
    ListItem,
    Link,
    Image,
    Strong,
    Strikethrough,
    Emphasis,
    Underline,
    BlockQuote,
    Table,
    TableHead,
    TableBody,
    TableHeaderCell,
    TableRow,
    TableDataCell,
    /// A kind the engine does not render
    Unsupported(String),
}

impl NodeKind {
    /// Map a string tag to its kind.
    ///
    /// Unknown tags, and heading tags outside `h1..=h6`, become
    /// [`NodeKind::Unsupported`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "htmlTagLink" => Self::HtmlAnchor,
            "blockItem" => Self::BlockItem,
            "fence" => Self::Fence,
            "hr" => Self::HorizontalRule,
            "div" => Self::Block,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "a" => Self::Link,
            "img" => Self::Image,
            "strong" => Self::Strong,
            "del" => Self::Strikethrough,
            "em" => Self::Emphasis,
            "u" => Self::Underline,
            "blockquote" => Self::BlockQuote,
            "table" => Self::Table,
            "thead" => Self::TableHead,
            "tbody" => Self::TableBody,
            "th" => Self::TableHeaderCell,
            "tr" => Self::TableRow,
            "td" => Self::TableDataCell,
            other => other
                .strip_prefix('h')
                .and_then(|level| level.parse::<u8>().ok())
                .filter(|level| (1..=MAX_HEADING_LEVEL).contains(level))
                .map_or_else(|| Self::Unsupported(other.to_string()), Self::Heading),
        }
    }

    /// The string tag for this kind.
    pub fn tag(&self) -> String {
        let tag = match self {
            Self::Heading(level) => return format!("h{level}"),
            Self::Unsupported(tag) => return tag.clone(),
            Self::HtmlAnchor => "htmlTagLink",
            Self::BlockItem => "blockItem",
            Self::Fence => "fence",
            Self::HorizontalRule => "hr",
            Self::Block => "div",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::ListItem => "li",
            Self::Link => "a",
            Self::Image => "img",
            Self::Strong => "strong",
            Self::Strikethrough => "del",
            Self::Emphasis => "em",
            Self::Underline => "u",
            Self::BlockQuote => "blockquote",
            Self::Table => "table",
            Self::TableHead => "thead",
            Self::TableBody => "tbody",
            Self::TableHeaderCell => "th",
            Self::TableRow => "tr",
            Self::TableDataCell => "td",
        };
        tag.to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

/// Kind-specific attributes of a syntax element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Link target
    pub href: Option<String>,
    /// Image source
    pub src: Option<String>,
    /// Image alt text
    pub alt: Option<String>,
    /// Link or image title
    pub title: Option<String>,
    /// HTML `class` attribute (inline anchors)
    pub class: Option<String>,
    /// Code block info string language
    pub language: Option<String>,
}

/// A syntax element: a kind, its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: NodeKind,
    pub attributes: Attributes,
    pub children: Vec<SyntaxNode>,
}

impl Element {
    pub const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes {
                href: None,
                src: None,
                alt: None,
                title: None,
                class: None,
                language: None,
            },
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A node of the parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// Bare text run (a node without a kind)
    Text(String),
    Element(Element),
}

impl SyntaxNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn element(kind: NodeKind, children: Vec<Self>) -> Self {
        Self::Element(Element::new(kind).with_children(children))
    }

    /// The element kind, or `None` for a bare text run.
    pub const fn kind(&self) -> Option<&NodeKind> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => Some(&element.kind),
        }
    }

    pub fn children(&self) -> &[Self] {
        match self {
            Self::Text(_) => &[],
            Self::Element(element) => &element.children,
        }
    }

    /// Returns true for the empty placeholder values parsers leave behind:
    /// an empty string or the strings `"null"` and `"undefined"`.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty() || text == "null" || text == "undefined")
    }

    /// Concatenated text of this node and all its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }
}

//! Markdown parsing with comrak.
//!
//! comrak owns the markdown grammar. This module only folds its AST into
//! the closed [`SyntaxNode`] model the render engine consumes.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Attributes, Element, NodeKind, SyntaxNode};

static ANCHOR_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^<a(?:\s+([^>]*))?>$").expect("valid anchor regex"));
static ANCHOR_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^</a\s*>$").expect("valid anchor regex"));
static HTML_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)([a-z][a-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});

/// Parser mode switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse as inline content: top-level paragraphs are flattened into
    /// their inline children.
    ///
    /// Block rules stay on: headings, lists, quotes, fences and tables still
    /// parse as blocks. Only the paragraph wrapper is dropped.
    pub inline: bool,
}

/// Parse markdown source into the ordered sequence of root syntax nodes.
///
/// # Example
///
/// ```
/// use marktree::syntax::{NodeKind, ParseOptions, parse};
///
/// let nodes = parse("# Hello\n\nWorld", &ParseOptions::default());
/// assert_eq!(nodes[0].kind(), Some(&NodeKind::Heading(1)));
/// ```
pub fn parse(source: &str, options: &ParseOptions) -> Vec<SyntaxNode> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());
    to_tree(root, options)
}

/// Convert a parsed comrak document into root syntax nodes.
pub fn to_tree<'a>(root: &'a AstNode<'a>, options: &ParseOptions) -> Vec<SyntaxNode> {
    let builder = TreeBuilder;
    let mut nodes = Vec::new();
    for child in root.children() {
        let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
        if options.inline && is_paragraph {
            nodes.extend(builder.inline_children(child));
        } else {
            builder.convert(child, false, &mut nodes);
        }
    }
    nodes
}

fn create_options() -> Options {
    let mut options = Options::default();

    // GFM extensions the engine has render strategies for
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.underline = true;

    options
}

struct TreeBuilder;

impl TreeBuilder {
    fn convert<'a>(&self, node: &'a AstNode<'a>, tight: bool, out: &mut Vec<SyntaxNode>) {
        match &node.data.borrow().value {
            NodeValue::Text(text) => out.push(SyntaxNode::text(text.to_string())),
            NodeValue::SoftBreak => out.push(SyntaxNode::text(" ")),
            NodeValue::LineBreak => out.push(SyntaxNode::text("\n")),
            NodeValue::Code(code) => out.push(SyntaxNode::text(code.literal.clone())),

            NodeValue::Paragraph => {
                // Tight list items carry their text directly.
                if tight {
                    out.extend(self.inline_children(node));
                } else {
                    out.push(self.element(NodeKind::Block, node));
                }
            }

            NodeValue::Heading(heading) => {
                out.push(self.element(NodeKind::Heading(heading.level), node));
            }

            NodeValue::Emph => out.push(self.element(NodeKind::Emphasis, node)),
            NodeValue::Strong => out.push(self.element(NodeKind::Strong, node)),
            NodeValue::Strikethrough => out.push(self.element(NodeKind::Strikethrough, node)),
            NodeValue::Underline => out.push(self.element(NodeKind::Underline, node)),
            NodeValue::BlockQuote => out.push(self.element(NodeKind::BlockQuote, node)),
            NodeValue::ThematicBreak => {
                out.push(SyntaxNode::Element(Element::new(NodeKind::HorizontalRule)));
            }

            NodeValue::Link(link) => {
                let attributes = Attributes {
                    href: Some(link.url.clone()),
                    title: non_empty(&link.title),
                    ..Attributes::default()
                };
                out.push(SyntaxNode::Element(
                    Element::new(NodeKind::Link)
                        .with_attributes(attributes)
                        .with_children(self.inline_children(node)),
                ));
            }

            NodeValue::Image(link) => {
                let alt = self.inline_children(node)
                    .iter()
                    .map(SyntaxNode::plain_text)
                    .collect::<String>();
                let attributes = Attributes {
                    src: Some(link.url.clone()),
                    alt: non_empty(&alt),
                    title: non_empty(&link.title),
                    ..Attributes::default()
                };
                out.push(SyntaxNode::Element(
                    Element::new(NodeKind::Image).with_attributes(attributes),
                ));
            }

            NodeValue::List(list) => {
                let kind = match list.list_type {
                    ListType::Bullet => NodeKind::UnorderedList,
                    ListType::Ordered => NodeKind::OrderedList,
                };
                let mut items = Vec::new();
                for child in node.children() {
                    self.convert(child, list.tight, &mut items);
                }
                out.push(SyntaxNode::element(kind, items));
            }

            NodeValue::Item(_) | NodeValue::TaskItem(_) => {
                let mut children = Vec::new();
                for child in node.children() {
                    self.convert(child, tight, &mut children);
                }
                out.push(SyntaxNode::element(NodeKind::ListItem, children));
            }

            NodeValue::CodeBlock(code_block) => {
                let language = code_block
                    .info
                    .split_whitespace()
                    .next()
                    .map(ToString::to_string);
                let lines = code_block
                    .literal
                    .lines()
                    .map(|line| {
                        SyntaxNode::element(NodeKind::BlockItem, vec![SyntaxNode::text(line)])
                    })
                    .collect();
                out.push(SyntaxNode::Element(
                    Element::new(NodeKind::Fence)
                        .with_attributes(Attributes {
                            language,
                            ..Attributes::default()
                        })
                        .with_children(lines),
                ));
            }

            NodeValue::HtmlBlock(html) => {
                out.push(SyntaxNode::element(
                    NodeKind::BlockItem,
                    vec![SyntaxNode::text(html.literal.trim_end())],
                ));
            }

            NodeValue::Table(_) => out.push(self.table(node)),

            other => {
                let mut children = Vec::new();
                for child in node.children() {
                    self.convert(child, tight, &mut children);
                }
                out.push(SyntaxNode::element(
                    NodeKind::Unsupported(unsupported_tag(other).to_string()),
                    children,
                ));
            }
        }
    }

    fn element<'a>(&self, kind: NodeKind, node: &'a AstNode<'a>) -> SyntaxNode {
        let children = if matches!(kind, NodeKind::BlockQuote) {
            let mut blocks = Vec::new();
            for child in node.children() {
                self.convert(child, false, &mut blocks);
            }
            blocks
        } else {
            self.inline_children(node)
        };
        SyntaxNode::element(kind, children)
    }

    /// Convert inline children, folding `<a ...>` ... `</a>` HTML runs into
    /// a single [`NodeKind::HtmlAnchor`] element.
    fn inline_children<'a>(&self, node: &'a AstNode<'a>) -> Vec<SyntaxNode> {
        let mut out = Vec::new();
        let mut open_anchor: Option<Element> = None;

        for child in node.children() {
            let html = match &child.data.borrow().value {
                NodeValue::HtmlInline(html) => Some(html.trim().to_string()),
                _ => None,
            };

            if let Some(html) = html.as_deref() {
                if let Some(captures) = ANCHOR_OPEN.captures(html) {
                    if let Some(anchor) = open_anchor.take() {
                        out.push(SyntaxNode::Element(anchor));
                    }
                    let attributes = captures
                        .get(1)
                        .map_or_else(Attributes::default, |m| anchor_attributes(m.as_str()));
                    open_anchor = Some(Element::new(NodeKind::HtmlAnchor).with_attributes(attributes));
                    continue;
                }
                if ANCHOR_CLOSE.is_match(html)
                    && let Some(anchor) = open_anchor.take()
                {
                    out.push(SyntaxNode::Element(anchor));
                    continue;
                }
            }

            match open_anchor.as_mut() {
                Some(anchor) => self.convert(child, false, &mut anchor.children),
                None => self.convert(child, false, &mut out),
            }
        }

        // An anchor left open at the end of its parent still owns what followed it.
        if let Some(anchor) = open_anchor {
            out.push(SyntaxNode::Element(anchor));
        }
        out
    }

    /// Group comrak's header-flagged rows into head and body sections.
    fn table<'a>(&self, node: &'a AstNode<'a>) -> SyntaxNode {
        let mut head = Vec::new();
        let mut body = Vec::new();
        for row in node.children() {
            let header = match row.data.borrow().value {
                NodeValue::TableRow(header) => header,
                _ => continue,
            };
            let cell_kind = if header {
                NodeKind::TableHeaderCell
            } else {
                NodeKind::TableDataCell
            };
            let cells = row
                .children()
                .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
                .map(|cell| SyntaxNode::element(cell_kind.clone(), self.inline_children(cell)))
                .collect();
            let row = SyntaxNode::element(NodeKind::TableRow, cells);
            if header {
                head.push(row);
            } else {
                body.push(row);
            }
        }

        let mut sections = Vec::new();
        if !head.is_empty() {
            sections.push(SyntaxNode::element(NodeKind::TableHead, head));
        }
        if !body.is_empty() {
            sections.push(SyntaxNode::element(NodeKind::TableBody, body));
        }
        SyntaxNode::element(NodeKind::Table, sections)
    }
}

fn anchor_attributes(raw: &str) -> Attributes {
    let mut attributes = Attributes::default();
    for captures in HTML_ATTRIBUTE.captures_iter(raw) {
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .or_else(|| captures.get(4))
            .map(|m| m.as_str().to_string());
        match captures[1].to_ascii_lowercase().as_str() {
            "class" => attributes.class = value,
            "href" => attributes.href = value,
            "title" => attributes.title = value,
            _ => {}
        }
    }
    attributes
}

/// Tag recorded for comrak nodes the syntax model has no kind for.
fn unsupported_tag(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::Document => "document",
        NodeValue::FrontMatter(_) => "frontmatter",
        NodeValue::HtmlInline(_) => "html_inline",
        NodeValue::FootnoteDefinition(_) => "footnote_definition",
        NodeValue::FootnoteReference(_) => "footnote_reference",
        NodeValue::DescriptionList => "description_list",
        NodeValue::DescriptionItem(_) => "description_item",
        NodeValue::DescriptionTerm => "description_term",
        NodeValue::DescriptionDetails => "description_details",
        NodeValue::Superscript => "superscript",
        NodeValue::Math(_) => "math",
        NodeValue::MultilineBlockQuote(_) => "multiline_block_quote",
        NodeValue::Escaped => "escaped",
        NodeValue::WikiLink(_) => "wikilink",
        NodeValue::TableRow(_) => "table_row",
        NodeValue::TableCell => "table_cell",
        _ => "unknown",
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

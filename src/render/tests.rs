use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::*;
use crate::style::{Style, default_style_sheet};
use crate::syntax::{Attributes, Element, MAX_HEADING_LEVEL, NodeKind, SyntaxNode};

fn renderer() -> Renderer {
    Renderer::new(Arc::new(default_style_sheet()), Hooks::new())
}

fn render(renderer: &Renderer, nodes: &[SyntaxNode]) -> RenderedNode {
    renderer.render(nodes, &BTreeMap::new())
}

fn text(s: &str) -> SyntaxNode {
    SyntaxNode::text(s)
}

fn el(kind: NodeKind, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::element(kind, children)
}

fn with_attributes(kind: NodeKind, attributes: Attributes, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::Element(
        Element::new(kind)
            .with_attributes(attributes)
            .with_children(children),
    )
}

fn by_key<'a>(root: &'a RenderedNode, key: &str) -> &'a RenderedNode {
    root.find(&|node| node.key() == Some(key))
        .unwrap_or_else(|| panic!("no node with key {key}:\n{}", root.outline()))
}

fn sheet_style(name: &str) -> Style {
    default_style_sheet().get_named(name).cloned().unwrap()
}

#[test]
fn test_walk_keeps_length_and_order() {
    let renderer = renderer();
    let nodes = vec![
        el(NodeKind::Block, vec![text("first")]),
        el(NodeKind::Unsupported("footnote".to_string()), vec![]),
        text(""),
        el(NodeKind::Block, vec![text("second")]),
    ];
    let rendered = renderer.walk(&nodes, None, &StyleContext::new());

    assert_eq!(rendered.len(), nodes.len());
    assert_eq!(rendered[0].as_ref().unwrap().plain_text(), "first");
    assert!(rendered[1].is_none());
    assert!(rendered[2].is_none());
    assert_eq!(rendered[3].as_ref().unwrap().plain_text(), "second");
}

#[test]
fn test_walk_builds_positional_keys() {
    let renderer = renderer();
    let nodes = vec![text("a"), text("b")];

    let root_level = renderer.walk(&nodes, None, &StyleContext::new());
    assert_eq!(root_level[1].as_ref().unwrap().key(), Some("1"));

    let nested = renderer.walk(&nodes, Some("3_2"), &StyleContext::new());
    assert_eq!(nested[0].as_ref().unwrap().key(), Some("3_2_0"));
    assert_eq!(nested[1].as_ref().unwrap().key(), Some("3_2_1"));
}

#[test]
fn test_dispatch_absent_and_sentinel_nodes_render_nothing() {
    let renderer = renderer();
    let context = StyleContext::new();
    assert!(renderer.dispatch_node(None, "0", 0, &context).is_none());
    for sentinel in ["", "null", "undefined"] {
        assert!(
            renderer
                .dispatch_node(Some(&text(sentinel)), "0", 0, &context)
                .is_none(),
            "{sentinel:?} should render nothing"
        );
    }
}

#[test]
fn test_unsupported_kind_renders_nothing_with_and_without_debug() {
    let node = el(NodeKind::from_tag("marquee"), vec![text("scrolling")]);
    for debug in [false, true] {
        let renderer = renderer().with_debug(debug);
        assert!(
            renderer
                .dispatch_node(Some(&node), "0", 0, &StyleContext::new())
                .is_none()
        );
    }
}

#[test]
fn test_heading_level_out_of_range_renders_nothing() {
    for level in [0, MAX_HEADING_LEVEL + 1, 9] {
        let node = el(NodeKind::Heading(level), vec![text("too deep")]);
        for debug in [false, true] {
            let renderer = renderer().with_debug(debug);
            assert!(
                renderer
                    .dispatch_node(Some(&node), "0", 0, &StyleContext::new())
                    .is_none(),
                "h{level} should not render"
            );
        }
    }
    assert!(
        renderer()
            .dispatch_node(
                Some(&el(NodeKind::Heading(MAX_HEADING_LEVEL), vec![text("ok")])),
                "0",
                0,
                &StyleContext::new(),
            )
            .is_some()
    );
}

#[test]
fn test_rendering_is_idempotent() {
    let renderer = renderer();
    let nodes = crate::syntax::parse(
        "# Title\n\n- one\n- two\n\n> quote\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
        &crate::syntax::ParseOptions::default(),
    );
    assert_eq!(render(&renderer, &nodes), render(&renderer, &nodes));
}

#[test]
fn test_plain_text_gets_base_style_only() {
    let renderer = renderer();
    let leaf = renderer
        .dispatch_node(Some(&text("hi")), "0", 0, &StyleContext::new())
        .unwrap();
    assert_eq!(leaf.primitive(), &Primitive::Text);
    assert_eq!(leaf.text_content(), Some("hi"));
    assert_eq!(leaf.styles(), &[sheet_style("text")]);
}

#[test]
fn test_styles_accumulate_outer_to_inner() {
    let renderer = renderer();
    let nodes = vec![el(
        NodeKind::BlockQuote,
        vec![el(
            NodeKind::Heading(1),
            vec![el(NodeKind::Strong, vec![text("bold")])],
        )],
    )];
    let root = render(&renderer, &nodes);
    let leaf = root
        .find(&|node| node.text_content() == Some("bold"))
        .unwrap();
    assert_eq!(
        leaf.styles(),
        &[sheet_style("text"), sheet_style("h1"), sheet_style("strong")]
    );
}

#[test]
fn test_wrapper_container_is_unstyled() {
    let renderer = renderer();
    let node = el(NodeKind::Emphasis, vec![text("x")]);
    let rendered = renderer
        .dispatch_node(Some(&node), "4", 4, &StyleContext::new())
        .unwrap();
    assert_eq!(rendered.primitive(), &Primitive::View);
    assert!(rendered.styles().is_empty());
    let leaf = rendered.children()[0].as_ref().unwrap();
    assert_eq!(leaf.key(), Some("4_0"));
    assert_eq!(leaf.styles(), &[sheet_style("text"), sheet_style("em")]);
}

#[test]
fn test_heading_is_wrapped_full_width() {
    let renderer = renderer();
    let root = render(&renderer, &[el(NodeKind::Heading(2), vec![text("Title")])]);
    let heading = by_key(&root, "heading_0");
    assert_eq!(
        heading.styles()[0].width,
        Some(crate::style::Dimension::percent(100))
    );
    let leaf = by_key(&root, "0_0");
    assert_eq!(leaf.styles(), &[sheet_style("text"), sheet_style("h2")]);
}

#[test]
fn test_missing_styles_degrade_to_unstyled() {
    let renderer = Renderer::new(Arc::new(StyleSheet::new()), Hooks::new());
    let node = el(NodeKind::Strong, vec![text("x")]);
    let rendered = renderer
        .dispatch_node(Some(&node), "0", 0, &StyleContext::new())
        .unwrap();
    let leaf = rendered.children()[0].as_ref().unwrap();
    assert!(leaf.styles().iter().all(Style::is_empty));
}

#[test]
fn test_link_override_result_is_returned_verbatim() {
    let sentinel = RenderedNode::text("SENTINEL").with_key("custom");
    let expected = sentinel.clone();
    let seen = Arc::new(Mutex::new(None));
    let seen_by_hook = Arc::clone(&seen);
    let hooks = Hooks::new().with_link_renderer(
        move |href: &str, title: Option<&str>, children: Vec<Option<RenderedNode>>| {
            *seen_by_hook.lock().unwrap() = Some((
                href.to_string(),
                title.map(ToString::to_string),
                children.len(),
            ));
            sentinel.clone()
        },
    );
    let renderer = Renderer::new(Arc::new(default_style_sheet()), hooks);
    let link = with_attributes(
        NodeKind::Link,
        Attributes {
            href: Some("https://example.com".to_string()),
            title: Some("Example".to_string()),
            ..Attributes::default()
        },
        vec![text("click"), text(" here")],
    );

    let rendered = renderer
        .dispatch_node(Some(&link), "0", 0, &StyleContext::new())
        .unwrap();
    assert_eq!(rendered, expected);
    assert_eq!(
        *seen.lock().unwrap(),
        Some((
            "https://example.com".to_string(),
            Some("Example".to_string()),
            2
        ))
    );
}

#[test]
fn test_default_link_is_pressable_and_activates_handler() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);
    let hooks = Hooks::new().with_link_handler(move |href: &str, source: &str| {
        recorded
            .lock()
            .unwrap()
            .push((href.to_string(), source.to_string()));
    });
    let renderer =
        Renderer::new(Arc::new(default_style_sheet()), hooks).with_link_source_tag("Elice");
    let link = with_attributes(
        NodeKind::Link,
        Attributes {
            href: Some("https://example.com".to_string()),
            ..Attributes::default()
        },
        vec![text("docs")],
    );
    let rendered = renderer
        .dispatch_node(Some(&link), "2", 2, &StyleContext::new())
        .unwrap();

    assert_eq!(rendered.key(), Some("linkWrapper_2"));
    let Primitive::Pressable { action } = rendered.primitive() else {
        panic!("expected pressable, got {:?}", rendered.primitive());
    };
    let leaf = rendered.children()[0].as_ref().unwrap();
    assert_eq!(leaf.styles(), &[sheet_style("text"), sheet_style("link")]);

    renderer.activate(action);
    assert_eq!(
        *calls.lock().unwrap(),
        vec![("https://example.com".to_string(), "Elice".to_string())]
    );
}

#[test]
fn test_link_ignores_ancestor_styles() {
    let renderer = renderer();
    let nodes = vec![el(
        NodeKind::Strong,
        vec![with_attributes(
            NodeKind::Link,
            Attributes {
                href: Some("/x".to_string()),
                ..Attributes::default()
            },
            vec![text("in link")],
        )],
    )];
    let root = render(&renderer, &nodes);
    let leaf = root
        .find(&|node| node.text_content() == Some("in link"))
        .unwrap();
    assert_eq!(leaf.styles(), &[sheet_style("text"), sheet_style("link")]);
}

#[test]
fn test_activate_without_handler_is_ignored() {
    let renderer = renderer();
    renderer.activate(&Action::OpenLink {
        href: "https://example.com".to_string(),
        source_tag: DEFAULT_LINK_SOURCE_TAG.to_string(),
    });
    renderer.activate(&Action::LaunchMessenger);
}

#[test]
fn test_image_default_and_override() {
    let image = with_attributes(
        NodeKind::Image,
        Attributes {
            src: Some("cat.png".to_string()),
            alt: Some("A cat".to_string()),
            ..Attributes::default()
        },
        vec![],
    );

    let rendered = renderer()
        .dispatch_node(Some(&image), "1", 1, &StyleContext::new())
        .unwrap();
    assert_eq!(rendered.key(), Some("imageWrapper_1"));
    let inner = rendered.children()[0].as_ref().unwrap();
    assert_eq!(
        inner.primitive(),
        &Primitive::Image {
            uri: "cat.png".to_string()
        }
    );
    assert_eq!(inner.prop("resizeMode"), Some(&serde_json::json!("contain")));

    let hooks = Hooks::new().with_image_renderer(
        |src: &str, alt: Option<&str>, title: Option<&str>| {
            RenderedNode::text(format!("{src}|{}|{}", alt.unwrap_or("-"), title.unwrap_or("-")))
        },
    );
    let renderer = Renderer::new(Arc::new(default_style_sheet()), hooks);
    let rendered = renderer
        .dispatch_node(Some(&image), "1", 1, &StyleContext::new())
        .unwrap();
    assert_eq!(rendered, RenderedNode::text("cat.png|A cat|-"));
}

#[test]
fn test_horizontal_rule() {
    let rendered = renderer()
        .dispatch_node(
            Some(&el(NodeKind::HorizontalRule, vec![])),
            "5",
            5,
            &StyleContext::new(),
        )
        .unwrap();
    assert_eq!(rendered.key(), Some("hr_5"));
    assert_eq!(rendered.styles(), &[sheet_style("hr")]);
}

fn list(kind: NodeKind, count: usize) -> SyntaxNode {
    el(
        kind,
        (0..count)
            .map(|i| el(NodeKind::ListItem, vec![text(&format!("item {i}"))]))
            .collect(),
    )
}

fn marker_of(item: &RenderedNode) -> &RenderedNode {
    item.children()[0].as_ref().unwrap()
}

#[test]
fn test_ordered_list_numbers_items() {
    let renderer = renderer();
    let rendered = renderer
        .dispatch_node(
            Some(&list(NodeKind::OrderedList, 4)),
            "0",
            0,
            &StyleContext::new(),
        )
        .unwrap();
    assert_eq!(rendered.key(), Some("list_0"));

    for (index, item) in rendered.children().iter().enumerate() {
        let item = item.as_ref().unwrap();
        assert_eq!(item.key().unwrap(), format!("listItem_0_{index}"));
        let marker = marker_of(item);
        assert_eq!(marker.text_content().unwrap(), format!("{}.", index + 1));
        assert_eq!(marker.styles(), &[sheet_style("listItemNumber")]);
    }
    let third = rendered.children()[2].as_ref().unwrap();
    assert_eq!(marker_of(third).text_content(), Some("3."));
}

#[test]
fn test_unordered_list_uses_bullet_view() {
    let rendered = renderer()
        .dispatch_node(
            Some(&list(NodeKind::UnorderedList, 2)),
            "0",
            0,
            &StyleContext::new(),
        )
        .unwrap();
    let item = rendered.children()[1].as_ref().unwrap();
    let marker = marker_of(item);
    assert_eq!(marker.primitive(), &Primitive::View);
    assert_eq!(marker.key(), Some("listBullet_1"));
    assert_eq!(marker.styles(), &[sheet_style("listItemBullet")]);

    let content = item.children()[1].as_ref().unwrap();
    assert_eq!(content.key(), Some("listItemContent_0_1"));
    assert_eq!(content.plain_text(), "item 1");
}

#[test]
fn test_list_item_is_a_row() {
    let rendered = renderer()
        .dispatch_node(
            Some(&list(NodeKind::UnorderedList, 1)),
            "0",
            0,
            &StyleContext::new(),
        )
        .unwrap();
    let item = rendered.children()[0].as_ref().unwrap();
    assert_eq!(
        crate::style::flatten(item.styles()).flex_direction.as_deref(),
        Some("row")
    );
}

#[test]
fn test_bullet_override_replaces_marker() {
    let hooks = Hooks::new().with_bullet_renderer(|ordered: bool, index: usize| {
        RenderedNode::text(format!("{}{index}", if ordered { "#" } else { "*" }))
    });
    let renderer = Renderer::new(Arc::new(default_style_sheet()), hooks);
    for (kind, expected) in [(NodeKind::OrderedList, "#1"), (NodeKind::UnorderedList, "*1")] {
        let rendered = renderer
            .dispatch_node(Some(&list(kind, 2)), "0", 0, &StyleContext::new())
            .unwrap();
        let item = rendered.children()[1].as_ref().unwrap();
        assert_eq!(marker_of(item).text_content(), Some(expected));
    }
}

#[test]
fn test_nested_list_restarts_numbering() {
    let nested = el(
        NodeKind::OrderedList,
        vec![
            el(NodeKind::ListItem, vec![text("a")]),
            el(
                NodeKind::ListItem,
                vec![text("b"), list(NodeKind::UnorderedList, 1)],
            ),
        ],
    );
    let root = render(&renderer(), &[nested]);
    let inner_item = by_key(&root, "listItem_0_1_1_0");
    assert_eq!(marker_of(inner_item).primitive(), &Primitive::View);
}

#[test]
fn test_table_rows_alternate_background() {
    let rows = (0..5)
        .map(|i| el(NodeKind::TableRow, vec![el(NodeKind::TableDataCell, vec![text(&i.to_string())])]))
        .collect();
    let table = el(NodeKind::Table, vec![el(NodeKind::TableBody, rows)]);
    let root = render(&renderer(), &[table]);

    for index in 0..5 {
        let row = by_key(&root, &format!("tr_0_0_{index}"));
        let background = crate::style::flatten(row.styles()).background_color.unwrap();
        let expected = if index % 2 == 0 { "#FBFBFB" } else { "white" };
        assert_eq!(background, expected, "row {index}");
    }
}

#[test]
fn test_table_sections_and_cells() {
    let nodes = crate::syntax::parse(
        "| Name | Qty |\n|---|---|\n| apple | 3 |\n",
        &crate::syntax::ParseOptions::default(),
    );
    let root = render(&renderer(), &nodes);

    let table = by_key(&root, "table_0");
    assert_eq!(table.primitive(), &Primitive::HorizontalScroll);

    let head = by_key(&root, "thead_0_0");
    assert_eq!(head.styles()[0].border_bottom_width, Some(1.0));
    let body = by_key(&root, "tbody_0_1");
    assert_eq!(body.styles()[0].background_color.as_deref(), Some("#FBFBFB"));

    let header_text = root
        .find(&|node| node.text_content() == Some("Name"))
        .unwrap();
    assert_eq!(
        header_text.styles(),
        &[sheet_style("text"), sheet_style("tr"), sheet_style("th")]
    );
    let cell_text = root
        .find(&|node| node.text_content() == Some("apple"))
        .unwrap();
    assert_eq!(
        cell_text.styles(),
        &[sheet_style("text"), sheet_style("tr"), sheet_style("td")]
    );
}

fn quoted_keys(root: &RenderedNode) -> Vec<String> {
    root.descendants()
        .into_iter()
        .filter_map(RenderedNode::key)
        .filter(|key| key.starts_with("blockQuote_"))
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_block_quote_styles_only_its_own_level() {
    let nodes = vec![el(
        NodeKind::BlockQuote,
        vec![el(NodeKind::Block, vec![text("quoted paragraph")])],
    )];
    let root = render(&renderer(), &nodes);
    assert_eq!(quoted_keys(&root), vec!["blockQuote_0"]);

    let quote = by_key(&root, "blockQuote_0");
    assert_eq!(quote.styles(), &[sheet_style("block"), sheet_style("blockQuote")]);
    // The paragraph inside renders as a plain block.
    let inner = by_key(&root, "block_0_0");
    assert_eq!(inner.styles(), &[sheet_style("block")]);
}

#[test]
fn test_nested_block_quotes_are_styled_at_each_level() {
    let nodes = vec![el(
        NodeKind::BlockQuote,
        vec![el(
            NodeKind::Block,
            vec![el(
                NodeKind::BlockQuote,
                vec![el(NodeKind::Block, vec![text("deep")])],
            )],
        )],
    )];
    let root = render(&renderer(), &nodes);
    assert_eq!(quoted_keys(&root), vec!["blockQuote_0", "blockQuote_0_0_0"]);
    assert_eq!(by_key(&root, "block_0_0").styles(), &[sheet_style("block")]);
    assert_eq!(by_key(&root, "block_0_0_0_0").styles(), &[sheet_style("block")]);
}

#[test]
fn test_block_quote_with_single_text_uses_quote_text() {
    let nodes = vec![el(NodeKind::BlockQuote, vec![text("just words")])];
    let root = render(&renderer(), &nodes);
    let quote = by_key(&root, "blockQuote_0");
    let content = quote.children()[0].as_ref().unwrap();
    assert_eq!(content.primitive(), &Primitive::Text);
    assert_eq!(content.styles(), &[sheet_style("blockQuoteText")]);
    assert_eq!(content.plain_text(), "just words");
}

#[test]
fn test_block_quote_with_mixed_content_is_centered() {
    let nodes = vec![el(
        NodeKind::BlockQuote,
        vec![el(NodeKind::Block, vec![text("one")]), el(NodeKind::Block, vec![text("two")])],
    )];
    let root = render(&renderer(), &nodes);
    let content = by_key(&root, "blockQuote_0").children()[0].as_ref().unwrap();
    assert_eq!(content.primitive(), &Primitive::View);
    assert_eq!(content.styles()[0].align_items.as_deref(), Some("center"));
    assert_eq!(content.children().len(), 2);
}

#[test]
fn test_fence_renders_dark_box_of_lines() {
    let fence = el(
        NodeKind::Fence,
        vec![
            el(NodeKind::BlockItem, vec![text("fn main() {}")]),
            el(NodeKind::BlockItem, vec![text("")]),
        ],
    );
    let root = render(&renderer(), &[fence]);
    let frame = by_key(&root, "block_0");
    let flat = crate::style::flatten(frame.styles());
    assert_eq!(flat.background_color.as_deref(), Some("#444444"));
    assert_eq!(flat.padding, Some(30.0));
    assert_eq!(flat.overflow.as_deref(), Some("hidden"));

    let line = root
        .find(&|node| node.text_content() == Some("fn main() {}"))
        .unwrap();
    assert_eq!(
        line.styles(),
        &[sheet_style("text"), sheet_style("fence"), sheet_style("blockItem")]
    );
    // The empty line is a sentinel and renders nothing.
    let second = by_key(&root, "0_1");
    assert_eq!(second.children().len(), 1);
    assert!(second.children()[0].is_none());
}

#[test]
fn test_quoted_fence_looks_like_unquoted_fence() {
    let fence = el(NodeKind::Fence, vec![el(NodeKind::BlockItem, vec![text("x")])]);
    let renderer = renderer();
    let plain = renderer
        .dispatch_node(Some(&fence), "0", 0, &StyleContext::new())
        .unwrap();
    let quoted = renderer
        .dispatch_node(Some(&fence), "0", 0, &StyleContext::new().with_block_quote())
        .unwrap();
    assert_eq!(plain, quoted);
}

fn anchor(class: Option<&str>) -> SyntaxNode {
    with_attributes(
        NodeKind::HtmlAnchor,
        Attributes {
            class: class.map(ToString::to_string),
            ..Attributes::default()
        },
        vec![text("Chat with us"), text(" now")],
    )
}

#[test]
fn test_messenger_anchor_opens_composer() {
    let opened = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&opened);
    let hooks = Hooks::new().with_messenger(move || *counter.lock().unwrap() += 1);
    let renderer = Renderer::new(Arc::new(default_style_sheet()), hooks);

    let rendered = renderer
        .dispatch_node(
            Some(&anchor(Some("intercom-launcher"))),
            "0",
            0,
            &StyleContext::new(),
        )
        .unwrap();
    assert_eq!(
        rendered.primitive(),
        &Primitive::Pressable {
            action: Action::LaunchMessenger
        }
    );
    assert_eq!(rendered.plain_text(), "Chat with us now");

    let Primitive::Pressable { action } = rendered.primitive() else {
        unreachable!()
    };
    renderer.activate(action);
    assert_eq!(*opened.lock().unwrap(), 1);
}

#[test]
fn test_other_anchors_fall_back_to_text() {
    let renderer = renderer();
    for class in [None, Some("button"), Some("intercom-launcher-old")] {
        let rendered = renderer
            .dispatch_node(Some(&anchor(class)), "0", 0, &StyleContext::new())
            .unwrap();
        assert_eq!(rendered.primitive(), &Primitive::Text, "class {class:?}");
        assert_eq!(rendered.text_content(), Some("Chat with us"));
        assert_eq!(
            rendered.styles(),
            &[sheet_style("text"), sheet_style("htmlTagLink")]
        );
    }
}

#[test]
fn test_messenger_class_is_configurable() {
    let renderer = renderer().with_messenger_anchor_class("support");
    let rendered = renderer
        .dispatch_node(Some(&anchor(Some("btn support"))), "0", 0, &StyleContext::new())
        .unwrap();
    assert!(matches!(rendered.primitive(), Primitive::Pressable { .. }));
}

#[test]
fn test_render_passes_root_props_through() {
    let mut props = BTreeMap::new();
    props.insert("testID".to_string(), serde_json::json!("article"));
    let root = renderer().render(&[text("x")], &props);
    assert_eq!(root.primitive(), &Primitive::View);
    assert_eq!(root.prop("testID"), Some(&serde_json::json!("article")));
    assert_eq!(root.children().len(), 1);
}

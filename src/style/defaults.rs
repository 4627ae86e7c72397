//! Built-in style sheet.

use super::{Dimension, Style, StyleSheet};

const TEXT_COLOR: &str = "#333333";
const LINK_COLOR: &str = "#3B6FEA";
const MUTED_COLOR: &str = "#888888";
const RULE_COLOR: &str = "#DDDDDD";

fn heading(font_size: f32, margin_top: f32) -> Style {
    Style {
        font_size: Some(font_size),
        font_weight: Some("bold".to_string()),
        margin_top: Some(margin_top),
        margin_bottom: Some(8.0),
        ..Style::default()
    }
}

/// The default style sheet applied under caller overrides.
pub fn default_style_sheet() -> StyleSheet {
    StyleSheet::new()
        .with(
            "text",
            Style {
                color: Some(TEXT_COLOR.to_string()),
                font_size: Some(15.0),
                line_height: Some(22.0),
                ..Style::default()
            },
        )
        .with("h1", heading(28.0, 24.0))
        .with("h2", heading(24.0, 20.0))
        .with("h3", heading(20.0, 16.0))
        .with("h4", heading(18.0, 12.0))
        .with("h5", heading(16.0, 8.0))
        .with(
            "h6",
            Style {
                color: Some(MUTED_COLOR.to_string()),
                ..heading(14.0, 8.0)
            },
        )
        .with(
            "link",
            Style {
                color: Some(LINK_COLOR.to_string()),
                text_decoration_line: Some("underline".to_string()),
                ..Style::default()
            },
        )
        .with(
            "linkWrapper",
            Style {
                flex_direction: Some("row".to_string()),
                align_self: Some("flex-start".to_string()),
                ..Style::default()
            },
        )
        .with(
            "imageWrapper",
            Style {
                width: Some(Dimension::percent(100)),
                margin_bottom: Some(12.0),
                ..Style::default()
            },
        )
        .with(
            "image",
            Style {
                width: Some(Dimension::percent(100)),
                height: Some(Dimension::Points(200.0)),
                ..Style::default()
            },
        )
        .with(
            "hr",
            Style {
                border_bottom_width: Some(1.0),
                border_color: Some(RULE_COLOR.to_string()),
                margin_top: Some(12.0),
                margin_bottom: Some(12.0),
                ..Style::default()
            },
        )
        .with(
            "list",
            Style {
                margin_bottom: Some(8.0),
                ..Style::default()
            },
        )
        .with(
            "listItem",
            Style {
                align_items: Some("flex-start".to_string()),
                margin_bottom: Some(4.0),
                ..Style::default()
            },
        )
        .with(
            "listItemNumber",
            Style {
                color: Some(TEXT_COLOR.to_string()),
                font_weight: Some("bold".to_string()),
                margin_right: Some(6.0),
                ..Style::default()
            },
        )
        .with(
            "listItemBullet",
            Style {
                width: Some(Dimension::Points(5.0)),
                height: Some(Dimension::Points(5.0)),
                border_radius: Some(2.5),
                background_color: Some(TEXT_COLOR.to_string()),
                margin_top: Some(9.0),
                margin_right: Some(8.0),
                ..Style::default()
            },
        )
        .with(
            "listItemContent",
            Style {
                flex: Some(1.0),
                ..Style::default()
            },
        )
        .with(
            "block",
            Style {
                margin_bottom: Some(12.0),
                flex_direction: Some("row".to_string()),
                ..Style::default()
            },
        )
        .with(
            "blockQuote",
            Style {
                background_color: Some("#555555".to_string()),
                border_left_width: Some(4.0),
                border_color: Some(MUTED_COLOR.to_string()),
                padding: Some(12.0),
                ..Style::default()
            },
        )
        .with(
            "blockQuoteText",
            Style {
                color: Some("#dddddd".to_string()),
                ..Style::default()
            },
        )
        .with(
            "fence",
            Style {
                border_radius: Some(4.0),
                margin_bottom: Some(12.0),
                ..Style::default()
            },
        )
        .with(
            "blockItem",
            Style {
                color: Some("#eeeeee".to_string()),
                font_family: Some("monospace".to_string()),
                ..Style::default()
            },
        )
        .with(
            "strong",
            Style {
                font_weight: Some("bold".to_string()),
                ..Style::default()
            },
        )
        .with(
            "em",
            Style {
                font_style: Some("italic".to_string()),
                ..Style::default()
            },
        )
        .with(
            "del",
            Style {
                text_decoration_line: Some("line-through".to_string()),
                ..Style::default()
            },
        )
        .with(
            "u",
            Style {
                text_decoration_line: Some("underline".to_string()),
                ..Style::default()
            },
        )
        .with(
            "htmlTagLink",
            Style {
                color: Some(LINK_COLOR.to_string()),
                ..Style::default()
            },
        )
        .with(
            "th",
            Style {
                font_weight: Some("bold".to_string()),
                padding: Some(8.0),
                ..Style::default()
            },
        )
        .with(
            "tr",
            Style {
                font_size: Some(14.0),
                ..Style::default()
            },
        )
        .with(
            "td",
            Style {
                padding: Some(8.0),
                ..Style::default()
            },
        )
}

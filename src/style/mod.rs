//! Style objects and style sheets.
//!
//! A [`Style`] mirrors a mobile style object: every property is optional
//! and later styles in a list override earlier ones. A [`StyleSheet`] maps
//! semantic names (`h1`, `link`, `listItem`, ...) to styles.

mod defaults;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use defaults::default_style_sheet;

/// A length that is either absolute points or a percentage string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Points(f32),
    Percent(String),
}

impl Dimension {
    pub fn percent(value: u16) -> Self {
        Self::Percent(format!("{value}%"))
    }
}

macro_rules! style_properties {
    ($($(#[$meta:meta])* $field:ident: $ty:ty,)*) => {
        /// A presentational style object.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct Style {
            $(
                $(#[$meta])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
            /// Properties without a typed field, carried through verbatim
            #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
            pub extra: BTreeMap<String, serde_json::Value>,
        }

        impl Style {
            /// Layer `top` over `self`: properties set in `top` win.
            #[must_use]
            pub fn overlay(&self, top: &Self) -> Self {
                let mut extra = self.extra.clone();
                extra.extend(top.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
                Self {
                    $($field: top.$field.clone().or_else(|| self.$field.clone()),)*
                    extra,
                }
            }

            /// Returns true when no property is set.
            pub fn is_empty(&self) -> bool {
                $(self.$field.is_none() &&)* self.extra.is_empty()
            }
        }
    };
}

style_properties! {
    color: String,
    background_color: String,
    font_size: f32,
    font_weight: String,
    font_style: String,
    font_family: String,
    line_height: f32,
    text_align: String,
    text_decoration_line: String,
    margin_top: f32,
    margin_bottom: f32,
    margin_left: f32,
    margin_right: f32,
    padding: f32,
    padding_horizontal: f32,
    padding_vertical: f32,
    padding_left: f32,
    border_width: f32,
    border_bottom_width: f32,
    border_left_width: f32,
    border_color: String,
    border_radius: f32,
    flex: f32,
    flex_direction: String,
    align_items: String,
    align_self: String,
    justify_content: String,
    overflow: String,
    width: Dimension,
    height: Dimension,
}

/// Flatten a style list into one style, later entries winning.
pub fn flatten(styles: &[Style]) -> Style {
    styles
        .iter()
        .fold(Style::default(), |acc, style| acc.overlay(style))
}

const HEADING_NAMES: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Semantic style names the render strategies look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Text,
    /// Heading with level (1-6)
    Heading(u8),
    Link,
    LinkWrapper,
    Image,
    ImageWrapper,
    HorizontalRule,
    List,
    ListItem,
    ListItemNumber,
    ListItemBullet,
    ListItemContent,
    Block,
    BlockQuote,
    BlockQuoteText,
    Fence,
    BlockItem,
    Strong,
    Strikethrough,
    Emphasis,
    Underline,
    HtmlTagLink,
    TableHeaderCell,
    TableRow,
    TableDataCell,
}

impl StyleKey {
    /// The style sheet entry name for this key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Heading(level) => {
                HEADING_NAMES[usize::from(level.clamp(1, 6)) - 1]
            }
            Self::Text => "text",
            Self::Link => "link",
            Self::LinkWrapper => "linkWrapper",
            Self::Image => "image",
            Self::ImageWrapper => "imageWrapper",
            Self::HorizontalRule => "hr",
            Self::List => "list",
            Self::ListItem => "listItem",
            Self::ListItemNumber => "listItemNumber",
            Self::ListItemBullet => "listItemBullet",
            Self::ListItemContent => "listItemContent",
            Self::Block => "block",
            Self::BlockQuote => "blockQuote",
            Self::BlockQuoteText => "blockQuoteText",
            Self::Fence => "fence",
            Self::BlockItem => "blockItem",
            Self::Strong => "strong",
            Self::Strikethrough => "del",
            Self::Emphasis => "em",
            Self::Underline => "u",
            Self::HtmlTagLink => "htmlTagLink",
            Self::TableHeaderCell => "th",
            Self::TableRow => "tr",
            Self::TableDataCell => "td",
        }
    }
}

/// Mapping from semantic style names to styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet(BTreeMap<String, Style>);

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the sheet used for rendering: the built-in defaults (unless
    /// disabled) with `overrides` merged over them.
    pub fn resolve(use_default_styles: bool, overrides: &Self) -> Self {
        let base = if use_default_styles {
            default_style_sheet()
        } else {
            Self::new()
        };
        base.merged(overrides)
    }

    /// Shallow merge: every entry of `overrides` replaces the entry of the
    /// same name wholesale.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut merged = self.0.clone();
        merged.extend(overrides.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(merged)
    }

    pub fn get(&self, key: StyleKey) -> Option<&Style> {
        self.0.get(key.name())
    }

    pub fn get_named(&self, name: &str) -> Option<&Style> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, style: Style) {
        self.0.insert(name.into(), style);
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, style: Style) -> Self {
        self.insert(name, style);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Parse a style sheet from a JSON object of named style objects.
    ///
    /// # Errors
    /// Returns [`Error::InvalidStyles`] when the JSON does not describe a
    /// style sheet.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidStyles)
    }

    /// Load a style sheet from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl FromIterator<(String, Style)> for StyleSheet {
    fn from_iter<I: IntoIterator<Item = (String, Style)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

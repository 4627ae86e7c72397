//! The markdown component: owns the parsed syntax tree and resolved style
//! sheet, and re-renders only what changed.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::render::{Action, Hooks, RenderedNode, Renderer};
use crate::style::StyleSheet;
use crate::syntax::{ParseOptions, SyntaxNode};

/// Construction-time configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Report unsupported node kinds and log each rendered tree.
    pub debug: bool,
    /// Parse the source as inline content.
    pub parse_inline: bool,
    /// Style overrides, merged over the defaults.
    pub markdown_styles: StyleSheet,
    pub use_default_styles: bool,
    pub link_source_tag: String,
    pub messenger_anchor_class: String,
    /// Copied verbatim onto the root container's props.
    pub passthrough: BTreeMap<String, serde_json::Value>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            debug: false,
            parse_inline: false,
            markdown_styles: StyleSheet::new(),
            use_default_styles: true,
            link_source_tag: crate::render::DEFAULT_LINK_SOURCE_TAG.to_string(),
            messenger_anchor_class: crate::render::DEFAULT_MESSENGER_ANCHOR_CLASS.to_string(),
            passthrough: BTreeMap::new(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_parse_inline(mut self, inline: bool) -> Self {
        self.parse_inline = inline;
        self
    }

    #[must_use]
    pub fn with_markdown_styles(mut self, styles: StyleSheet) -> Self {
        self.markdown_styles = styles;
        self
    }

    #[must_use]
    pub const fn with_default_styles(mut self, enabled: bool) -> Self {
        self.use_default_styles = enabled;
        self
    }

    #[must_use]
    pub fn with_passthrough(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.passthrough.insert(name.into(), value);
        self
    }
}

/// What an [`Markdown::update`] call recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Update {
    pub reparsed: bool,
    pub restyled: bool,
}

impl Update {
    pub const fn changed(self) -> bool {
        self.reparsed || self.restyled
    }
}

/// A markdown document bound to its styles and hooks.
#[derive(Debug)]
pub struct Markdown {
    options: RenderOptions,
    source: String,
    syntax_tree: Vec<SyntaxNode>,
    renderer: Renderer,
    rendered: Option<RenderedNode>,
}

impl Markdown {
    pub fn new(source: impl Into<String>, options: RenderOptions, hooks: Hooks) -> Self {
        let source = source.into();
        let syntax_tree = parse_source(&source, options.parse_inline);
        let styles = resolve_styles(&options, &options.markdown_styles);
        let renderer = Renderer::new(styles, hooks)
            .with_debug(options.debug)
            .with_link_source_tag(options.link_source_tag.clone())
            .with_messenger_anchor_class(options.messenger_anchor_class.clone());

        Self {
            options,
            source,
            syntax_tree,
            renderer,
            rendered: None,
        }
    }

    /// Returns true when `source` or `overrides` differ from the current
    /// inputs.
    pub fn should_update(&self, source: &str, overrides: &StyleSheet) -> bool {
        source != self.source || *overrides != self.options.markdown_styles
    }

    /// Take new inputs. Re-parses only on new source text and re-resolves
    /// styles only on new overrides.
    pub fn update(&mut self, source: &str, overrides: &StyleSheet) -> Update {
        let mut update = Update::default();

        if source != self.source {
            self.source = source.to_string();
            self.syntax_tree = parse_source(&self.source, self.options.parse_inline);
            update.reparsed = true;
        }
        if *overrides != self.options.markdown_styles {
            self.options.markdown_styles = overrides.clone();
            let styles = resolve_styles(&self.options, overrides);
            self.renderer = self.renderer.clone().with_styles(styles);
            update.restyled = true;
        }

        if update.changed() {
            tracing::debug!(
                reparsed = update.reparsed,
                restyled = update.restyled,
                "markdown inputs changed"
            );
            self.rendered = None;
        }
        update
    }

    /// Render the current tree from scratch.
    pub fn render(&self) -> RenderedNode {
        self.renderer
            .render(&self.syntax_tree, &self.options.passthrough)
    }

    /// Render for the given inputs, reusing the previous tree when neither
    /// input changed.
    pub fn present(&mut self, source: &str, overrides: &StyleSheet) -> &RenderedNode {
        self.update(source, overrides);
        let rendered = match self.rendered.take() {
            Some(rendered) => rendered,
            None => self.render(),
        };
        self.rendered.insert(rendered)
    }

    /// Deliver a pressable's activation to the configured handler.
    pub fn activate(&self, action: &Action) {
        self.renderer.activate(action);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn syntax_tree(&self) -> &[SyntaxNode] {
        &self.syntax_tree
    }

    pub fn styles(&self) -> &StyleSheet {
        self.renderer.styles()
    }

    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

fn parse_source(source: &str, inline: bool) -> Vec<SyntaxNode> {
    let _scope = crate::perf::scope("markdown.parse");
    let nodes = crate::syntax::parse(&format!("{source}\n\n"), &ParseOptions { inline });
    crate::perf::log_event("markdown.parse", format!("{} root nodes", nodes.len()));
    nodes
}

fn resolve_styles(options: &RenderOptions, overrides: &StyleSheet) -> Arc<StyleSheet> {
    Arc::new(StyleSheet::resolve(options.use_default_styles, overrides))
}

//! The render engine: syntax tree in, styled tree of rendered nodes out.
//!
//! This module handles:
//! - Dispatching each syntax node to the strategy for its kind
//! - Cascading styles from ancestors to descendants
//! - Applying caller overrides for images, links and list bullets
//!
//! Rendering is pure and synchronous. Nothing in here fails: unknown kinds
//! and empty nodes render nothing, missing styles render unstyled.

mod block;
mod context;
mod dispatch;
mod hooks;
mod link;
mod list;
mod node;
mod table;
mod text;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use context::{StyleContext, cascade};
pub use hooks::{BulletRenderer, Hooks, ImageRenderer, LinkHandler, LinkRenderer, MessengerLauncher};
pub use node::{Action, Primitive, RenderedNode};

use crate::style::{StyleKey, StyleSheet};
use crate::syntax::SyntaxNode;

/// Default source tag passed to the link handler.
pub const DEFAULT_LINK_SOURCE_TAG: &str = "markdown";

/// Default `class` of the inline anchor that opens the messenger.
pub const DEFAULT_MESSENGER_ANCHOR_CLASS: &str = "intercom-launcher";

/// Renders syntax trees against one resolved style sheet and hook set.
#[derive(Debug, Clone)]
pub struct Renderer {
    styles: Arc<StyleSheet>,
    hooks: Hooks,
    debug: bool,
    link_source_tag: String,
    messenger_anchor_class: String,
}

impl Renderer {
    pub fn new(styles: Arc<StyleSheet>, hooks: Hooks) -> Self {
        Self {
            styles,
            hooks,
            debug: false,
            link_source_tag: DEFAULT_LINK_SOURCE_TAG.to_string(),
            messenger_anchor_class: DEFAULT_MESSENGER_ANCHOR_CLASS.to_string(),
        }
    }

    /// Report unsupported node kinds.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Tag identifying this renderer to the link handler.
    #[must_use]
    pub fn with_link_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.link_source_tag = tag.into();
        self
    }

    /// `class` attribute value that marks an inline anchor as the
    /// messenger launcher.
    #[must_use]
    pub fn with_messenger_anchor_class(mut self, class: impl Into<String>) -> Self {
        self.messenger_anchor_class = class.into();
        self
    }

    /// Replace the style sheet, keeping hooks and settings.
    #[must_use]
    pub fn with_styles(mut self, styles: Arc<StyleSheet>) -> Self {
        self.styles = styles;
        self
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub const fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Render a document: walk the root nodes and wrap them in one root
    /// container carrying `root_props` verbatim.
    pub fn render(
        &self,
        nodes: &[SyntaxNode],
        root_props: &BTreeMap<String, serde_json::Value>,
    ) -> RenderedNode {
        let _scope = crate::perf::scope("render.walk");
        let content = self.walk(nodes, None, &StyleContext::new());
        let root = RenderedNode::view()
            .with_props(root_props.clone())
            .with_children(content);

        if self.debug {
            tracing::debug!("rendered node tree:\n{}", root.outline());
        }
        if crate::perf::is_debug_log_enabled() {
            for line in root.outline().lines() {
                crate::perf::log_event("render.tree", line);
            }
        }
        root
    }

    /// Deliver an activation to the matching handler.
    ///
    /// Missing handlers are not an error; the activation is dropped.
    pub fn activate(&self, action: &Action) {
        match action {
            Action::OpenLink { href, source_tag } => match &self.hooks.link_handler {
                Some(handler) => handler.handle_link(href, source_tag),
                None => tracing::debug!(href, "link activated without a handler"),
            },
            Action::LaunchMessenger => match &self.hooks.messenger {
                Some(launcher) => launcher.display_message_composer(),
                None => tracing::debug!("messenger activated without a launcher"),
            },
        }
    }

    fn style(&self, key: StyleKey) -> Option<&crate::style::Style> {
        self.styles.get(key)
    }
}

#[cfg(test)]
mod tests;

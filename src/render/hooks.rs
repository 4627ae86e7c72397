//! Caller-supplied overrides and activation handlers.
//!
//! Each hook is a small trait with a blanket impl for closures, so callers
//! can pass either a strategy object or a plain `Fn`.

use std::fmt;
use std::sync::Arc;

use super::node::RenderedNode;

/// Replaces the default image rendering.
pub trait ImageRenderer: Send + Sync {
    fn render_image(&self, src: &str, alt: Option<&str>, title: Option<&str>) -> RenderedNode;
}

impl<F> ImageRenderer for F
where
    F: Fn(&str, Option<&str>, Option<&str>) -> RenderedNode + Send + Sync,
{
    fn render_image(&self, src: &str, alt: Option<&str>, title: Option<&str>) -> RenderedNode {
        self(src, alt, title)
    }
}

/// Replaces the default link rendering. Receives the already rendered
/// link content.
pub trait LinkRenderer: Send + Sync {
    fn render_link(
        &self,
        href: &str,
        title: Option<&str>,
        children: Vec<Option<RenderedNode>>,
    ) -> RenderedNode;
}

impl<F> LinkRenderer for F
where
    F: Fn(&str, Option<&str>, Vec<Option<RenderedNode>>) -> RenderedNode + Send + Sync,
{
    fn render_link(
        &self,
        href: &str,
        title: Option<&str>,
        children: Vec<Option<RenderedNode>>,
    ) -> RenderedNode {
        self(href, title, children)
    }
}

/// Replaces the default list marker.
pub trait BulletRenderer: Send + Sync {
    fn render_bullet(&self, ordered: bool, index: usize) -> RenderedNode;
}

impl<F> BulletRenderer for F
where
    F: Fn(bool, usize) -> RenderedNode + Send + Sync,
{
    fn render_bullet(&self, ordered: bool, index: usize) -> RenderedNode {
        self(ordered, index)
    }
}

/// Receives link activations.
pub trait LinkHandler: Send + Sync {
    fn handle_link(&self, href: &str, source_tag: &str);
}

impl<F> LinkHandler for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn handle_link(&self, href: &str, source_tag: &str) {
        self(href, source_tag);
    }
}

/// Opens the external messaging composer.
pub trait MessengerLauncher: Send + Sync {
    fn display_message_composer(&self);
}

impl<F> MessengerLauncher for F
where
    F: Fn() + Send + Sync,
{
    fn display_message_composer(&self) {
        self();
    }
}

/// The set of overrides and handlers, resolved once when a renderer is
/// built.
#[derive(Clone, Default)]
pub struct Hooks {
    pub(crate) image: Option<Arc<dyn ImageRenderer>>,
    pub(crate) link: Option<Arc<dyn LinkRenderer>>,
    pub(crate) bullet: Option<Arc<dyn BulletRenderer>>,
    pub(crate) link_handler: Option<Arc<dyn LinkHandler>>,
    pub(crate) messenger: Option<Arc<dyn MessengerLauncher>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image_renderer(mut self, renderer: impl ImageRenderer + 'static) -> Self {
        self.image = Some(Arc::new(renderer));
        self
    }

    #[must_use]
    pub fn with_link_renderer(mut self, renderer: impl LinkRenderer + 'static) -> Self {
        self.link = Some(Arc::new(renderer));
        self
    }

    #[must_use]
    pub fn with_bullet_renderer(mut self, renderer: impl BulletRenderer + 'static) -> Self {
        self.bullet = Some(Arc::new(renderer));
        self
    }

    #[must_use]
    pub fn with_link_handler(mut self, handler: impl LinkHandler + 'static) -> Self {
        self.link_handler = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn with_messenger(mut self, launcher: impl MessengerLauncher + 'static) -> Self {
        self.messenger = Some(Arc::new(launcher));
        self
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("image", &self.image.is_some())
            .field("link", &self.link.is_some())
            .field("bullet", &self.bullet.is_some())
            .field("link_handler", &self.link_handler.is_some())
            .field("messenger", &self.messenger.is_some())
            .finish()
    }
}

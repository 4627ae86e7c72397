//! Style cascade.
//!
//! A [`StyleContext`] is the bundle of accumulated styles and transient
//! structural flags passed down while walking the syntax tree. Contexts
//! are immutable: cascading shares the ancestor's style layers and adds
//! one on top, so sibling subtrees never observe each other's styles.

use std::rc::Rc;

use crate::style::Style;

#[derive(Debug)]
struct StyleLayer {
    style: Style,
    parent: Option<Rc<StyleLayer>>,
}

/// Accumulated styles (outer to inner) plus structural flags.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    top: Option<Rc<StyleLayer>>,
    depth: usize,
    inside_block_quote: bool,
    ordered: bool,
}

impl StyleContext {
    /// An empty context: no styles, no flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh context for the items of a list.
    pub fn for_list(ordered: bool) -> Self {
        Self {
            ordered,
            ..Self::default()
        }
    }

    /// Derive a context with `style` appended.
    ///
    /// A missing style sheet entry appends an empty style.
    #[must_use]
    pub fn cascade(&self, style: Option<&Style>) -> Self {
        Self {
            top: Some(Rc::new(StyleLayer {
                style: style.cloned().unwrap_or_default(),
                parent: self.top.clone(),
            })),
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Accumulated styles, outermost first.
    pub fn styles(&self) -> Vec<Style> {
        let mut styles = Vec::with_capacity(self.depth);
        let mut layer = self.top.as_deref();
        while let Some(current) = layer {
            styles.push(current.style.clone());
            layer = current.parent.as_deref();
        }
        styles.reverse();
        styles
    }

    /// Number of accumulated styles.
    pub const fn len(&self) -> usize {
        self.depth
    }

    pub const fn is_empty(&self) -> bool {
        self.depth == 0
    }

    pub const fn inside_block_quote(&self) -> bool {
        self.inside_block_quote
    }

    pub const fn ordered(&self) -> bool {
        self.ordered
    }

    /// A copy of this context with the block-quote flag set.
    #[must_use]
    pub fn with_block_quote(&self) -> Self {
        Self {
            inside_block_quote: true,
            ..self.clone()
        }
    }

    /// Read and clear the block-quote flag.
    ///
    /// Returns whether the flag was set and the context children of the
    /// consuming block must use. The flag applies to one level of blocks.
    pub fn take_block_quote(&self) -> (bool, Self) {
        (
            self.inside_block_quote,
            Self {
                inside_block_quote: false,
                ..self.clone()
            },
        )
    }

    /// Returns true when both contexts share the same style layers.
    pub fn shares_styles_with(&self, other: &Self) -> bool {
        match (&self.top, &other.top) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Cascade `style` onto `context`, starting a new context when there is
/// none.
pub fn cascade(context: Option<&StyleContext>, style: Option<&Style>) -> StyleContext {
    context.map_or_else(StyleContext::new, Clone::clone).cascade(style)
}

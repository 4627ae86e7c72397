// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. style::StyleSheet)
    clippy::module_name_repetitions
)]

//! # marktree
//!
//! Renders markdown into a tree of styled presentational nodes, the shape a
//! mobile UI layer consumes.
//!
//! marktree turns a markdown string into:
//! - Containers, text runs, pressables, images and horizontal scrollers
//! - Style lists that cascade from ancestors to descendants
//! - Stable positional keys for every node
//!
//! ## Architecture
//!
//! Rendering is a pure function of three inputs:
//! - **Syntax tree**: parsed once per source text
//! - **Style sheet**: defaults merged with caller overrides
//! - **Hooks**: caller overrides for images, links and list bullets
//!
//! [`markdown::Markdown`] owns all three and only recomputes what changed.
//!
//! ## Modules
//!
//! - [`syntax`]: Markdown parsing into syntax nodes
//! - [`style`]: Style objects and the default style sheet
//! - [`render`]: Dispatch, style cascade and render strategies
//! - [`markdown`]: The memoizing component shell
//! - [`config`]: Persisted CLI defaults
//! - [`watcher`]: File watching
//! - [`perf`]: Timing and debug logging

pub mod config;
pub mod error;
pub mod markdown;
pub mod perf;
pub mod render;
pub mod style;
pub mod syntax;
pub mod watcher;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::markdown::{Markdown, RenderOptions};
    pub use crate::render::{Action, Hooks, Primitive, RenderedNode, Renderer};
    pub use crate::style::{Style, StyleSheet};
    pub use crate::syntax::{NodeKind, SyntaxNode};
}

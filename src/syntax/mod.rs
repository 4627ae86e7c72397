//! Markdown syntax trees.
//!
//! This module handles:
//! - Parsing markdown with comrak
//! - Folding the comrak AST into [`SyntaxNode`]s with a closed [`NodeKind`]

mod parser;
mod types;

pub use parser::{ParseOptions, parse, to_tree};
pub use types::{Attributes, Element, MAX_HEADING_LEVEL, NodeKind, SyntaxNode};

//! Document model types for rich-content article bodies.
//!
//! This module defines the typed tree that the parser produces from raw
//! block nodes and that the normalizer and excerpt extractor consume. A
//! parsed tree is an owned value: children are stored inline, and every
//! parse produces a fresh tree.

mod block;
mod document;
mod inline;
mod table;

pub use block::{
    Alignment, Block, BlockKind, GenericBlock, HeadingLevel, ListKind, MediaBlock, MediaKind,
};
pub use document::{ArticleBody, Document, Page, ParsedBody, ParsedPage};
pub use inline::{plain_text, InlineContent, Link, Styles, TextRun};
pub use table::{TableCell, TableContent, TableRow};

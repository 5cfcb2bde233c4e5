//! # blockdoc
//!
//! Rich-content block model for article bodies.
//!
//! Article bodies arrive from a block-based editor as JSON trees of
//! paragraphs, headings, lists, quotes, code, media, tables and dividers.
//! This library parses those trees into typed blocks, keeps anything it
//! does not understand as an opaque fallback block, and writes a canonical
//! form back out for storage. It also derives plain-text excerpts and URL
//! slugs.
//!
//! ## Quick Start
//!
//! ```
//! use blockdoc::{excerpt, normalize, parse_document_str, slugify};
//!
//! fn main() -> blockdoc::Result<()> {
//!     let doc = parse_document_str(
//!         r#"[{"type": "paragraph", "content": [{"type": "text", "text": "Hello world"}]},
//!             {"type": "mystery", "payload": 42}]"#,
//!     )?;
//!     assert_eq!(doc.len(), 2);
//!
//!     let nodes = vec![serde_json::json!({"type": "heading", "level": 2, "content": "Intro"})];
//!     let canonical = normalize(&nodes);
//!     assert_eq!(canonical[0]["level"], 2);
//!
//!     assert_eq!(excerpt(&doc.blocks), "Hello world");
//!     assert_eq!(slugify("Hello, World! 2025"), "hello-world-2025");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Total parsing**: every input yields a tree; malformed blocks degrade
//!   to [`model::GenericBlock`] with their fields preserved
//! - **Extensible registry**: block types are table entries in
//!   [`parser::BlockRegistry`]
//! - **Idempotent normalization**: canonical output re-parses to itself
//! - **Parallel processing**: multi-page articles are parsed with Rayon

pub mod article;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod slug;

// Re-export commonly used types
pub use article::{
    ArticleAssembler, ArticleRecord, ArticleRequest, ArticleStatus, ArticleUpdate, ExcerptState,
};
pub use error::{Error, Result};
pub use model::{
    Alignment, ArticleBody, Block, BlockKind, Document, GenericBlock, HeadingLevel, InlineContent,
    Link, ListKind, MediaBlock, MediaKind, Page, ParsedBody, ParsedPage, Styles, TableCell,
    TableContent, TableRow, TextRun,
};
pub use parser::{BlockParser, BlockRegistry, DocumentParser, ParseOptions, ParseReport};
pub use render::{Excerpt, ExcerptOptions, JsonFormat};
pub use slug::{slugify, UNTITLED_SLUG};

use serde_json::Value;

/// Parse a page body with the built-in block types and default options.
///
/// # Example
///
/// ```
/// use blockdoc::parse_document;
/// use serde_json::json;
///
/// let doc = parse_document(&[json!({"type": "divider"})]);
/// assert_eq!(doc.blocks[0].block_type(), Some("divider"));
/// ```
pub fn parse_document(nodes: &[Value]) -> Document {
    DocumentParser::default().parse_body(nodes)
}

/// Parse a page body from JSON text.
///
/// The text must hold a JSON array of block nodes. Malformed blocks never
/// fail; only invalid JSON or a non-array top level is an error.
pub fn parse_document_str(json: &str) -> Result<Document> {
    let nodes: Vec<Value> = serde_json::from_str(json)?;
    Ok(parse_document(&nodes))
}

/// Parse and normalize a page body with the built-in block types.
pub fn normalize(nodes: &[Value]) -> Vec<Value> {
    render::normalize_body(nodes)
}

/// Extract an excerpt with default options, falling back to the default
/// sentence when the body has no text.
pub fn excerpt(blocks: &[Block]) -> String {
    let options = ExcerptOptions::default();
    render::extract_excerpt(blocks, &options).into_string(&options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_document_str_errors() {
        assert!(matches!(parse_document_str("not json"), Err(Error::Json(_))));
        assert!(matches!(
            parse_document_str(r#"{"type": "paragraph"}"#),
            Err(Error::Json(_))
        ));
        assert!(parse_document_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_excerpt_fallback() {
        let doc = parse_document(&[json!({"type": "divider"})]);
        assert_eq!(
            excerpt(&doc.blocks),
            "No introductory text available for excerpt generation."
        );
    }
}

//! Excerpt extraction: a short plain-text preview of an article body.

use super::ExcerptOptions;
use crate::model::{Block, BlockKind, ParsedBody, ParsedPage};

/// The result of excerpt extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Excerpt {
    /// Extracted (possibly truncated) text
    Text(String),

    /// No paragraph or heading with text was found
    Empty,
}

impl Excerpt {
    /// Check if nothing usable was found.
    pub fn is_empty(&self) -> bool {
        matches!(self, Excerpt::Empty)
    }

    /// The extracted text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Excerpt::Text(text) => Some(text),
            Excerpt::Empty => None,
        }
    }

    /// The extracted text, or `fallback` when empty.
    pub fn as_text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.as_text().unwrap_or(fallback)
    }

    /// Render to a string, substituting the configured fallback sentence.
    pub fn into_string(self, options: &ExcerptOptions) -> String {
        match self {
            Excerpt::Text(text) => text,
            Excerpt::Empty => options.fallback.clone(),
        }
    }
}

/// Extract an excerpt from a page body.
pub fn extract_excerpt(blocks: &[Block], options: &ExcerptOptions) -> Excerpt {
    match find_text(blocks, 1, options.max_depth) {
        Some(text) => Excerpt::Text(truncate(&text, options)),
        None => Excerpt::Empty,
    }
}

/// Extract an excerpt from the first page (lowest page number) only.
pub fn extract_excerpt_from_pages(pages: &[ParsedPage], options: &ExcerptOptions) -> Excerpt {
    pages
        .iter()
        .min_by_key(|page| page.page_number)
        .map(|page| extract_excerpt(&page.document.blocks, options))
        .unwrap_or(Excerpt::Empty)
}

/// Extract an excerpt from a parsed article body.
pub fn extract_excerpt_from_body(body: &ParsedBody, options: &ExcerptOptions) -> Excerpt {
    match body {
        ParsedBody::Single(doc) => extract_excerpt(&doc.blocks, options),
        ParsedBody::Paged(pages) => extract_excerpt_from_pages(pages, options),
    }
}

/// First usable text among `blocks`; failing that, the first found in
/// their children, depth-first.
fn find_text(blocks: &[Block], depth: usize, max_depth: usize) -> Option<String> {
    if let Some(text) = blocks.iter().find_map(narrative_text) {
        return Some(text);
    }
    if depth >= max_depth {
        return None;
    }
    blocks
        .iter()
        .filter(|block| !block.children.is_empty())
        .find_map(|block| find_text(&block.children, depth + 1, max_depth))
}

fn narrative_text(block: &Block) -> Option<String> {
    match block.kind {
        BlockKind::Paragraph { .. } | BlockKind::Heading { .. } => {
            let text = block.plain_text();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

fn truncate(text: &str, options: &ExcerptOptions) -> String {
    match text.char_indices().nth(options.max_length) {
        Some((cut, _)) => format!("{}{}", &text[..cut], options.ellipsis),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, InlineContent, Link, Styles, TextRun};
    use serde_json::Map;

    fn paragraph(content: Vec<InlineContent>) -> Block {
        Block::new(BlockKind::Paragraph {
            content,
            props: Map::new(),
        })
    }

    #[test]
    fn test_concatenates_runs() {
        let blocks = vec![paragraph(vec![
            InlineContent::text("Hello "),
            InlineContent::Text(TextRun::styled("world", Styles::bold())),
        ])];
        assert_eq!(
            extract_excerpt(&blocks, &ExcerptOptions::default()),
            Excerpt::Text("Hello world".to_string())
        );
    }

    #[test]
    fn test_link_text_included() {
        let blocks = vec![paragraph(vec![
            InlineContent::text("See "),
            InlineContent::Link(Link::new("https://example.com", "this")),
        ])];
        let excerpt = extract_excerpt(&blocks, &ExcerptOptions::default());
        assert_eq!(excerpt.as_text(), Some("See this"));
    }

    #[test]
    fn test_truncation() {
        let blocks = vec![Block::paragraph("a".repeat(300))];
        let excerpt = extract_excerpt(&blocks, &ExcerptOptions::default());
        let text = excerpt.as_text().unwrap();
        assert_eq!(text.chars().count(), 153);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_truncation_counts_chars() {
        let blocks = vec![Block::paragraph("é".repeat(10))];
        let options = ExcerptOptions::new().with_max_length(4);
        assert_eq!(
            extract_excerpt(&blocks, &options).as_text(),
            Some("éééé...")
        );

        let options = ExcerptOptions::new().with_max_length(10);
        assert_eq!(
            extract_excerpt(&blocks, &options).as_text(),
            Some("éééééééééé")
        );
    }

    #[test]
    fn test_skips_blank_and_non_narrative() {
        let blocks = vec![
            Block::paragraph("   "),
            Block::divider(),
            Block::new(BlockKind::Quote {
                content: vec![InlineContent::text("quoted")],
                props: Map::new(),
            }),
            Block::heading("  Intro  ", 2),
        ];
        assert_eq!(
            extract_excerpt(&blocks, &ExcerptOptions::default()).as_text(),
            Some("Intro")
        );
    }

    #[test]
    fn test_descends_into_children() {
        let blocks = vec![
            Block::divider(),
            Block::new(BlockKind::Quote {
                content: Vec::new(),
                props: Map::new(),
            })
            .with_child(Block::divider().with_child(Block::paragraph("deep")))
            .with_child(Block::paragraph("shallow")),
        ];
        assert_eq!(
            extract_excerpt(&blocks, &ExcerptOptions::default()).as_text(),
            Some("shallow")
        );

        let options = ExcerptOptions::new().with_max_depth(1);
        assert!(extract_excerpt(&blocks, &options).is_empty());
    }

    #[test]
    fn test_empty_uses_fallback() {
        let options = ExcerptOptions::default();
        let excerpt = extract_excerpt(&[Block::divider()], &options);
        assert!(excerpt.is_empty());
        assert_eq!(excerpt.as_text_or("none"), "none");
        assert_eq!(excerpt.into_string(&options), options.fallback);
    }

    #[test]
    fn test_first_page_only() {
        let pages = vec![
            ParsedPage {
                page_number: 2,
                document: Document::from_blocks(vec![Block::paragraph("Later")]),
            },
            ParsedPage {
                page_number: 1,
                document: Document::from_blocks(vec![Block::divider()]),
            },
        ];
        assert!(extract_excerpt_from_pages(&pages, &ExcerptOptions::default()).is_empty());
        assert!(extract_excerpt_from_pages(&[], &ExcerptOptions::default()).is_empty());
    }
}

//! Plain text rendering for parsed documents.

use crate::model::{Block, BlockKind, Document, ParsedBody};

/// Convert a document to plain text, one block per line.
///
/// Nested blocks are indented by two spaces per level. Tables render as
/// tab-separated rows, media as their caption (or URL), and fallback
/// blocks are skipped.
pub fn to_text(doc: &Document) -> String {
    let mut lines = Vec::new();
    for block in &doc.blocks {
        collect_lines(block, 0, &mut lines);
    }
    lines.join("\n")
}

/// Convert a parsed article body to plain text; pages are separated by a
/// blank line.
pub fn body_to_text(body: &ParsedBody) -> String {
    match body {
        ParsedBody::Single(doc) => to_text(doc),
        ParsedBody::Paged(pages) => pages
            .iter()
            .map(|page| to_text(&page.document))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn collect_lines(block: &Block, level: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(level);
    let text = block_text(block);
    if !text.trim().is_empty() {
        for line in text.lines() {
            lines.push(format!("{}{}", indent, line));
        }
    }

    for child in &block.children {
        collect_lines(child, level + 1, lines);
    }
}

fn block_text(block: &Block) -> String {
    match &block.kind {
        BlockKind::Table { content, .. } => content.plain_text(),
        BlockKind::Media(media) => media
            .caption()
            .filter(|c| !c.is_empty())
            .or_else(|| media.url())
            .unwrap_or_default()
            .to_string(),
        BlockKind::Generic(_) | BlockKind::Divider { .. } => String::new(),
        _ => block.plain_text(),
    }
}

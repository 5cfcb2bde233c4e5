//! Canonical, storage-ready form of parsed block trees.
//!
//! The canonical form omits every field with an empty value (no `null`s, no
//! empty `props`, `content` or `children`), emits `align` only when it was
//! set, and folds media fields that older editor revisions wrote at the
//! block's top level into the `props` bag. Normalized output is itself valid
//! parser input, and normalizing it again yields the same tree.

use crate::model::{
    Block, BlockKind, Document, InlineContent, MediaBlock, ParsedBody, ParsedPage, TableCell,
    TableContent, TextRun,
};
use crate::parser::DocumentParser;
use serde_json::{Map, Value};

/// Normalize one block into its canonical object.
pub fn normalize_block(block: &Block) -> Value {
    let mut out = Map::new();

    match &block.kind {
        BlockKind::Generic(generic) => {
            out.extend(generic.fields.clone());
            insert_common(&mut out, block);
        }
        kind => {
            if let Some(name) = kind.type_name() {
                out.insert("type".to_string(), Value::String(name.to_string()));
            }
            insert_common(&mut out, block);

            if let BlockKind::Heading { level, .. } = kind {
                out.insert("level".to_string(), Value::from(level.get()));
            }

            let props = match kind {
                BlockKind::Media(media) => merge_media_props(media),
                _ => kind.props().cloned().unwrap_or_default(),
            };
            if !props.is_empty() {
                out.insert("props".to_string(), Value::Object(props));
            }

            if let Some(content) = kind.inline_content() {
                if !content.is_empty() {
                    out.insert("content".to_string(), normalize_inline_content(content));
                }
            }

            if let BlockKind::Table { content, .. } = kind {
                out.insert("content".to_string(), normalize_table(content));
            }
        }
    }

    if !block.children.is_empty() {
        out.insert(
            "children".to_string(),
            Value::Array(normalize_blocks(&block.children)),
        );
    }

    Value::Object(out)
}

fn insert_common(out: &mut Map<String, Value>, block: &Block) {
    if let Some(id) = &block.id {
        out.insert("id".to_string(), Value::String(id.clone()));
    }
    if let Some(align) = block.align {
        out.insert("align".to_string(), Value::String(align.as_str().to_string()));
    }
}

/// Normalize a sequence of blocks.
pub fn normalize_blocks(blocks: &[Block]) -> Vec<Value> {
    blocks.iter().map(normalize_block).collect()
}

/// Normalize a parsed page body.
pub fn normalize_document(doc: &Document) -> Vec<Value> {
    normalize_blocks(&doc.blocks)
}

/// Normalize parsed pages into `{pageNumber, pageBody}` objects.
pub fn normalize_pages(pages: &[ParsedPage]) -> Vec<Value> {
    pages
        .iter()
        .map(|page| {
            let mut out = Map::new();
            out.insert("pageNumber".to_string(), Value::from(page.page_number));
            out.insert(
                "pageBody".to_string(),
                Value::Array(normalize_document(&page.document)),
            );
            Value::Object(out)
        })
        .collect()
}

/// Normalize a parsed article body: an array of blocks for a single page,
/// an array of page objects otherwise.
pub fn normalize_parsed_body(body: &ParsedBody) -> Value {
    match body {
        ParsedBody::Single(doc) => Value::Array(normalize_document(doc)),
        ParsedBody::Paged(pages) => Value::Array(normalize_pages(pages)),
    }
}

/// Parse raw nodes with the built-in registry and normalize the result.
pub fn normalize_body(nodes: &[Value]) -> Vec<Value> {
    normalize_document(&DocumentParser::default().parse_body(nodes))
}

/// Merge a media block's top-level legacy fields into its properties bag.
/// Values already in the bag win.
pub fn merge_media_props(media: &MediaBlock) -> Map<String, Value> {
    let mut props = media.props.clone();
    for (key, value) in &media.legacy {
        if !props.contains_key(key) {
            props.insert(key.clone(), value.clone());
        }
    }
    props
}

/// Serialize inline content to plain objects.
pub fn normalize_inline_content(content: &[InlineContent]) -> Value {
    Value::Array(content.iter().map(normalize_inline).collect())
}

/// Serialize one inline item.
pub fn normalize_inline(item: &InlineContent) -> Value {
    match item {
        InlineContent::Text(run) => normalize_run(run),
        InlineContent::Link(link) => {
            let mut out = Map::new();
            out.insert("type".to_string(), Value::from("link"));
            out.insert("href".to_string(), Value::String(link.href.clone()));
            if !link.content.is_empty() {
                out.insert(
                    "content".to_string(),
                    Value::Array(link.content.iter().map(normalize_run).collect()),
                );
            }
            Value::Object(out)
        }
    }
}

fn normalize_run(run: &TextRun) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), Value::from("text"));
    out.insert("text".to_string(), Value::String(run.text.clone()));

    if run.styles.has_styling() {
        let styles: Map<String, Value> = run
            .styles
            .active()
            .map(|name| (name.to_string(), Value::Bool(true)))
            .collect();
        out.insert("styles".to_string(), Value::Object(styles));
    }

    Value::Object(out)
}

fn normalize_table(table: &TableContent) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), Value::from("tableContent"));
    out.extend(table.extra.clone());

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let cells = row
                .cells
                .iter()
                .map(|cell| match cell {
                    TableCell::Inline(content) => normalize_inline_content(content),
                    TableCell::Structured(value) => value.clone(),
                })
                .collect();
            let mut row_out = Map::new();
            row_out.insert("cells".to_string(), Value::Array(cells));
            Value::Object(row_out)
        })
        .collect();
    out.insert("rows".to_string(), Value::Array(rows));

    Value::Object(out)
}

//! Integration tests for block and document parsing.

use blockdoc::model::{Alignment, BlockKind, ListKind, MediaKind, Page, TableCell};
use blockdoc::parser::{
    BlockRegistry, BlockSchema, ContentModel, DocumentParser, FieldKind, FieldSpec, ParseOptions,
    ParsedContent,
};
use blockdoc::{parse_document, parse_document_str, ArticleBody, Error, ParsedBody};
use serde_json::{json, Value};

fn nested(depth: usize) -> Value {
    let mut node = json!({"type": "bulletListItem", "content": "leaf"});
    for _ in 1..depth {
        node = json!({"type": "bulletListItem", "content": "item", "children": [node]});
    }
    node
}

#[test]
fn test_parse_is_total() {
    let inputs = vec![
        json!({}),
        json!(null),
        json!(42),
        json!("text"),
        json!([1, 2, 3]),
        json!({"type": 7}),
        json!({"type": "paragraph", "content": 3}),
        json!({"type": "paragraph", "content": [{"type": "image"}]}),
        json!({"type": "paragraph", "children": "nope"}),
        json!({"type": "heading", "level": "two"}),
        json!({"type": "divider", "content": "text"}),
        json!({"type": "table", "content": "cells"}),
        json!({"type": "image", "content": {"url": 1}}),
        json!({"type": "quote", "props": []}),
        json!({"type": "codeBlock", "id": 5}),
        json!({"type": "checkListItem", "align": "justify"}),
    ];

    let doc = parse_document(&inputs);
    assert_eq!(doc.len(), inputs.len());
}

#[test]
fn test_fallback_preserves_fields() {
    let doc = parse_document(&[json!({"type": "mystery", "payload": 42})]);
    match &doc.blocks[0].kind {
        BlockKind::Generic(generic) => {
            assert_eq!(generic.block_type(), Some("mystery"));
            assert_eq!(generic.fields.get("payload"), Some(&json!(42)));
        }
        other => panic!("expected generic block, got {:?}", other),
    }
}

#[test]
fn test_typed_blocks() {
    let doc = parse_document(&[
        json!({"type": "heading", "id": "h", "align": "center", "props": {"level": 2}, "content": "Intro"}),
        json!({"type": "numberedListItem", "content": "one", "children": [
            {"type": "numberedListItem", "content": "one.a"}
        ]}),
        json!({"type": "video", "props": {"url": "https://v", "caption": "Goal"}}),
        json!({"type": "table", "content": {"type": "tableContent", "columnWidths": [100], "rows": [
            {"cells": [[{"type": "text", "text": "A"}], "B", 3]}
        ]}}),
        json!({"type": "divider", "content": []}),
    ]);

    let heading = &doc.blocks[0];
    assert_eq!(heading.id.as_deref(), Some("h"));
    assert_eq!(heading.align, Some(Alignment::Center));
    assert!(matches!(&heading.kind, BlockKind::Heading { level, .. } if level.get() == 2));

    let item = &doc.blocks[1];
    assert!(matches!(
        item.kind,
        BlockKind::ListItem {
            list: ListKind::Numbered,
            ..
        }
    ));
    assert_eq!(item.children[0].plain_text(), "one.a");

    match &doc.blocks[2].kind {
        BlockKind::Media(media) => {
            assert_eq!(media.kind, MediaKind::Video);
            assert_eq!(media.url(), Some("https://v"));
            assert_eq!(media.caption(), Some("Goal"));
        }
        other => panic!("expected media, got {:?}", other),
    }

    match &doc.blocks[3].kind {
        BlockKind::Table { content, .. } => {
            assert_eq!(content.row_count(), 1);
            assert_eq!(content.column_count(), 3);
            assert_eq!(content.rows[0].plain_text(), "A\tB\t3");
            assert!(matches!(content.rows[0].cells[1], TableCell::Inline(_)));
            assert_eq!(content.extra.get("columnWidths"), Some(&json!([100])));
        }
        other => panic!("expected table, got {:?}", other),
    }

    assert_eq!(doc.blocks[4].block_type(), Some("divider"));
    assert!(!doc.blocks[4].is_generic());
}

#[test]
fn test_inline_items_coerced() {
    let doc = parse_document(&[json!({
        "type": "paragraph",
        "content": [
            "plain ",
            {"type": "text", "text": "bold", "bold": true},
            {"type": "link", "href": "https://a", "content": "link"},
            {"type": "mention", "user": "sam"},
            7
        ]
    })]);

    let block = &doc.blocks[0];
    assert!(!block.is_generic());
    let content = block.inline_content().unwrap();
    assert_eq!(content.len(), 5);
    assert!(block.plain_text().starts_with("plain boldlink"));
}

#[test]
fn test_deep_nesting_is_bounded() {
    let options = ParseOptions::new().with_max_depth(64);
    let registry = BlockRegistry::with_defaults();
    let parser = DocumentParser::new(&registry, options);

    let (doc, report) = parser.parse_body_with_report(&[nested(200)]);
    assert_eq!(doc.depth(), 65);
    assert_eq!(report.depth_truncations, 1);
    assert_eq!(report.fallbacks, 0);
    assert!(report.is_lossy());

    let (_, report) = parser.parse_body_with_report(&[nested(64)]);
    assert_eq!(report.depth_truncations, 0);
    assert!(!report.is_lossy());
}

#[test]
fn test_custom_block_type() {
    let mut registry = BlockRegistry::with_defaults();
    registry.register(
        BlockSchema::new("callout", ContentModel::Inline, |parts| match parts.content {
            ParsedContent::Inline(content) => {
                let mut props = parts.props;
                if let Some(icon) = parts.fields.get("icon") {
                    props.insert("icon".to_string(), icon.clone());
                }
                Some(BlockKind::Quote { content, props })
            }
            _ => None,
        })
        .with_field(FieldSpec::required("icon", FieldKind::String)),
    );
    assert!(registry.supports("callout"));

    let parser = DocumentParser::new(&registry, ParseOptions::default());
    let doc = parser.parse_body(&[
        json!({"type": "callout", "icon": "!", "content": "Heads up"}),
        json!({"type": "callout", "content": "No icon"}),
    ]);

    assert_eq!(doc.blocks[0].block_type(), Some("quote"));
    assert_eq!(doc.blocks[0].plain_text(), "Heads up");
    assert!(doc.blocks[1].is_generic());
}

#[test]
fn test_parse_pages_in_order() {
    let body = ArticleBody::from_value(&json!({
        "pages": [
            {"pageNumber": 3, "pageBody": [{"type": "paragraph", "content": "three"}]},
            {"pageNumber": 1, "pageBody": [{"type": "paragraph", "content": "one"}]},
            {"pageNumber": 2, "pageBody": []}
        ]
    }))
    .unwrap();

    match DocumentParser::default().parse_article_body(&body) {
        ParsedBody::Paged(pages) => {
            let numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
            assert_eq!(numbers, vec![1, 2, 3]);
            assert_eq!(pages[2].document.blocks[0].plain_text(), "three");
        }
        ParsedBody::Single(_) => panic!("expected pages"),
    }
}

#[test]
fn test_body_shape_errors() {
    assert!(matches!(
        ArticleBody::from_value(&json!({"currentPageBody": [], "pages": []})),
        Err(Error::BodyConflict)
    ));
    assert!(matches!(
        ArticleBody::from_value(&json!({})),
        Err(Error::MissingBody)
    ));
    assert!(matches!(
        ArticleBody::from_parts(None, Some(vec![Page::new(0, vec![])])),
        Err(Error::InvalidPage(_))
    ));
    assert!(matches!(
        ArticleBody::from_value(&json!({"pages": [{"pageBody": []}]})),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_parse_document_str() {
    let doc = parse_document_str(r#"[{"type": "paragraph", "content": "hi"}]"#).unwrap();
    assert_eq!(doc.blocks[0].plain_text(), "hi");
    assert!(parse_document_str("{").is_err());
}

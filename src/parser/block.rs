//! Block parser: raw nodes to typed [`Block`] trees.

use super::inline::parse_inline_content;
use super::registry::{BlockParts, BlockRegistry, BlockSchema, ContentModel, ParsedContent};
use super::{ParseOptions, ParseReport};
use crate::model::{
    Alignment, Block, BlockKind, GenericBlock, MediaBlock, TableCell, TableContent, TableRow,
};
use serde_json::{Map, Value};

/// Parses raw block nodes against a [`BlockRegistry`].
///
/// Parsing never fails: a node that cannot be matched to its declared type
/// becomes a [`GenericBlock`] that keeps its fields verbatim. Subtrees nested
/// deeper than [`ParseOptions::max_depth`] are not descended into.
pub struct BlockParser<'r> {
    registry: &'r BlockRegistry,
    max_depth: usize,
    report: ParseReport,
}

impl<'r> BlockParser<'r> {
    /// Create a parser.
    pub fn new(registry: &'r BlockRegistry, options: &ParseOptions) -> Self {
        Self {
            registry,
            max_depth: options.max_depth,
            report: ParseReport::default(),
        }
    }

    /// Parse one top-level node.
    pub fn parse(&mut self, node: &Value) -> Block {
        self.parse_at(node, 1)
    }

    /// Counters accumulated by this parser so far.
    pub fn report(&self) -> ParseReport {
        self.report
    }

    fn parse_at(&mut self, node: &Value, depth: usize) -> Block {
        self.report.blocks += 1;

        let Some(object) = node.as_object() else {
            log::debug!("Non-object block node at depth {}", depth);
            self.report.fallbacks += 1;
            let mut fields = Map::new();
            fields.insert("value".to_string(), node.clone());
            return Block::new(BlockKind::Generic(GenericBlock::new(fields)));
        };

        if depth > self.max_depth {
            log::warn!(
                "Block nesting exceeds {} levels; keeping subtree as an opaque block",
                self.max_depth
            );
            self.report.depth_truncations += 1;
            return Block::new(BlockKind::Generic(GenericBlock::new(object.clone())));
        }

        let typed = object
            .get("type")
            .and_then(Value::as_str)
            .and_then(|name| self.registry.get(name))
            .and_then(|schema| self.parse_typed(object, schema));

        match typed {
            Some(mut block) => {
                if let Some(Value::Array(children)) = object.get("children") {
                    block.children = self.parse_children(children, depth);
                }
                block
            }
            None => {
                log::debug!(
                    "Falling back to generic block for type {:?}",
                    object.get("type")
                );
                self.report.fallbacks += 1;
                self.parse_generic(object, depth)
            }
        }
    }

    fn parse_children(&mut self, children: &[Value], depth: usize) -> Vec<Block> {
        children
            .iter()
            .map(|child| self.parse_at(child, depth + 1))
            .collect()
    }

    /// Check a node against its schema. Children are validated for shape
    /// here but parsed by the caller.
    fn parse_typed(&self, object: &Map<String, Value>, schema: &BlockSchema) -> Option<Block> {
        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(_) => return None,
        };

        let align = match object.get("align") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(Alignment::parse(s)?),
            Some(_) => return None,
        };

        match object.get("children") {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) if children.iter().all(Value::is_object) => {}
            Some(_) => return None,
        }

        let props = match object.get("props") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(props)) => props.clone(),
            Some(_) => return None,
        };

        let mut fields = Map::new();
        for spec in schema.fields() {
            match object.get(spec.name) {
                Some(value) if !value.is_null() => {
                    if !spec.kind.accepts(value) {
                        return None;
                    }
                    fields.insert(spec.name.to_string(), value.clone());
                }
                _ => match props.get(spec.name) {
                    Some(value) if spec.kind.accepts(value) => {
                        fields.insert(spec.name.to_string(), value.clone());
                    }
                    _ if spec.required => return None,
                    _ => {}
                },
            }
        }

        let raw_content = object.get("content").unwrap_or(&Value::Null);
        let mut legacy = Map::new();
        let content = match schema.content() {
            ContentModel::Inline => ParsedContent::Inline(parse_inline_content(raw_content)?),
            ContentModel::Table => ParsedContent::Table(parse_table_content(raw_content)?),
            ContentModel::Empty => {
                if !is_blank(raw_content) {
                    return None;
                }
                ParsedContent::Empty
            }
            ContentModel::Media => {
                match raw_content {
                    // The oldest editor revision stored the media URL as content.
                    Value::String(url) if url.starts_with("http") => {
                        legacy.insert("url".to_string(), Value::String(url.clone()));
                    }
                    Value::String(_) => {}
                    other if is_blank(other) => {}
                    _ => return None,
                }
                for key in MediaBlock::LEGACY_KEYS {
                    match object.get(key) {
                        Some(value) if !value.is_null() && !legacy.contains_key(key) => {
                            legacy.insert(key.to_string(), value.clone());
                        }
                        _ => {}
                    }
                }
                ParsedContent::Empty
            }
        };

        let kind = schema.build(BlockParts {
            block_type: schema.name(),
            content,
            props,
            fields,
            legacy,
        })?;

        Some(Block {
            id,
            align,
            children: Vec::new(),
            kind,
        })
    }

    fn parse_generic(&mut self, object: &Map<String, Value>, depth: usize) -> Block {
        let mut block = Block::new(BlockKind::Generic(GenericBlock::default()));

        let children = match object.get("children") {
            Some(Value::Array(children)) if children.iter().all(Value::is_object) => {
                Some(children.as_slice())
            }
            _ => None,
        };
        if let Some(children) = children {
            block.children = self.parse_children(children, depth);
        }

        block.id = object.get("id").and_then(Value::as_str).map(str::to_string);
        block.align = object
            .get("align")
            .and_then(Value::as_str)
            .and_then(Alignment::parse);

        let fields = object
            .iter()
            .filter(|(key, value)| match key.as_str() {
                "children" => children.is_none() && !value.is_null(),
                "id" => block.id.is_none(),
                "align" => block.align.is_none(),
                _ => true,
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        block.kind = BlockKind::Generic(GenericBlock::new(fields));
        block
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Parse a table content object.
///
/// Rows may be `{"cells": [...]}` objects or bare arrays of cells.
pub fn parse_table_content(value: &Value) -> Option<TableContent> {
    let object = value.as_object()?;

    match object.get("type") {
        None | Some(Value::Null) => {}
        Some(Value::String(t)) if t == "tableContent" => {}
        Some(_) => return None,
    }

    let rows = object
        .get("rows")?
        .as_array()?
        .iter()
        .map(parse_table_row)
        .collect::<Option<Vec<_>>>()?;

    let extra = object
        .iter()
        .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "rows")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Some(TableContent { rows, extra })
}

fn parse_table_row(row: &Value) -> Option<TableRow> {
    let cells = match row {
        Value::Object(row) => row.get("cells")?.as_array()?,
        Value::Array(cells) => cells,
        _ => return None,
    };

    Some(TableRow::new(cells.iter().map(parse_table_cell).collect()))
}

fn parse_table_cell(cell: &Value) -> TableCell {
    match cell {
        Value::Object(_) => TableCell::Structured(cell.clone()),
        Value::Array(_) | Value::Null => {
            TableCell::Inline(parse_inline_content(cell).unwrap_or_default())
        }
        Value::String(s) if s.is_empty() => TableCell::empty(),
        Value::String(s) => TableCell::text(s.as_str()),
        Value::Bool(_) | Value::Number(_) => TableCell::text(cell.to_string()),
    }
}

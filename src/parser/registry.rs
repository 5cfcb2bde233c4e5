//! Block registry mapping type discriminators to block schemas.
//!
//! The parser never matches on type names itself. It looks the node's `type`
//! up here, checks the node against the schema's content model and declared
//! fields, and hands the validated parts to the schema's builder. Supporting
//! a new block type means adding a [`BlockKind`] variant and registering one
//! schema.
//!
//! # Example
//!
//! ```
//! use blockdoc::model::BlockKind;
//! use blockdoc::parser::{BlockRegistry, BlockSchema, ContentModel, ParsedContent};
//!
//! // Early article bodies used `{"type": "text", "content": "..."}`.
//! let mut registry = BlockRegistry::with_defaults();
//! registry.register(BlockSchema::new("text", ContentModel::Inline, |parts| {
//!     match parts.content {
//!         ParsedContent::Inline(content) => Some(BlockKind::Paragraph {
//!             content,
//!             props: parts.props,
//!         }),
//!         _ => None,
//!     }
//! }));
//! assert!(registry.supports("text"));
//! ```

use crate::model::{
    BlockKind, HeadingLevel, InlineContent, ListKind, MediaBlock, MediaKind, TableContent,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// What a block's `content` field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentModel {
    /// A sequence of inline content
    Inline,
    /// A table content object
    Table,
    /// Nothing; media fields live in the properties bag
    Media,
    /// Nothing at all
    Empty,
}

/// Primitive type of a declared block field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    /// An integer within `min..=max`
    Integer { min: i64, max: i64 },
}

impl FieldKind {
    /// Check if a value has this primitive type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Integer { min, max } => value
                .as_i64()
                .is_some_and(|n| (*min..=*max).contains(&n)),
        }
    }
}

/// A field a block type declares beyond the common ones.
///
/// The parser looks for the field at the node's top level first and then in
/// its `props` bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Expected primitive type
    pub kind: FieldKind,
    /// Whether the node must carry the field
    pub required: bool,
}

impl FieldSpec {
    /// An optional field.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    /// A required field.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }
}

/// Content of a node after it was checked against a [`ContentModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedContent {
    Inline(Vec<InlineContent>),
    Table(TableContent),
    Empty,
}

/// The validated pieces of a node, handed to a schema's builder.
#[derive(Debug, Clone)]
pub struct BlockParts<'a> {
    /// The node's type discriminator
    pub block_type: &'a str,
    /// Content, shaped by the schema's content model
    pub content: ParsedContent,
    /// The properties bag (empty when absent)
    pub props: Map<String, Value>,
    /// Declared fields that were present and well-typed
    pub fields: Map<String, Value>,
    /// Media fields found outside the properties bag
    pub legacy: Map<String, Value>,
}

/// Builds a block kind from validated parts; `None` rejects the node.
pub type BlockBuilder = fn(BlockParts<'_>) -> Option<BlockKind>;

/// Schema of one block type.
#[derive(Clone)]
pub struct BlockSchema {
    name: String,
    content: ContentModel,
    fields: Vec<FieldSpec>,
    build: BlockBuilder,
}

impl BlockSchema {
    /// Create a schema with no declared fields.
    pub fn new(name: impl Into<String>, content: ContentModel, build: BlockBuilder) -> Self {
        Self {
            name: name.into(),
            content,
            fields: Vec::new(),
            build,
        }
    }

    /// Declare a field and return self.
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// The type discriminator this schema is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The content model of this type.
    pub fn content(&self) -> ContentModel {
        self.content
    }

    /// Declared fields.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Run the builder.
    pub fn build(&self, parts: BlockParts<'_>) -> Option<BlockKind> {
        (self.build)(parts)
    }
}

impl fmt::Debug for BlockSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockSchema")
            .field("name", &self.name)
            .field("content", &self.content)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Registry of block schemas keyed by type discriminator.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    schemas: HashMap<String, BlockSchema>,
}

impl BlockRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Create a registry with every built-in block type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(BlockSchema::new("paragraph", ContentModel::Inline, build_paragraph));
        registry.register(
            BlockSchema::new("heading", ContentModel::Inline, build_heading).with_field(
                FieldSpec::optional(
                    "level",
                    FieldKind::Integer {
                        min: HeadingLevel::MIN as i64,
                        max: HeadingLevel::MAX as i64,
                    },
                ),
            ),
        );
        registry.register(BlockSchema::new("quote", ContentModel::Inline, build_quote));
        registry.register(BlockSchema::new("codeBlock", ContentModel::Inline, build_code));
        registry.register(BlockSchema::new("divider", ContentModel::Empty, build_divider));
        registry.register(BlockSchema::new("table", ContentModel::Table, build_table));

        for list in ListKind::ALL {
            registry.register(BlockSchema::new(
                list.item_type(),
                ContentModel::Inline,
                build_list_item,
            ));
            registry.register(BlockSchema::new(
                list.container_type(),
                ContentModel::Inline,
                build_list,
            ));
        }

        for media in MediaKind::ALL {
            registry.register(BlockSchema::new(
                media.type_name(),
                ContentModel::Media,
                build_media,
            ));
        }

        registry
    }

    /// The shared registry with the built-in block types.
    pub fn standard() -> &'static BlockRegistry {
        static REGISTRY: OnceLock<BlockRegistry> = OnceLock::new();
        REGISTRY.get_or_init(BlockRegistry::with_defaults)
    }

    /// Register a schema, replacing any schema with the same name.
    pub fn register(&mut self, schema: BlockSchema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// Get the schema for a type discriminator.
    pub fn get(&self, block_type: &str) -> Option<&BlockSchema> {
        self.schemas.get(block_type)
    }

    /// Check if a type discriminator is registered.
    pub fn supports(&self, block_type: &str) -> bool {
        self.schemas.contains_key(block_type)
    }

    /// All registered type discriminators, sorted.
    pub fn block_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn inline(content: ParsedContent) -> Option<Vec<InlineContent>> {
    match content {
        ParsedContent::Inline(content) => Some(content),
        _ => None,
    }
}

fn build_paragraph(parts: BlockParts<'_>) -> Option<BlockKind> {
    Some(BlockKind::Paragraph {
        content: inline(parts.content)?,
        props: parts.props,
    })
}

fn build_heading(parts: BlockParts<'_>) -> Option<BlockKind> {
    let level = parts
        .fields
        .get("level")
        .and_then(Value::as_i64)
        .and_then(HeadingLevel::try_new)
        .unwrap_or_default();

    Some(BlockKind::Heading {
        level,
        content: inline(parts.content)?,
        props: parts.props,
    })
}

fn build_quote(parts: BlockParts<'_>) -> Option<BlockKind> {
    Some(BlockKind::Quote {
        content: inline(parts.content)?,
        props: parts.props,
    })
}

fn build_code(parts: BlockParts<'_>) -> Option<BlockKind> {
    Some(BlockKind::Code {
        content: inline(parts.content)?,
        props: parts.props,
    })
}

fn build_list_item(parts: BlockParts<'_>) -> Option<BlockKind> {
    Some(BlockKind::ListItem {
        list: ListKind::from_item_type(parts.block_type)?,
        content: inline(parts.content)?,
        props: parts.props,
    })
}

fn build_list(parts: BlockParts<'_>) -> Option<BlockKind> {
    Some(BlockKind::List {
        list: ListKind::from_container_type(parts.block_type)?,
        content: inline(parts.content)?,
        props: parts.props,
    })
}

fn build_divider(parts: BlockParts<'_>) -> Option<BlockKind> {
    match parts.content {
        ParsedContent::Empty => Some(BlockKind::Divider { props: parts.props }),
        _ => None,
    }
}

fn build_table(parts: BlockParts<'_>) -> Option<BlockKind> {
    match parts.content {
        ParsedContent::Table(content) => Some(BlockKind::Table {
            content,
            props: parts.props,
        }),
        _ => None,
    }
}

fn build_media(parts: BlockParts<'_>) -> Option<BlockKind> {
    let kind = MediaKind::from_type(parts.block_type)?;
    Some(BlockKind::Media(MediaBlock {
        kind,
        props: parts.props,
        legacy: parts.legacy,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_with_defaults() {
        let registry = BlockRegistry::with_defaults();
        for name in [
            "paragraph",
            "heading",
            "quote",
            "codeBlock",
            "divider",
            "table",
            "image",
            "video",
            "audio",
            "file",
            "bulletListItem",
            "numberedListItem",
            "checkListItem",
            "toggleListItem",
            "bulletList",
            "toggleList",
        ] {
            assert!(registry.supports(name), "missing {}", name);
        }
        assert!(!registry.supports("mystery"));
        assert!(!registry.supports("Paragraph"));
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_standard_registry_is_shared() {
        let a = BlockRegistry::standard() as *const BlockRegistry;
        let b = BlockRegistry::standard() as *const BlockRegistry;
        assert_eq!(a, b);
    }

    #[test]
    fn test_heading_schema_declares_level() {
        let registry = BlockRegistry::with_defaults();
        let schema = registry.get("heading").unwrap();
        assert_eq!(schema.content(), ContentModel::Inline);
        assert_eq!(schema.fields().len(), 1);

        let level = &schema.fields()[0];
        assert!(level.kind.accepts(&json!(3)));
        assert!(!level.kind.accepts(&json!(4)));
        assert!(!level.kind.accepts(&json!("2")));
    }

    #[test]
    fn test_builders_reject_mismatched_content() {
        let registry = BlockRegistry::with_defaults();
        let parts = BlockParts {
            block_type: "divider",
            content: ParsedContent::Inline(vec![InlineContent::text("x")]),
            props: Map::new(),
            fields: Map::new(),
            legacy: Map::new(),
        };
        assert!(registry.get("divider").unwrap().build(parts).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = BlockRegistry::new();
        assert!(registry.is_empty());

        registry.register(BlockSchema::new("note", ContentModel::Inline, build_quote));
        registry.register(BlockSchema::new("note", ContentModel::Inline, build_paragraph));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.block_types(), vec!["note"]);
    }
}

//! Block-level types.

use super::{plain_text, InlineContent, TableContent};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of rich-text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Opaque identifier assigned by the authoring tool
    pub id: Option<String>,

    /// Explicit alignment; `None` means the renderer's default
    pub align: Option<Alignment>,

    /// Nested blocks (list items, toggles)
    pub children: Vec<Block>,

    /// Type-specific payload
    pub kind: BlockKind,
}

impl Block {
    /// Create a block of the given kind with no id, alignment or children.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: None,
            align: None,
            children: Vec::new(),
            kind,
        }
    }

    /// Create a paragraph with plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph {
            content: vec![InlineContent::text(text)],
            props: Map::new(),
        })
    }

    /// Create a heading with plain text.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::new(BlockKind::Heading {
            level: HeadingLevel::new(level),
            content: vec![InlineContent::text(text)],
            props: Map::new(),
        })
    }

    /// Create a divider.
    pub fn divider() -> Self {
        Self::new(BlockKind::Divider { props: Map::new() })
    }

    /// Set the id and return self.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the alignment and return self.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Add a child block and return self.
    pub fn with_child(mut self, child: Block) -> Self {
        self.children.push(child);
        self
    }

    /// The type discriminator of this block, if it has one.
    pub fn block_type(&self) -> Option<&str> {
        self.kind.type_name()
    }

    /// Inline content of text-bearing blocks.
    pub fn inline_content(&self) -> Option<&[InlineContent]> {
        self.kind.inline_content()
    }

    /// Plain text of this block's own inline content (children excluded).
    pub fn plain_text(&self) -> String {
        self.inline_content().map(plain_text).unwrap_or_default()
    }

    /// Check if this block is the permissive fallback.
    pub fn is_generic(&self) -> bool {
        matches!(self.kind, BlockKind::Generic(_))
    }

    /// Total number of blocks in this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Block::count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Block::depth).max().unwrap_or(0)
    }
}

/// The type-specific payload of a block.
///
/// Each variant only admits content that fits its type, so a parsed tree can
/// never hold e.g. a divider with text. Anything that cannot be matched lands
/// in [`BlockKind::Generic`].
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// A paragraph of text
    Paragraph {
        content: Vec<InlineContent>,
        props: Map<String, Value>,
    },

    /// A section heading
    Heading {
        level: HeadingLevel,
        content: Vec<InlineContent>,
        props: Map<String, Value>,
    },

    /// A block quote
    Quote {
        content: Vec<InlineContent>,
        props: Map<String, Value>,
    },

    /// A code block; the language, if any, lives in `props`
    Code {
        content: Vec<InlineContent>,
        props: Map<String, Value>,
    },

    /// A list item; nesting is expressed through the block's children
    ListItem {
        list: ListKind,
        content: Vec<InlineContent>,
        props: Map<String, Value>,
    },

    /// A list container
    List {
        list: ListKind,
        content: Vec<InlineContent>,
        props: Map<String, Value>,
    },

    /// A horizontal rule
    Divider { props: Map<String, Value> },

    /// An image, video, audio clip or file
    Media(MediaBlock),

    /// A table
    Table {
        content: TableContent,
        props: Map<String, Value>,
    },

    /// Permissive fallback for unknown or malformed nodes
    Generic(GenericBlock),
}

impl BlockKind {
    /// The type discriminator of this kind.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            BlockKind::Paragraph { .. } => Some("paragraph"),
            BlockKind::Heading { .. } => Some("heading"),
            BlockKind::Quote { .. } => Some("quote"),
            BlockKind::Code { .. } => Some("codeBlock"),
            BlockKind::ListItem { list, .. } => Some(list.item_type()),
            BlockKind::List { list, .. } => Some(list.container_type()),
            BlockKind::Divider { .. } => Some("divider"),
            BlockKind::Media(media) => Some(media.kind.type_name()),
            BlockKind::Table { .. } => Some("table"),
            BlockKind::Generic(generic) => generic.block_type(),
        }
    }

    /// Inline content of text-bearing kinds.
    pub fn inline_content(&self) -> Option<&[InlineContent]> {
        match self {
            BlockKind::Paragraph { content, .. }
            | BlockKind::Heading { content, .. }
            | BlockKind::Quote { content, .. }
            | BlockKind::Code { content, .. }
            | BlockKind::ListItem { content, .. }
            | BlockKind::List { content, .. } => Some(content),
            _ => None,
        }
    }

    /// The free-form properties bag, for kinds that carry one.
    pub fn props(&self) -> Option<&Map<String, Value>> {
        match self {
            BlockKind::Paragraph { props, .. }
            | BlockKind::Heading { props, .. }
            | BlockKind::Quote { props, .. }
            | BlockKind::Code { props, .. }
            | BlockKind::ListItem { props, .. }
            | BlockKind::List { props, .. }
            | BlockKind::Divider { props }
            | BlockKind::Table { props, .. } => Some(props),
            BlockKind::Media(media) => Some(&media.props),
            BlockKind::Generic(_) => None,
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Parse an alignment keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }

    /// The keyword for this alignment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Heading level, always within 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Smallest allowed level.
    pub const MIN: u8 = 1;
    /// Largest allowed level.
    pub const MAX: u8 = 3;

    /// Create a level, clamping into range.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    /// Create a level, rejecting out-of-range values.
    pub fn try_new(level: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Some(Self(level as u8))
        } else {
            None
        }
    }

    /// The numeric level.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Kind of list an item or container belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Unordered list
    Bullet,
    /// Ordered list
    Numbered,
    /// Checklist
    Check,
    /// Collapsible toggle list
    Toggle,
}

impl ListKind {
    /// All list kinds.
    pub const ALL: [ListKind; 4] = [
        ListKind::Bullet,
        ListKind::Numbered,
        ListKind::Check,
        ListKind::Toggle,
    ];

    /// Type discriminator of an item of this list kind.
    pub fn item_type(&self) -> &'static str {
        match self {
            ListKind::Bullet => "bulletListItem",
            ListKind::Numbered => "numberedListItem",
            ListKind::Check => "checkListItem",
            ListKind::Toggle => "toggleListItem",
        }
    }

    /// Type discriminator of a container of this list kind.
    pub fn container_type(&self) -> &'static str {
        match self {
            ListKind::Bullet => "bulletList",
            ListKind::Numbered => "numberedList",
            ListKind::Check => "checkList",
            ListKind::Toggle => "toggleList",
        }
    }

    /// Find the list kind whose item type is `name`.
    pub fn from_item_type(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.item_type() == name)
    }

    /// Find the list kind whose container type is `name`.
    pub fn from_container_type(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.container_type() == name)
    }
}

/// Kind of media block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    File,
}

impl MediaKind {
    /// All media kinds.
    pub const ALL: [MediaKind; 4] = [
        MediaKind::Image,
        MediaKind::Video,
        MediaKind::Audio,
        MediaKind::File,
    ];

    /// Type discriminator of this media kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::File => "file",
        }
    }

    /// Find the media kind for a type discriminator.
    pub fn from_type(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }
}

/// A media block.
///
/// `props` is the properties bag. `legacy` holds media fields that older
/// editor revisions wrote at the block's top level; they are folded into
/// `props` during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    /// Which media type this is
    pub kind: MediaKind,

    /// Properties bag (`url`, `caption`, `altText`, ...)
    pub props: Map<String, Value>,

    /// Media fields found outside the properties bag
    pub legacy: Map<String, Value>,
}

impl MediaBlock {
    /// Media keys recognised outside the properties bag.
    pub const LEGACY_KEYS: [&'static str; 7] = [
        "url",
        "caption",
        "altText",
        "previewWidth",
        "previewHeight",
        "name",
        "size",
    ];

    /// Create a media block with an empty properties bag.
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            props: Map::new(),
            legacy: Map::new(),
        }
    }

    /// Look up a media field, preferring the properties bag.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.props.get(key).or_else(|| self.legacy.get(key))
    }

    /// The media URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.field("url").and_then(Value::as_str)
    }

    /// The caption, if any.
    pub fn caption(&self) -> Option<&str> {
        self.field("caption").and_then(Value::as_str)
    }

    /// Preview width in pixels, if any.
    pub fn preview_width(&self) -> Option<f64> {
        self.field("previewWidth").and_then(Value::as_f64)
    }

    /// Preview height in pixels, if any.
    pub fn preview_height(&self) -> Option<f64> {
        self.field("previewHeight").and_then(Value::as_f64)
    }

    /// The file name, if any.
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }
}

/// The permissive fallback block.
///
/// Keeps the original node's fields verbatim so that unknown or malformed
/// content survives a parse/normalize round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericBlock {
    /// Original fields, minus parsed `children` and lifted `id`/`align`
    pub fields: Map<String, Value>,
}

impl GenericBlock {
    /// Create a fallback block from a field bag.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The original `type` field, if it was a string.
    pub fn block_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }
}

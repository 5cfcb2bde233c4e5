//! Parsing of untrusted block nodes into typed documents.

mod block;
mod document;
mod inline;
mod options;
mod registry;

pub use block::{parse_table_content, BlockParser};
pub use document::DocumentParser;
pub use inline::{parse_inline_content, parse_styles, render_best_effort, resolve_inline_item};
pub use options::{ParseOptions, ParseReport, DEFAULT_MAX_DEPTH};
pub use registry::{
    BlockBuilder, BlockParts, BlockRegistry, BlockSchema, ContentModel, FieldKind, FieldSpec,
    ParsedContent,
};

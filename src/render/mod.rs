//! Rendering of parsed documents: canonical JSON, excerpts and plain text.

mod excerpt;
mod json;
mod normalize;
mod options;
mod text;

pub use excerpt::{
    extract_excerpt, extract_excerpt_from_body, extract_excerpt_from_pages, Excerpt,
};
pub use json::{to_json, JsonFormat};
pub use normalize::{
    merge_media_props, normalize_block, normalize_blocks, normalize_body, normalize_document,
    normalize_inline, normalize_inline_content, normalize_pages, normalize_parsed_body,
};
pub use options::{
    ExcerptOptions, DEFAULT_ELLIPSIS, DEFAULT_EXCERPT_LENGTH, DEFAULT_FALLBACK, MAX_EXCERPT_LENGTH,
};
pub use text::{body_to_text, to_text};

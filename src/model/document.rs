//! Document-level types: parsed page bodies and the raw article body.

use super::Block;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A parsed page body: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Top-level blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Total number of blocks, nested ones included.
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(Block::count).sum()
    }

    /// Depth of the deepest block (0 for an empty document).
    pub fn depth(&self) -> usize {
        self.blocks.iter().map(Block::depth).max().unwrap_or(0)
    }
}

/// One page of a multi-page article, as received from the request layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Raw block nodes of the page
    pub page_body: Vec<Value>,
}

impl Page {
    /// Create a page.
    pub fn new(page_number: u32, page_body: Vec<Value>) -> Self {
        Self {
            page_number,
            page_body,
        }
    }
}

/// A parsed page.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPage {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Parsed page body
    pub document: Document,
}

/// A parsed article body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// One implicit page
    Single(Document),

    /// Explicit pages in page order
    Paged(Vec<ParsedPage>),
}

impl ParsedBody {
    /// The first page's document, if there is one.
    pub fn first_page(&self) -> Option<&Document> {
        match self {
            ParsedBody::Single(doc) => Some(doc),
            ParsedBody::Paged(pages) => pages.first().map(|p| &p.document),
        }
    }

    /// Total number of blocks across all pages.
    pub fn block_count(&self) -> usize {
        match self {
            ParsedBody::Single(doc) => doc.block_count(),
            ParsedBody::Paged(pages) => pages.iter().map(|p| p.document.block_count()).sum(),
        }
    }
}

/// The raw body of an article: one implicit page or an explicit page list.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleBody {
    /// `currentPageBody`
    Single(Vec<Value>),

    /// `pages`, sorted by page number
    Paged(Vec<Page>),
}

impl ArticleBody {
    /// Build an article body from the two mutually exclusive request fields.
    ///
    /// Exactly one of `current_page_body` and `pages` must be present. Page
    /// numbers must be positive and unique; pages are returned in page order.
    pub fn from_parts(
        current_page_body: Option<Vec<Value>>,
        pages: Option<Vec<Page>>,
    ) -> Result<Self> {
        match (current_page_body, pages) {
            (Some(_), Some(_)) => Err(Error::BodyConflict),
            (None, None) => Err(Error::MissingBody),
            (Some(body), None) => Ok(ArticleBody::Single(body)),
            (None, Some(mut pages)) => {
                let mut seen = HashSet::new();
                for page in &pages {
                    if page.page_number == 0 {
                        return Err(Error::InvalidPage(
                            "page numbers start at 1".to_string(),
                        ));
                    }
                    if !seen.insert(page.page_number) {
                        return Err(Error::InvalidPage(format!(
                            "duplicate page number {}",
                            page.page_number
                        )));
                    }
                }
                pages.sort_by_key(|p| p.page_number);
                Ok(ArticleBody::Paged(pages))
            }
        }
    }

    /// Build an article body from a request object holding
    /// `currentPageBody` or `pages`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::InvalidInput("expected a JSON object".to_string()))?;

        let current = match object.get("currentPageBody") {
            None | Some(Value::Null) => None,
            Some(body) => Some(serde_json::from_value::<Vec<Value>>(body.clone())?),
        };
        let pages = match object.get("pages") {
            None | Some(Value::Null) => None,
            Some(pages) => Some(serde_json::from_value::<Vec<Page>>(pages.clone())?),
        };

        Self::from_parts(current, pages)
    }

    /// Check if this body is split into explicit pages.
    pub fn is_paged(&self) -> bool {
        matches!(self, ArticleBody::Paged(_))
    }

    /// Number of pages (1 for a single implicit page).
    pub fn page_count(&self) -> usize {
        match self {
            ArticleBody::Single(_) => 1,
            ArticleBody::Paged(pages) => pages.len(),
        }
    }
}

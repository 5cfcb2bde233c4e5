//! Document parser: applies the block parser across page bodies.

use super::{BlockParser, BlockRegistry, ParseOptions, ParseReport};
use crate::model::{ArticleBody, Document, Page, ParsedBody, ParsedPage};
use serde_json::Value;

/// Parses page bodies and article bodies into documents.
#[derive(Debug, Clone)]
pub struct DocumentParser<'r> {
    registry: &'r BlockRegistry,
    options: ParseOptions,
}

impl<'r> DocumentParser<'r> {
    /// Create a document parser.
    pub fn new(registry: &'r BlockRegistry, options: ParseOptions) -> Self {
        Self { registry, options }
    }

    /// The options this parser was created with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse one page body.
    pub fn parse_body(&self, nodes: &[Value]) -> Document {
        self.parse_body_with_report(nodes).0
    }

    /// Parse one page body and report what had to be degraded.
    pub fn parse_body_with_report(&self, nodes: &[Value]) -> (Document, ParseReport) {
        let mut parser = BlockParser::new(self.registry, &self.options);
        let blocks = nodes.iter().map(|node| parser.parse(node)).collect();
        (Document::from_blocks(blocks), parser.report())
    }

    /// Parse a list of pages, in the order given.
    pub fn parse_pages(&self, pages: &[Page]) -> Vec<ParsedPage> {
        self.parse_pages_with_report(pages).0
    }

    /// Parse a list of pages and report what had to be degraded.
    pub fn parse_pages_with_report(&self, pages: &[Page]) -> (Vec<ParsedPage>, ParseReport) {
        let results = self.parse_each_page(pages);

        let mut report = ParseReport::default();
        let parsed = results
            .into_iter()
            .map(|(page, page_report)| {
                report.merge(page_report);
                page
            })
            .collect();

        (parsed, report)
    }

    /// Parse an article body (single implicit page or explicit pages).
    pub fn parse_article_body(&self, body: &ArticleBody) -> ParsedBody {
        self.parse_article_body_with_report(body).0
    }

    /// Parse an article body and report what had to be degraded.
    pub fn parse_article_body_with_report(&self, body: &ArticleBody) -> (ParsedBody, ParseReport) {
        let (parsed, report) = match body {
            ArticleBody::Single(nodes) => {
                let (doc, report) = self.parse_body_with_report(nodes);
                (ParsedBody::Single(doc), report)
            }
            ArticleBody::Paged(pages) => {
                let (pages, report) = self.parse_pages_with_report(pages);
                (ParsedBody::Paged(pages), report)
            }
        };

        if report.depth_truncations > 0 {
            log::warn!(
                "Article body exceeded the nesting limit in {} place(s)",
                report.depth_truncations
            );
        }

        (parsed, report)
    }

    fn parse_page(&self, page: &Page) -> (ParsedPage, ParseReport) {
        let (document, report) = self.parse_body_with_report(&page.page_body);
        (
            ParsedPage {
                page_number: page.page_number,
                document,
            },
            report,
        )
    }

    #[cfg(feature = "parallel")]
    fn parse_each_page(&self, pages: &[Page]) -> Vec<(ParsedPage, ParseReport)> {
        use rayon::prelude::*;

        if self.options.parallel && pages.len() > 1 {
            pages.par_iter().map(|page| self.parse_page(page)).collect()
        } else {
            pages.iter().map(|page| self.parse_page(page)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn parse_each_page(&self, pages: &[Page]) -> Vec<(ParsedPage, ParseReport)> {
        pages.iter().map(|page| self.parse_page(page)).collect()
    }
}

impl Default for DocumentParser<'static> {
    fn default() -> Self {
        Self::new(BlockRegistry::standard(), ParseOptions::default())
    }
}

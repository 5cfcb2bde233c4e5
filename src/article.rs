//! Article assembly: turns create and update requests into storable records.
//!
//! The assembler enforces the document-level contract (non-empty title,
//! exactly one of `currentPageBody` and `pages`) before any block parsing,
//! then parses and normalizes the body, derives the slug and excerpt, and
//! stamps timestamps.
//!
//! # Example
//!
//! ```
//! use blockdoc::article::{ArticleAssembler, ArticleRequest};
//! use serde_json::json;
//!
//! let request: ArticleRequest = serde_json::from_value(json!({
//!     "title": "Match Report: Arsenal 2-1 Chelsea",
//!     "currentPageBody": [
//!         {"type": "heading", "level": 1, "content": "Late winner"},
//!         {"type": "paragraph", "content": "A header in stoppage time."}
//!     ]
//! }))?;
//!
//! let record = ArticleAssembler::default().create(request)?;
//! assert_eq!(record.slug, "match-report-arsenal-2-1-chelsea");
//! assert_eq!(record.excerpt.text(), Some("Late winner"));
//! # Ok::<(), blockdoc::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::model::{ArticleBody, Page, ParsedBody};
use crate::parser::{BlockRegistry, DocumentParser, ParseOptions};
use crate::render::{extract_excerpt_from_body, normalize_document, ExcerptOptions};
use crate::slug::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Publication status of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Not visible to readers
    #[default]
    Draft,
    /// Visible to readers
    Published,
}

impl ArticleStatus {
    /// The stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
        }
    }
}

/// Where an article's excerpt came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExcerptState {
    /// No excerpt could be derived; render the fallback sentence
    #[default]
    Unset,
    /// Derived from the body; replaced when the body changes
    Generated(String),
    /// Supplied by the author; never overwritten by regeneration
    UserProvided(String),
}

impl ExcerptState {
    /// The excerpt text, if there is one.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExcerptState::Unset => None,
            ExcerptState::Generated(text) | ExcerptState::UserProvided(text) => Some(text),
        }
    }

    /// Check if the author supplied this excerpt.
    pub fn is_user_provided(&self) -> bool {
        matches!(self, ExcerptState::UserProvided(_))
    }

    /// Stored label for the excerpt's origin.
    pub fn source(&self) -> &'static str {
        match self {
            ExcerptState::Unset => "none",
            ExcerptState::Generated(_) => "generated",
            ExcerptState::UserProvided(_) => "user",
        }
    }
}

/// A request to create an article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    /// Article title (required, non-blank)
    pub title: String,

    /// Explicit slug; derived from the title when absent or blank
    pub slug: Option<String>,

    /// Explicit excerpt; derived from the body when absent or blank
    pub excerpt: Option<String>,

    /// Body of a single-page article
    pub current_page_body: Option<Vec<Value>>,

    /// Pages of a multi-page article
    pub pages: Option<Vec<Page>>,

    /// Publication status (default draft)
    pub status: Option<ArticleStatus>,

    /// Author details, passed through
    pub author: Option<Value>,

    /// Category, passed through
    pub category: Option<Value>,

    /// Feature image, passed through
    pub feature_image: Option<Value>,

    /// Pagination details, passed through
    pub pagination: Option<Value>,
}

/// A partial update of an existing article. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub current_page_body: Option<Vec<Value>>,
    pub pages: Option<Vec<Page>>,
    pub status: Option<ArticleStatus>,
    pub author: Option<Value>,
    pub category: Option<Value>,
    pub feature_image: Option<Value>,
    pub pagination: Option<Value>,
}

/// A storable article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    pub title: String,
    pub slug: String,
    pub excerpt: ExcerptState,
    pub status: ArticleStatus,

    /// Normalized body
    pub body: ArticleBody,

    pub author: Option<Value>,
    pub category: Option<Value>,
    pub feature_image: Option<Value>,
    pub pagination: Option<Value>,

    /// Unix seconds; set when the article is first published
    pub publish_date: Option<i64>,

    /// Unix seconds
    pub date_created: i64,

    /// Unix seconds
    pub last_updated: i64,
}

impl ArticleRecord {
    /// The persistable document, with the default fallback sentence for a
    /// missing excerpt.
    pub fn to_json(&self) -> Value {
        self.to_json_with(&ExcerptOptions::default())
    }

    /// The persistable document, with the fallback sentence taken from
    /// `options`.
    pub fn to_json_with(&self, options: &ExcerptOptions) -> Value {
        let mut out = Map::new();
        out.insert("title".to_string(), Value::String(self.title.clone()));
        out.insert("slug".to_string(), Value::String(self.slug.clone()));

        let excerpt = self.excerpt.text().unwrap_or(&options.fallback);
        out.insert("excerpt".to_string(), Value::String(excerpt.to_string()));
        out.insert("excerptSource".to_string(), Value::from(self.excerpt.source()));
        out.insert("status".to_string(), Value::from(self.status.as_str()));

        for (key, value) in [
            ("author", &self.author),
            ("category", &self.category),
            ("featureImage", &self.feature_image),
            ("pagination", &self.pagination),
        ] {
            if let Some(value) = value {
                out.insert(key.to_string(), value.clone());
            }
        }

        match &self.body {
            ArticleBody::Single(blocks) => {
                out.insert("currentPageBody".to_string(), Value::Array(blocks.clone()));
            }
            ArticleBody::Paged(pages) => {
                let pages = pages
                    .iter()
                    .map(|page| {
                        let mut entry = Map::new();
                        entry.insert("pageNumber".to_string(), Value::from(page.page_number));
                        entry.insert("pageBody".to_string(), Value::Array(page.page_body.clone()));
                        Value::Object(entry)
                    })
                    .collect();
                out.insert("pages".to_string(), Value::Array(pages));
            }
        }

        if let Some(date) = self.publish_date {
            out.insert("publishDate".to_string(), Value::from(date));
        }
        out.insert("dateCreated".to_string(), Value::from(self.date_created));
        out.insert("lastUpdated".to_string(), Value::from(self.last_updated));

        Value::Object(out)
    }
}

/// Builds [`ArticleRecord`]s from requests.
#[derive(Debug, Clone)]
pub struct ArticleAssembler<'r> {
    parser: DocumentParser<'r>,
    excerpt: ExcerptOptions,
}

impl<'r> ArticleAssembler<'r> {
    /// Create an assembler.
    pub fn new(
        registry: &'r BlockRegistry,
        parse_options: ParseOptions,
        excerpt_options: ExcerptOptions,
    ) -> Self {
        Self {
            parser: DocumentParser::new(registry, parse_options),
            excerpt: excerpt_options,
        }
    }

    /// Excerpt options in use.
    pub fn excerpt_options(&self) -> &ExcerptOptions {
        &self.excerpt
    }

    /// Assemble a new article, timestamped now.
    pub fn create(&self, request: ArticleRequest) -> Result<ArticleRecord> {
        self.create_at(request, Utc::now())
    }

    /// Assemble a new article with an explicit timestamp.
    pub fn create_at(&self, request: ArticleRequest, now: DateTime<Utc>) -> Result<ArticleRecord> {
        if request.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        let body = ArticleBody::from_parts(request.current_page_body, request.pages)?;

        let parsed = self.parse(&body);

        let slug = non_blank(request.slug).unwrap_or_else(|| slugify(&request.title));
        let excerpt = match non_blank(request.excerpt) {
            Some(text) => ExcerptState::UserProvided(text),
            None => self.generate_excerpt(&parsed),
        };

        let status = request.status.unwrap_or_default();
        let timestamp = now.timestamp();

        log::debug!("Assembled article {:?} ({})", slug, excerpt.source());

        Ok(ArticleRecord {
            title: request.title,
            slug,
            excerpt,
            status,
            body: normalized_body(&parsed),
            author: request.author,
            category: request.category,
            feature_image: request.feature_image,
            pagination: request.pagination,
            publish_date: (status == ArticleStatus::Published).then_some(timestamp),
            date_created: timestamp,
            last_updated: timestamp,
        })
    }

    /// Apply a partial update, timestamped now.
    pub fn update(&self, existing: &ArticleRecord, update: ArticleUpdate) -> Result<ArticleRecord> {
        self.update_at(existing, update, Utc::now())
    }

    /// Apply a partial update with an explicit timestamp.
    ///
    /// A replaced body regenerates the excerpt unless the author supplied
    /// it; an unset excerpt is always regenerated. An explicit blank
    /// excerpt clears the author's excerpt and regenerates it.
    pub fn update_at(
        &self,
        existing: &ArticleRecord,
        update: ArticleUpdate,
        now: DateTime<Utc>,
    ) -> Result<ArticleRecord> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(Error::EmptyTitle);
            }
        }
        let new_body = match (update.current_page_body, update.pages) {
            (None, None) => None,
            (current, pages) => Some(ArticleBody::from_parts(current, pages)?),
        };

        let mut record = existing.clone();
        let timestamp = now.timestamp();

        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(slug) = non_blank(update.slug) {
            record.slug = slug;
        }

        let parsed = new_body.as_ref().map(|body| self.parse(body));
        if let Some(parsed) = &parsed {
            record.body = normalized_body(parsed);
        }

        record.excerpt = match update.excerpt {
            Some(text) if !text.trim().is_empty() => ExcerptState::UserProvided(text),
            explicit => {
                let cleared = explicit.is_some();
                let keep = record.excerpt.is_user_provided() && !cleared;
                let stale = parsed.is_some() || cleared || record.excerpt == ExcerptState::Unset;

                if keep || !stale {
                    record.excerpt
                } else {
                    let parsed = match parsed {
                        Some(parsed) => parsed,
                        None => self.parse(&record.body),
                    };
                    self.generate_excerpt(&parsed)
                }
            }
        };

        if let Some(status) = update.status {
            if status == ArticleStatus::Published && record.status != ArticleStatus::Published {
                record.publish_date = Some(timestamp);
            }
            record.status = status;
        }

        if update.author.is_some() {
            record.author = update.author;
        }
        if update.category.is_some() {
            record.category = update.category;
        }
        if update.feature_image.is_some() {
            record.feature_image = update.feature_image;
        }
        if update.pagination.is_some() {
            record.pagination = update.pagination;
        }

        record.last_updated = timestamp;
        Ok(record)
    }

    fn parse(&self, body: &ArticleBody) -> ParsedBody {
        let (parsed, report) = self.parser.parse_article_body_with_report(body);
        if report.fallbacks > 0 {
            log::debug!(
                "{} of {} block(s) kept as fallback blocks",
                report.fallbacks,
                report.blocks
            );
        }
        parsed
    }

    fn generate_excerpt(&self, parsed: &ParsedBody) -> ExcerptState {
        match extract_excerpt_from_body(parsed, &self.excerpt).as_text() {
            Some(text) => ExcerptState::Generated(text.to_string()),
            None => ExcerptState::Unset,
        }
    }
}

impl Default for ArticleAssembler<'static> {
    fn default() -> Self {
        Self::new(
            BlockRegistry::standard(),
            ParseOptions::default(),
            ExcerptOptions::default(),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn normalized_body(parsed: &ParsedBody) -> ArticleBody {
    match parsed {
        ParsedBody::Single(doc) => ArticleBody::Single(normalize_document(doc)),
        ParsedBody::Paged(pages) => ArticleBody::Paged(
            pages
                .iter()
                .map(|page| Page::new(page.page_number, normalize_document(&page.document)))
                .collect(),
        ),
    }
}

//! Inline content: styled text runs and links.

/// Inline content within a text-bearing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A hyperlink wrapping one or more text runs
    Link(Link),
}

impl InlineContent {
    /// Create an unstyled text item.
    pub fn text(text: impl Into<String>) -> Self {
        InlineContent::Text(TextRun::new(text))
    }

    /// Get the plain text of this item, styling discarded.
    pub fn plain_text(&self) -> String {
        match self {
            InlineContent::Text(run) => run.text.clone(),
            InlineContent::Link(link) => link.plain_text(),
        }
    }
}

/// Concatenate the plain text of a sequence of inline items.
pub fn plain_text(content: &[InlineContent]) -> String {
    content.iter().map(InlineContent::plain_text).collect()
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub styles: Styles,
}

impl TextRun {
    /// Create a new text run with no styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Styles::default(),
        }
    }

    /// Create a text run with the given styles.
    pub fn styled(text: impl Into<String>, styles: Styles) -> Self {
        Self {
            text: text.into(),
            styles,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link target URL
    pub href: String,

    /// Visible link text
    pub content: Vec<TextRun>,
}

impl Link {
    /// Create a link with a single unstyled run.
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            content: vec![TextRun::new(text)],
        }
    }

    /// Get the visible text of the link.
    pub fn plain_text(&self) -> String {
        self.content.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The set of styles a text run may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Styles {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strike: bool,
}

impl Styles {
    /// Flag names in canonical order.
    pub const NAMES: [&'static str; 4] = ["bold", "italic", "underline", "strike"];

    /// Bold only.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Italic only.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }

    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.strike
    }

    /// Get a flag by name.
    pub fn get(&self, name: &str) -> bool {
        match name {
            "bold" => self.bold,
            "italic" => self.italic,
            "underline" => self.underline,
            "strike" => self.strike,
            _ => false,
        }
    }

    /// Set a flag by name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: bool) {
        match name {
            "bold" => self.bold = value,
            "italic" => self.italic = value,
            "underline" => self.underline = value,
            "strike" => self.strike = value,
            _ => {}
        }
    }

    /// Iterate over the names of the flags that are set.
    pub fn active(&self) -> impl Iterator<Item = &'static str> + '_ {
        Self::NAMES.into_iter().filter(move |name| self.get(name))
    }
}

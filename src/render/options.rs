//! Excerpt options and configuration.

/// Default maximum excerpt length in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// Upper bound accepted for [`ExcerptOptions::max_length`].
pub const MAX_EXCERPT_LENGTH: usize = 10_000;

/// Default marker appended to a truncated excerpt.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Default sentence used when a body has no usable text.
pub const DEFAULT_FALLBACK: &str = "No introductory text available for excerpt generation.";

/// Options for excerpt extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptOptions {
    /// Maximum excerpt length in characters, ellipsis excluded
    pub max_length: usize,

    /// Marker appended when the text is cut
    pub ellipsis: String,

    /// Sentence used in place of an empty excerpt
    pub fallback: String,

    /// How deep to descend into child blocks when no top-level block has text
    pub max_depth: usize,
}

impl ExcerptOptions {
    /// Create new excerpt options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum length (clamped to 1..=10000).
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = length.clamp(1, MAX_EXCERPT_LENGTH);
        self
    }

    /// Set the truncation marker.
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Set the fallback sentence.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Set the descent limit for child blocks.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_EXCERPT_LENGTH,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            fallback: DEFAULT_FALLBACK.to_string(),
            max_depth: crate::parser::DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExcerptOptions::default();
        assert_eq!(options.max_length, 150);
        assert_eq!(options.ellipsis, "...");
        assert_eq!(options.max_depth, 64);
        assert!(options.fallback.starts_with("No introductory text"));
    }

    #[test]
    fn test_builder() {
        let options = ExcerptOptions::new()
            .with_max_length(0)
            .with_ellipsis("…")
            .with_fallback("Nothing here.");
        assert_eq!(options.max_length, 1);
        assert_eq!(options.ellipsis, "…");
        assert_eq!(options.fallback, "Nothing here.");

        let options = ExcerptOptions::new().with_max_length(1_000_000);
        assert_eq!(options.max_length, MAX_EXCERPT_LENGTH);
    }
}

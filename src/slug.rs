//! URL slugs for article titles.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Slug used when a title has no usable characters.
pub const UNTITLED_SLUG: &str = "untitled-blog";

/// Turn a title into a URL slug.
///
/// Accented letters are reduced to their base letter; any other character
/// outside `[a-z0-9]`, whitespace and `-` is dropped. Runs of whitespace and
/// hyphens become a single hyphen, and leading or trailing hyphens are
/// removed.
///
/// ```
/// use blockdoc::slugify;
///
/// assert_eq!(slugify("Hello, World! 2025"), "hello-world-2025");
/// assert_eq!(slugify("Atlético Madrid"), "atletico-madrid");
/// assert_eq!(slugify("???"), "untitled-blog");
/// ```
pub fn slugify(title: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();

    let disallowed = DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[\s-]+").unwrap());

    let folded: String = title
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let stripped = disallowed.replace_all(&folded, "");
    let slug = separators.replace_all(&stripped, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        UNTITLED_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Hello, World! 2025"), "hello-world-2025");
        assert_eq!(slugify("  Rust   is -- fun  "), "rust-is-fun");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_untitled() {
        assert_eq!(slugify("???"), UNTITLED_SLUG);
        assert_eq!(slugify(""), UNTITLED_SLUG);
        assert_eq!(slugify(" - "), UNTITLED_SLUG);
        assert_eq!(slugify("日本語"), UNTITLED_SLUG);
    }

    #[test]
    fn test_accents_folded() {
        assert_eq!(slugify("Atlético Madrid"), "atletico-madrid");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Ｆｕｌｌ ｗｉｄｔｈ"), "full-width");
    }

    #[test]
    fn test_idempotent() {
        for title in ["Hello, World! 2025", "Atlético Madrid", "a--b  c"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }
}

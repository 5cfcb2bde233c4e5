//! Resolution of raw inline items into [`InlineContent`].
//!
//! Inline resolution never fails: anything that is not a recognisable text
//! run or link becomes an unstyled run holding a best-effort rendering of the
//! item.

use crate::model::{InlineContent, Link, Styles, TextRun};
use serde_json::{Map, Value};

/// Resolve an inline-content field.
///
/// Returns `None` only when the field has the wrong shape altogether (an
/// object, number or boolean where a list was expected). A plain string is
/// accepted as one unstyled run.
pub fn parse_inline_content(value: &Value) -> Option<Vec<InlineContent>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::String(s) if s.is_empty() => Some(Vec::new()),
        Value::String(s) => Some(vec![InlineContent::text(s.as_str())]),
        Value::Array(items) => Some(items.iter().map(resolve_inline_item).collect()),
        _ => None,
    }
}

/// Resolve one inline item against the `text`/`link` union.
pub fn resolve_inline_item(item: &Value) -> InlineContent {
    let Some(object) = item.as_object() else {
        return InlineContent::text(render_best_effort(item));
    };

    match object.get("type").and_then(Value::as_str) {
        Some("text") => match object.get("text") {
            Some(Value::String(text)) => {
                InlineContent::Text(TextRun::styled(text.as_str(), parse_styles(object)))
            }
            _ => InlineContent::text(render_best_effort(item)),
        },
        Some("link") => match parse_link(object) {
            Some(link) => InlineContent::Link(link),
            None => InlineContent::text(render_best_effort(item)),
        },
        _ => InlineContent::text(render_best_effort(item)),
    }
}

/// Read the style flags of a text run.
///
/// Styles may be nested in a `styles` object or written as top-level
/// booleans on the run; a `styles` object takes precedence.
pub fn parse_styles(run: &Map<String, Value>) -> Styles {
    let source = match run.get("styles") {
        Some(Value::Object(styles)) => styles,
        _ => run,
    };

    let mut styles = Styles::default();
    for name in Styles::NAMES {
        if source.get(name) == Some(&Value::Bool(true)) {
            styles.set(name, true);
        }
    }
    styles
}

fn parse_link(object: &Map<String, Value>) -> Option<Link> {
    let href = object
        .get("href")
        .and_then(Value::as_str)
        .or_else(|| object.get("url").and_then(Value::as_str))?;

    let content = match object.get("content") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![TextRun::new(s.as_str())],
        Some(Value::Array(items)) => items.iter().map(resolve_link_run).collect(),
        Some(_) => return None,
    };

    Some(Link {
        href: href.to_string(),
        content,
    })
}

fn resolve_link_run(item: &Value) -> TextRun {
    match resolve_inline_item(item) {
        InlineContent::Text(run) => run,
        // Links do not nest; keep the inner link's text.
        InlineContent::Link(link) => TextRun::new(link.plain_text()),
    }
}

/// Render an arbitrary value as text.
pub fn render_best_effort(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(object) => match object.get("text") {
            Some(Value::String(s)) => s.clone(),
            Some(text @ (Value::Number(_) | Value::Bool(_))) => render_best_effort(text),
            _ => value.to_string(),
        },
        Value::Array(_) => value.to_string(),
    }
}

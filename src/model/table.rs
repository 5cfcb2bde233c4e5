//! Table types.

use super::{plain_text, InlineContent};
use serde_json::{Map, Value};

/// The content of a table block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableContent {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Other keys of the table content object (e.g. `columnWidths`)
    pub extra: Map<String, Value>,
}

impl TableContent {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCell {
    /// Inline content
    Inline(Vec<InlineContent>),

    /// A structured cell object kept as given (e.g. `{"type": "tableCell", ...}`)
    Structured(Value),
}

impl TableCell {
    /// Create a cell with plain text.
    pub fn text(text: impl Into<String>) -> Self {
        TableCell::Inline(vec![InlineContent::text(text)])
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        TableCell::Inline(Vec::new())
    }

    /// Get plain text content. Structured cells contribute the text of a
    /// nested `content` list when it holds runs, and nothing otherwise.
    pub fn plain_text(&self) -> String {
        match self {
            TableCell::Inline(content) => plain_text(content),
            TableCell::Structured(value) => value
                .get("content")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.get("text").and_then(Value::as_str))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}

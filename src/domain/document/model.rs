//! Document text tree

use serde::{Deserialize, Serialize};

/// A paragraph's text node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A table cell: its paragraphs, then any tables nested inside it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
}

impl Cell {
    /// A cell holding a single paragraph
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::new(text)],
            tables: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// The text structure of a rich document: top-level paragraphs and tables,
/// each in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,

    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Document {
    /// Text of the top-level paragraphs, one per line
    pub fn full_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The first `max_chars` characters of [`Document::full_text`]
    pub fn preview(&self, max_chars: usize) -> String {
        self.full_text().chars().take(max_chars).collect()
    }

    /// Visit every paragraph in walk order without mutating it
    pub fn for_each_paragraph(&self, f: &mut dyn FnMut(&Paragraph)) {
        for paragraph in &self.paragraphs {
            f(paragraph);
        }
        for table in &self.tables {
            visit_table(table, f);
        }
    }

    /// Total number of paragraphs reachable from the root
    pub fn paragraph_count(&self) -> usize {
        let mut count = 0;
        self.for_each_paragraph(&mut |_| count += 1);
        count
    }
}

fn visit_table(table: &Table, f: &mut dyn FnMut(&Paragraph)) {
    for cell in table.rows.iter().flat_map(|row| &row.cells) {
        for paragraph in &cell.paragraphs {
            f(paragraph);
        }
        for nested in &cell.tables {
            visit_table(nested, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_text_and_preview() {
        let document = Document {
            paragraphs: vec![Paragraph::new("첫 줄"), Paragraph::new("second line")],
            tables: vec![],
        };
        assert_eq!(document.full_text(), "첫 줄\nsecond line");
        assert_eq!(document.preview(3), "첫 줄");
        assert_eq!(document.preview(1000), document.full_text());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let document: Document = serde_json::from_value(json!({
            "paragraphs": [{"text": "Hello {{name}}"}],
            "tables": [{"rows": [{"cells": [{"paragraphs": [{"text": "{{x}}"}]}]}]}]
        }))
        .unwrap();

        assert_eq!(document.paragraphs.len(), 1);
        assert_eq!(document.tables[0].rows[0].cells[0], Cell::with_text("{{x}}"));

        let empty: Document = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, Document::default());
    }

    #[test]
    fn test_paragraph_count_includes_nested_tables() {
        let inner = Table {
            rows: vec![Row {
                cells: vec![Cell::with_text("c"), Cell::with_text("d")],
            }],
        };
        let document = Document {
            paragraphs: vec![Paragraph::new("a")],
            tables: vec![Table {
                rows: vec![Row {
                    cells: vec![Cell {
                        paragraphs: vec![Paragraph::new("b")],
                        tables: vec![inner],
                    }],
                }],
            }],
        };

        let mut seen = Vec::new();
        document.for_each_paragraph(&mut |p| seen.push(p.text.clone()));
        assert_eq!(seen, vec!["a", "b", "c", "d"]);
        assert_eq!(document.paragraph_count(), 4);
    }
}

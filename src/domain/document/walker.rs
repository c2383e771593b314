//! In-place traversal of the document text tree

use serde::Serialize;

use super::model::{Document, Paragraph, Table};
use crate::domain::dataset::Bindings;
use crate::domain::template::{normalize, substitute_counted, SubstitutionCounts};

/// Receives each paragraph of a document in walk order
pub trait ParagraphVisitor {
    fn visit_paragraph(&mut self, paragraph: &mut Paragraph);
}

impl Document {
    /// Walk every paragraph exactly once, mutably.
    ///
    /// Order: top-level paragraphs, then each table's rows and cells; inside
    /// a cell its paragraphs come first, followed by its nested tables.
    pub fn walk_mut<V: ParagraphVisitor + ?Sized>(&mut self, visitor: &mut V) {
        for paragraph in &mut self.paragraphs {
            visitor.visit_paragraph(paragraph);
        }
        for table in &mut self.tables {
            walk_table(table, visitor);
        }
    }
}

fn walk_table<V: ParagraphVisitor + ?Sized>(table: &mut Table, visitor: &mut V) {
    for cell in table.rows.iter_mut().flat_map(|row| &mut row.cells) {
        for paragraph in &mut cell.paragraphs {
            visitor.visit_paragraph(paragraph);
        }
        for nested in &mut cell.tables {
            walk_table(nested, visitor);
        }
    }
}

/// Totals from one substitution walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub paragraphs_visited: usize,
    pub paragraphs_changed: usize,
    pub placeholders_replaced: usize,
    pub placeholders_unresolved: usize,
}

struct SubstitutionVisitor<'a> {
    bindings: &'a Bindings,
    counts: SubstitutionCounts,
    visited: usize,
    changed: usize,
}

impl ParagraphVisitor for SubstitutionVisitor<'_> {
    fn visit_paragraph(&mut self, paragraph: &mut Paragraph) {
        self.visited += 1;

        let (text, counts) = substitute_counted(&normalize(&paragraph.text), self.bindings);
        self.counts += counts;

        if text != paragraph.text {
            self.changed += 1;
            paragraph.text = text;
        }
    }
}

/// Normalize and substitute every paragraph of `document` in place
pub fn walk_and_substitute(document: &mut Document, bindings: &Bindings) -> WalkStats {
    let mut visitor = SubstitutionVisitor {
        bindings,
        counts: SubstitutionCounts::default(),
        visited: 0,
        changed: 0,
    };
    document.walk_mut(&mut visitor);

    WalkStats {
        paragraphs_visited: visitor.visited,
        paragraphs_changed: visitor.changed,
        placeholders_replaced: visitor.counts.replaced,
        placeholders_unresolved: visitor.counts.unresolved,
    }
}

//! Document text tree and its traversal.
//!
//! A document is modelled only as far as its text goes: top-level
//! paragraphs plus tables of rows of cells, where each cell owns paragraphs
//! and possibly further tables. Every node exclusively owns its children.

mod model;
mod walker;

pub use model::{Cell, Document, Paragraph, Row, Table};
pub use walker::{walk_and_substitute, ParagraphVisitor, WalkStats};

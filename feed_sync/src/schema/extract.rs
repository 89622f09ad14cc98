//! Row extraction
//!
//! Flattens the item nodes of one section into ordered key/value rows.

use crate::document::{Document, Node};
use crate::error::{Error, Result};
use crate::schema::types::Row;
use crate::utils::naming::{attribute_column, ChildColumnNamer};

/// Extracts rows for a section of a feed document
#[derive(Debug, Clone)]
pub struct RowExtractor {
    root_section: String,
}

impl RowExtractor {
    pub fn new(root_section: &str) -> Self {
        Self {
            root_section: root_section.to_string(),
        }
    }

    /// Rows of the section named `table_name`, in document order.
    ///
    /// A missing root section or section yields no rows. Items that produce
    /// no entries are dropped.
    pub fn extract_rows(&self, document: &Document, table_name: &str) -> Result<Vec<Row>> {
        if table_name.trim().is_empty() {
            return Err(Error::blank("table name"));
        }

        let section = document
            .root_section(&self.root_section)
            .and_then(|root| root.child(table_name));
        let Some(section) = section else {
            return Ok(Vec::new());
        };

        let rows: Vec<Row> = section
            .children()
            .iter()
            .map(extract_row)
            .filter(|row| !row.is_empty())
            .collect();

        tracing::debug!(table = table_name, rows = rows.len(), "Extracted rows");
        Ok(rows)
    }
}

fn extract_row(item: &Node) -> Row {
    let mut row = Row::new();

    for (key, value) in item.attributes() {
        row.insert(attribute_column(key), Some(value.clone()));
    }

    if item.has_element_children() {
        let mut namer = ChildColumnNamer::default();
        for child in item.children() {
            let column = namer.column_for(child.name());

            // child attributes never overwrite what is already there
            for (key, value) in child.attributes() {
                row.entry(attribute_column(key))
                    .or_insert_with(|| Some(value.clone()));
            }

            row.insert(column, Some(child.trimmed_text()));
        }
    } else {
        let text = item.trimmed_text();
        if !text.is_empty() {
            row.insert(attribute_column(item.name()), Some(text));
        }
    }

    row
}

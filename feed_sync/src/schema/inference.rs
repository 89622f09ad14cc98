//! Schema inference
//!
//! Walks the sections under the document's root section and derives one table
//! per section with its columns in first-occurrence order.

use indexmap::IndexMap;

use crate::document::{Document, Node};
use crate::schema::detect::detect;
use crate::schema::types::{Column, InferredSchema, PrimitiveType, Table};
use crate::utils::naming::{attribute_column, ChildColumnNamer};

/// Infers table definitions from a feed document
#[derive(Debug, Clone)]
pub struct SchemaInference {
    root_section: String,
    detect_child_types: bool,
}

impl SchemaInference {
    /// Create an inference engine reading sections under `root_section` (e.g. `shop`)
    pub fn new(root_section: &str) -> Self {
        Self {
            root_section: root_section.to_string(),
            detect_child_types: false,
        }
    }

    /// Type child-element columns from their text instead of forcing `varchar`.
    /// Off by default so existing tables keep validating.
    pub fn detect_child_types(mut self, enabled: bool) -> Self {
        self.detect_child_types = enabled;
        self
    }

    /// Infer all tables of the document. Every call starts from scratch.
    pub fn infer(&self, document: &Document) -> InferredSchema {
        let Some(root) = document.root_section(&self.root_section) else {
            tracing::warn!(root_section = %self.root_section, "Root section not found, nothing to infer");
            return InferredSchema::default();
        };

        let mut tables = Vec::new();
        for section in root.children() {
            if section.name().trim().is_empty() || !section.has_element_children() {
                continue;
            }

            let table = self.infer_table(section);
            tracing::debug!(
                table = %table.name,
                columns = table.columns.len(),
                "Inferred table"
            );
            tables.push(table);
        }

        InferredSchema::new(tables)
    }

    fn infer_table(&self, section: &Node) -> Table {
        // first occurrence of a name fixes its position and type
        let mut columns: IndexMap<String, PrimitiveType> = IndexMap::new();

        for item in section.children() {
            for (key, value) in item.attributes() {
                columns.entry(attribute_column(key)).or_insert_with(|| detect(value));
            }

            if item.has_element_children() {
                let mut namer = ChildColumnNamer::default();
                for child in item.children() {
                    columns
                        .entry(namer.column_for(child.name()))
                        .or_insert_with(|| self.child_type(child));
                }
            } else {
                let text = item.trimmed_text();
                if !text.is_empty() {
                    columns
                        .entry(attribute_column(item.name()))
                        .or_insert_with(|| detect(&text));
                }
            }
        }

        let columns = columns
            .into_iter()
            .map(|(name, data_type)| Column::new(&name, data_type))
            .collect();
        Table::new(section.name(), columns)
    }

    fn child_type(&self, child: &Node) -> PrimitiveType {
        if self.detect_child_types {
            detect(&child.trimmed_text())
        } else {
            PrimitiveType::Text
        }
    }
}

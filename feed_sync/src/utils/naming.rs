//! Naming utilities
//!
//! Column naming rules shared by inference and row extraction, and
//! identifier quoting for generated SQL.

/// Tag of repeated item children that are numbered instead of merged
pub const PARAM_TAG: &str = "param";

/// Column name for an attribute key or a text-only item tag
pub fn attribute_column(name: &str) -> String {
    name.to_lowercase()
}

/// Names the columns of one item's child elements.
///
/// `param` children are numbered `param_0`, `param_1`, ... in document order.
/// The counter belongs to a single item; create a new namer per item.
#[derive(Debug, Default)]
pub struct ChildColumnNamer {
    next_param: usize,
}

impl ChildColumnNamer {
    pub fn column_for(&mut self, tag: &str) -> String {
        if tag == PARAM_TAG {
            let name = format!("{}_{}", PARAM_TAG, self.next_param);
            self.next_param += 1;
            name
        } else {
            tag.to_lowercase()
        }
    }
}

/// Quote an identifier for PostgreSQL, doubling embedded quotes
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Quote a schema-qualified identifier: `"schema"."name"`
pub fn quote_qualified(schema: &str, identifier: &str) -> String {
    format!("{}.{}", quote_identifier(schema), quote_identifier(identifier))
}

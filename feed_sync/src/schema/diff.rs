//! Column set difference calculator
//!
//! Compares the column names inferred from a document against the live ones.

use std::collections::BTreeSet;

use crate::schema::types::AUDIT_COLUMN;

/// Name-only differences between an inferred and a live table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSetDiff {
    /// Inferred columns, audit column excluded
    pub expected: BTreeSet<String>,
    /// Live columns, audit column excluded
    pub actual: BTreeSet<String>,
    /// In the document but not in the database
    pub missing: BTreeSet<String>,
    /// In the database but not in the document
    pub unexpected: BTreeSet<String>,
}

impl ColumnSetDiff {
    /// Compare two name sets. The audit column is ignored on both sides.
    pub fn generate(inferred: &BTreeSet<String>, live: &BTreeSet<String>) -> Self {
        let strip = |names: &BTreeSet<String>| -> BTreeSet<String> {
            names
                .iter()
                .filter(|name| name.as_str() != AUDIT_COLUMN)
                .cloned()
                .collect()
        };
        let expected = strip(inferred);
        let actual = strip(live);

        let missing = expected.difference(&actual).cloned().collect();
        let unexpected = actual.difference(&expected).cloned().collect();

        Self {
            expected,
            actual,
            missing,
            unexpected,
        }
    }

    /// Check if the sets match (no changes needed)
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

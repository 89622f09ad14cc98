//! Schema validator
//!
//! Fails loudly when a live table no longer matches the document.

use crate::db::store::Store;
use crate::error::{Error, Result};
use crate::schema::diff::ColumnSetDiff;
use crate::schema::types::Table;

/// Compare the inferred `table` with the live table `table_name`.
///
/// Only column names are compared, as sets. The audit column is ignored.
pub async fn assert_matches<S>(store: &S, table_name: &str, table: &Table) -> Result<()>
where
    S: Store + ?Sized,
{
    if table_name.trim().is_empty() {
        return Err(Error::blank("table name"));
    }

    let live = store.live_column_names(table_name).await?;
    let diff = ColumnSetDiff::generate(&table.column_names(), &live);

    if diff.is_empty() {
        return Ok(());
    }

    tracing::warn!(
        table = table_name,
        missing = ?diff.missing,
        unexpected = ?diff.unexpected,
        "Live schema differs from document"
    );
    Err(Error::SchemaMismatch {
        table: table_name.to_string(),
        expected: diff.expected,
        actual: diff.actual,
        missing: diff.missing,
        unexpected: diff.unexpected,
    })
}

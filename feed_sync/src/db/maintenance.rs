//! Table maintenance
//!
//! Bulk drop helpers layered on top of a [`Store`].

use crate::db::store::Store;
use crate::error::{Error, Result};
use crate::schema::generator::drop_table_sql;

/// Drop every base table of `schema`.
///
/// Tables are dropped in reverse listing order, which lets later-created
/// dependents go first in the common case. Returns the dropped names.
pub async fn drop_all_tables<S>(store: &S, schema: &str, cascade: bool) -> Result<Vec<String>>
where
    S: Store + ?Sized,
{
    if schema.trim().is_empty() {
        return Err(Error::blank("schema"));
    }

    let mut tables = store.list_tables(schema).await?;
    tables.reverse();

    for table in &tables {
        drop_table(store, schema, table, cascade).await?;
    }

    tracing::info!(schema, dropped = tables.len(), cascade, "Dropped all tables");
    Ok(tables)
}

/// Drop only the named tables of `schema`
pub async fn drop_tables<S>(store: &S, schema: &str, tables: &[String], cascade: bool) -> Result<()>
where
    S: Store + ?Sized,
{
    if schema.trim().is_empty() {
        return Err(Error::blank("schema"));
    }
    if tables.iter().any(|t| t.trim().is_empty()) {
        return Err(Error::blank("table name"));
    }

    for table in tables {
        drop_table(store, schema, table, cascade).await?;
    }
    Ok(())
}

async fn drop_table<S>(store: &S, schema: &str, table: &str, cascade: bool) -> Result<()>
where
    S: Store + ?Sized,
{
    tracing::info!(schema, table, cascade, "Dropping table");
    store.execute(&drop_table_sql(schema, table, cascade)).await
}

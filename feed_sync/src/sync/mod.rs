//! Synchronizer
//!
//! Mirrors document rows into the database, one table at a time and one row
//! at a time. The write boundary is the table: the first failing row stops
//! that table, rows already written stay written, and later tables still run.

pub mod statement;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::db::store::Store;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::schema::coerce::coerce;
use crate::schema::extract::RowExtractor;
use crate::schema::generator::create_table_sql;
use crate::schema::types::{
    InferredSchema, Param, Row, SqlValue, Table, WriteStatement, AUDIT_COLUMN, ID_COLUMN,
};
use crate::schema::validator;

pub use statement::{build_update, build_upsert};

/// How rows are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Create missing tables, validate existing ones, insert or update every row
    #[default]
    Upsert,
    /// Tables must already exist; rows are only updated
    Update,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Upsert => f.write_str("upsert"),
            SyncMode::Update => f.write_str("update"),
        }
    }
}

/// Counters for one synchronized table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSyncStats {
    pub table: String,
    /// The table was created during this run
    pub created: bool,
    pub rows_written: usize,
    pub rows_skipped: usize,
    pub rows_affected: u64,
}

/// The outcome of one table within a run
#[derive(Debug)]
pub struct TableOutcome {
    pub table: String,
    pub result: Result<TableSyncStats>,
}

/// Per-table outcomes of a synchronization run, in table order
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<TableOutcome>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Tables that failed, with their first fatal error
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.table.as_str(), e)))
    }
}

/// Writes document rows into a [`Store`]
pub struct Synchronizer<'a, S: Store + ?Sized> {
    store: &'a S,
    extractor: RowExtractor,
    mode: SyncMode,
}

impl<'a, S: Store + ?Sized> Synchronizer<'a, S> {
    /// Create a synchronizer reading sections under `root_section`
    pub fn new(store: &'a S, root_section: &str, mode: SyncMode) -> Self {
        Self {
            store,
            extractor: RowExtractor::new(root_section),
            mode,
        }
    }

    /// Synchronize every inferred table. A failing table does not stop the others.
    pub async fn sync(&self, document: &Document, schema: &InferredSchema) -> SyncReport {
        let mut report = SyncReport::default();

        for table in &schema.tables {
            let result = self.sync_table(document, schema, &table.name).await;
            match &result {
                Ok(stats) => tracing::info!(
                    table = %table.name,
                    created = stats.created,
                    rows = stats.rows_written,
                    skipped = stats.rows_skipped,
                    "Table synchronized"
                ),
                Err(e) => tracing::error!(table = %table.name, error = %e, "Table synchronization failed"),
            }
            report.outcomes.push(TableOutcome {
                table: table.name.clone(),
                result,
            });
        }

        report
    }

    /// Synchronize one table, stopping at its first failure
    pub async fn sync_table(
        &self,
        document: &Document,
        schema: &InferredSchema,
        table_name: &str,
    ) -> Result<TableSyncStats> {
        let table = schema.table(table_name)?;
        let mut stats = TableSyncStats {
            table: table.name.clone(),
            ..Default::default()
        };

        // rows need an id, table creation does not
        match self.mode {
            SyncMode::Upsert => stats.created = self.ensure_table(table).await?,
            SyncMode::Update => validator::assert_matches(self.store, &table.name, table).await?,
        }

        for row in self.extractor.extract_rows(document, &table.name)? {
            match self.build_statement(table, &row)? {
                Some(statement) => {
                    stats.rows_affected += self.store.execute_write(&statement).await?;
                    stats.rows_written += 1;
                }
                None => stats.rows_skipped += 1,
            }
        }

        Ok(stats)
    }

    /// Create the table when absent, otherwise check that it still matches.
    /// Returns whether the table was created.
    pub async fn ensure_table(&self, table: &Table) -> Result<bool> {
        let schema = self.store.schema();
        if self.store.table_exists(&table.name).await? {
            validator::assert_matches(self.store, &table.name, table).await?;
            return Ok(false);
        }

        tracing::info!(schema, table = %table.name, "Creating table");
        self.store.execute(&create_table_sql(schema, table)).await?;
        Ok(true)
    }

    fn build_statement(&self, table: &Table, row: &Row) -> Result<Option<WriteStatement>> {
        let (id, columns) = typed_row(table, row)?;
        let schema = self.store.schema();
        Ok(match self.mode {
            SyncMode::Upsert => Some(build_upsert(schema, &table.name, id, columns)),
            SyncMode::Update => build_update(schema, &table.name, id, columns),
        })
    }
}

/// Coerce a row against its table: the id parameter plus every other row
/// entry that the table defines, in table column order. The audit column is
/// owned by the database and never written.
fn typed_row(table: &Table, row: &Row) -> Result<(Param, Vec<(String, Param)>)> {
    let raw_id = row
        .get(ID_COLUMN)
        .and_then(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "row without required '{}' in table '{}'",
                ID_COLUMN, table.name
            ))
        })?;

    let id_column = table
        .column(ID_COLUMN)
        .ok_or_else(|| Error::InvalidArgument(format!("table '{}' has no '{}' column", table.name, ID_COLUMN)))?;
    let id = coerce(&table.name, ID_COLUMN, id_column.data_type, &SqlValue::from(raw_id))?;

    let mut columns = Vec::new();
    for column in table
        .columns
        .iter()
        .filter(|c| c.name != ID_COLUMN && c.name != AUDIT_COLUMN)
    {
        let Some(raw) = row.get(&column.name) else {
            continue;
        };
        let value = coerce(&table.name, &column.name, column.data_type, &SqlValue::from(raw.clone()))?;
        columns.push((column.name.clone(), Param::new(column.data_type, value)));
    }

    Ok((Param::new(id_column.data_type, id), columns))
}

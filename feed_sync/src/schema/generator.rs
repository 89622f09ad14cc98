//! DDL generator
//!
//! Renders PostgreSQL statements for inferred tables.

use crate::schema::types::{Table, AUDIT_COLUMN, ID_COLUMN};
use crate::utils::naming::{quote_identifier, quote_qualified};

/// Definition of the audit column appended to every table
const AUDIT_COLUMN_DEFINITION: &str = "timestamptz NOT NULL DEFAULT now()";

/// Generate a `CREATE TABLE IF NOT EXISTS` statement for an inferred table in `schema`.
///
/// The `id` column comes first as primary key, the rest follow in inference
/// order as nullable columns, and the audit column closes the list.
pub fn create_table_sql(schema: &str, table: &Table) -> String {
    let mut column_defs = Vec::with_capacity(table.columns.len() + 1);

    if let Some(id) = table.column(ID_COLUMN) {
        column_defs.push(format!(
            "    {} {} PRIMARY KEY",
            quote_identifier(&id.name),
            id.data_type.sql_type()
        ));
    }

    for column in &table.columns {
        if column.name == ID_COLUMN || column.name == AUDIT_COLUMN {
            continue;
        }
        column_defs.push(format!(
            "    {} {}",
            quote_identifier(&column.name),
            column.data_type.sql_type()
        ));
    }

    column_defs.push(format!(
        "    {} {}",
        quote_identifier(AUDIT_COLUMN),
        AUDIT_COLUMN_DEFINITION
    ));

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
        quote_qualified(schema, &table.name),
        column_defs.join(",\n")
    )
}

/// Generate SQL to drop a table in a schema
pub fn drop_table_sql(schema: &str, table_name: &str, cascade: bool) -> String {
    format!(
        "DROP TABLE IF EXISTS {}{}",
        quote_qualified(schema, table_name),
        if cascade { " CASCADE" } else { "" }
    )
}

//! Live schema analyzer
//!
//! Introspects PostgreSQL through `information_schema`.

use std::collections::BTreeSet;

use sqlx::{FromRow, PgPool};

use crate::error::{Error, Result};

#[derive(FromRow)]
struct TableRow {
    table_name: String,
}

#[derive(FromRow)]
struct ColumnRow {
    column_name: String,
}

/// PostgreSQL schema analyzer bound to one schema
pub struct PostgresAnalyzer<'a> {
    pool: &'a PgPool,
    schema: &'a str,
}

impl<'a> PostgresAnalyzer<'a> {
    pub fn new(pool: &'a PgPool, schema: &'a str) -> Self {
        Self { pool, schema }
    }

    /// Check whether a base table exists
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let sql = r#"
            SELECT table_name::text AS table_name
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_name = $2 AND table_type = 'BASE TABLE'
        "#;

        let row = sqlx::query_as::<_, TableRow>(sql)
            .bind(self.schema)
            .bind(table_name)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Column names of a table; a table without columns counts as absent
    pub async fn column_names(&self, table_name: &str) -> Result<BTreeSet<String>> {
        let sql = r#"
            SELECT column_name::text AS column_name
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position
        "#;

        let columns: BTreeSet<String> = sqlx::query_as::<_, ColumnRow>(sql)
            .bind(self.schema)
            .bind(table_name)
            .fetch_all(self.pool)
            .await?
            .into_iter()
            .map(|row| row.column_name)
            .collect();

        if columns.is_empty() {
            return Err(Error::LiveTableNotFound(table_name.to_string()));
        }
        Ok(columns)
    }

    /// Base tables of the schema, ordered by name
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let sql = r#"
            SELECT table_name::text AS table_name
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .bind(self.schema)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }
}

//! Relational store abstraction
//!
//! Everything the synchronizer needs from the database. Implemented for
//! PostgreSQL by [`DatabaseConnection`](crate::db::DatabaseConnection).

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::schema::types::WriteStatement;

#[async_trait]
pub trait Store: Send + Sync {
    /// Schema that unqualified table names in the other calls refer to
    fn schema(&self) -> &str;

    /// Whether a base table with this name exists in [`Store::schema`]
    async fn table_exists(&self, table: &str) -> Result<bool>;

    /// Live column names of a table. Fails with `LiveTableNotFound` when the
    /// table is absent or has no columns.
    async fn live_column_names(&self, table: &str) -> Result<BTreeSet<String>>;

    /// Base tables of a schema in catalog order
    async fn list_tables(&self, schema: &str) -> Result<Vec<String>>;

    /// Execute a statement without parameters
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Execute a parameterized write and return the affected row count
    async fn execute_write(&self, statement: &WriteStatement) -> Result<u64>;
}

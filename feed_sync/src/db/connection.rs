//! Database connection handling
//!
//! This module provides the PostgreSQL connection pool and its [`Store`] implementation.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::db::executor;
use crate::db::store::Store;
use crate::error::{Error, Result};
use crate::schema::analyzer::PostgresAnalyzer;
use crate::schema::types::WriteStatement;

/// A PostgreSQL pool bound to one schema
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
    schema: String,
}

impl DatabaseConnection {
    /// Create a new database connection from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::ConfigError("database.url is not set".to_string()));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.timeout_seconds))
            .connect(&config.url)
            .await?;

        tracing::info!(schema = %config.schema, "Connected to database");
        Ok(Self::from_pool(pool, &config.schema))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            schema: schema.to_string(),
        }
    }

    fn analyzer(&self) -> PostgresAnalyzer<'_> {
        PostgresAnalyzer::new(&self.pool, &self.schema)
    }
}

#[async_trait]
impl Store for DatabaseConnection {
    fn schema(&self) -> &str {
        &self.schema
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        self.analyzer().table_exists(table).await
    }

    async fn live_column_names(&self, table: &str) -> Result<BTreeSet<String>> {
        self.analyzer().column_names(table).await
    }

    async fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        PostgresAnalyzer::new(&self.pool, schema).list_tables().await
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        tracing::debug!(sql, "Executing statement");
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn execute_write(&self, statement: &WriteStatement) -> Result<u64> {
        tracing::debug!(sql = %statement.sql, params = statement.params.len(), "Executing write");
        executor::execute_write(&self.pool, statement).await
    }
}

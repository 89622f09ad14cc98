//! Shared test helpers: an in-memory store and document builders

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use feed_sync::error::{Error, Result};
use feed_sync::schema::types::WriteStatement;
use feed_sync::{parse_document, Document, Store};

/// Records every statement and answers catalog queries from a fixed table map
pub struct MemoryStore {
    schema: String,
    tables: Mutex<BTreeMap<String, BTreeSet<String>>>,
    executed: Mutex<Vec<String>>,
    writes: Mutex<Vec<WriteStatement>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::in_schema("public")
    }

    pub fn in_schema(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            tables: Mutex::default(),
            executed: Mutex::default(),
            writes: Mutex::default(),
        }
    }

    pub fn with_table(self, name: &str, columns: &[&str]) -> Self {
        self.tables.lock().unwrap().insert(
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<WriteStatement> {
        self.writes.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<String> {
        self.executed()
            .into_iter()
            .filter(|sql| sql.starts_with("CREATE TABLE"))
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn schema(&self) -> &str {
        &self.schema
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.tables.lock().unwrap().contains_key(table))
    }

    async fn live_column_names(&self, table: &str) -> Result<BTreeSet<String>> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .filter(|columns| !columns.is_empty())
            .cloned()
            .ok_or_else(|| Error::LiveTableNotFound(table.to_string()))
    }

    async fn list_tables(&self, _schema: &str) -> Result<Vec<String>> {
        Ok(self.tables.lock().unwrap().keys().cloned().collect())
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(())
    }

    async fn execute_write(&self, statement: &WriteStatement) -> Result<u64> {
        self.writes.lock().unwrap().push(statement.clone());
        Ok(1)
    }
}

/// Wrap sections into a `yml_catalog/shop` document
pub fn catalog(sections: &str) -> Document {
    let xml = format!("<yml_catalog date=\"2024-01-31\"><shop>{}</shop></yml_catalog>", sections);
    parse_document(xml.as_bytes(), "test.xml").unwrap()
}

//! feed_sync: mirrors product-catalog XML feeds into PostgreSQL
//!
//! feed_sync reads a catalog document, infers one table per section, creates
//! or validates those tables and writes every item as a row, either upserting
//! or updating existing rows only.

pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod schema;
pub mod sync;
pub mod utils;

// Re-export main types for easier access
pub use config::Config;
pub use db::connection::DatabaseConnection;
pub use db::store::Store;
pub use document::{parse_document, Document, Node};
pub use error::{Error, Result};
pub use schema::extract::RowExtractor;
pub use schema::inference::SchemaInference;
pub use schema::types::{Column, InferredSchema, PrimitiveType, Row, SqlValue, Table};
pub use sync::{SyncMode, SyncReport, Synchronizer, TableSyncStats};

/// Initialize feed_sync with the specified configuration file
pub async fn init(config_path: &str) -> Result<FeedSyncClient> {
    let config = config::load_from_file(config_path)?;
    FeedSyncClient::new(config).await
}

/// The main client tying a configuration to a live database
pub struct FeedSyncClient {
    config: Config,
    connection: DatabaseConnection,
}

impl FeedSyncClient {
    /// Create a new client from configuration, connecting to the database
    pub async fn new(config: Config) -> Result<Self> {
        let connection = DatabaseConnection::connect(&config.database).await?;
        Ok(Self { config, connection })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Load the configured document from its file or URL
    pub async fn load_document(&self) -> Result<Document> {
        document::source::load(&self.config.source).await
    }

    /// Infer the table definitions of a document
    pub fn infer_schema(&self, document: &Document) -> InferredSchema {
        inference_for(&self.config).infer(document)
    }

    /// Synchronize a document in the given mode
    pub async fn sync(&self, document: &Document, mode: SyncMode) -> SyncReport {
        let schema = self.infer_schema(document);
        if schema.is_empty() {
            tracing::warn!(root = %self.config.sync.root_section, "Document defines no tables");
        }

        Synchronizer::new(&self.connection, &self.config.sync.root_section, mode)
            .sync(document, &schema)
            .await
    }

    /// Create every inferred table that does not exist yet, validating the rest.
    /// Returns the names of the tables that were created.
    pub async fn ensure_tables(&self, document: &Document) -> Result<Vec<String>> {
        let schema = self.infer_schema(document);
        let synchronizer = Synchronizer::new(
            &self.connection,
            &self.config.sync.root_section,
            SyncMode::Upsert,
        );

        let mut created = Vec::new();
        for table in &schema.tables {
            if synchronizer.ensure_table(table).await? {
                created.push(table.name.clone());
            }
        }
        Ok(created)
    }

    /// Drop every table of `schema`, or of the connection's schema when `None`
    pub async fn drop_all_tables(&self, schema: Option<&str>, cascade: bool) -> Result<Vec<String>> {
        let schema = schema.unwrap_or(self.connection.schema());
        db::maintenance::drop_all_tables(&self.connection, schema, cascade).await
    }

    /// Drop the named tables of `schema`, or of the connection's schema when `None`
    pub async fn drop_tables(&self, schema: Option<&str>, tables: &[String], cascade: bool) -> Result<()> {
        let schema = schema.unwrap_or(self.connection.schema());
        db::maintenance::drop_tables(&self.connection, schema, tables, cascade).await
    }
}

/// Build the inference engine a configuration asks for
pub fn inference_for(config: &Config) -> SchemaInference {
    SchemaInference::new(&config.sync.root_section).detect_child_types(config.sync.detect_child_types)
}

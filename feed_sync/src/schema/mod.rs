//! Schema module for feed_sync
//!
//! This module handles type detection, schema inference, row extraction,
//! value coercion, DDL generation and live schema validation.

pub mod analyzer;
pub mod coerce;
pub mod detect;
pub mod diff;
pub mod extract;
pub mod generator;
pub mod inference;
pub mod types;
pub mod validator;

// Re-export key types
pub use coerce::coerce;
pub use detect::detect;
pub use diff::ColumnSetDiff;
pub use extract::RowExtractor;
pub use generator::create_table_sql;
pub use inference::SchemaInference;
pub use types::{
    Column, InferredSchema, Param, PrimitiveType, Row, SqlValue, Table, WriteStatement,
    AUDIT_COLUMN, ID_COLUMN,
};

//! Type definitions for inferred schema objects and row values

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::generator::create_table_sql;

/// Name of the `id` column every synchronized table is keyed by
pub const ID_COLUMN: &str = "id";

/// Audit column appended to every generated table and ignored by validation
pub const AUDIT_COLUMN: &str = "created_at";

/// Coarse data type inferred from raw document text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimitiveType {
    Integer,
    LongInteger,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    Text,
}

impl PrimitiveType {
    /// The DDL type name this tag is rendered as
    pub fn sql_type(self) -> &'static str {
        match self {
            PrimitiveType::Integer => "integer",
            PrimitiveType::LongInteger => "bigint",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Date => "date",
            PrimitiveType::Timestamp => "timestamp",
            PrimitiveType::Text => "varchar",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_type())
    }
}

/// Represents an inferred column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: PrimitiveType,
}

impl Column {
    /// Create a new column with the given name and type
    pub fn new(name: &str, data_type: PrimitiveType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Represents a table inferred from one document section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a new table with the given name and columns
    pub fn new(name: &str, columns: Vec<Column>) -> Self {
        Self {
            name: name.to_string(),
            columns,
        }
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names as a set, for name-only comparisons
    pub fn column_names(&self) -> BTreeSet<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Result of one inference pass over a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredSchema {
    pub tables: Vec<Table>,
}

impl InferredSchema {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Find an inferred table by name
    pub fn table(&self, name: &str) -> Result<&Table> {
        if name.trim().is_empty() {
            return Err(Error::blank("table name"));
        }
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Table names in section order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Creation statements for every table in `schema`, in section order
    pub fn create_statements(&self, schema: &str) -> Vec<String> {
        self.tables
            .iter()
            .map(|table| create_table_sql(schema, table))
            .collect()
    }
}

/// One flattened item node: column name to raw value, in document order
pub type Row = IndexMap<String, Option<String>>;

/// A value ready to be bound to a statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i32),
    BigInt(i64),
    Decimal(BigDecimal),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl SqlValue {
    /// Name of the native representation, used in diagnostics
    pub fn representation(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Integer(_) => "integer",
            SqlValue::BigInt(_) => "bigint",
            SqlValue::Decimal(_) => "decimal",
            SqlValue::Boolean(_) => "boolean",
            SqlValue::Date(_) => "date",
            SqlValue::Timestamp(_) => "timestamp",
            SqlValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("null"),
            SqlValue::Integer(v) => write!(f, "{}", v),
            SqlValue::BigInt(v) => write!(f, "{}", v),
            SqlValue::Decimal(v) => write!(f, "{}", v),
            SqlValue::Boolean(v) => write!(f, "{}", v),
            SqlValue::Date(v) => write!(f, "{}", v),
            SqlValue::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            SqlValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<Option<String>> for SqlValue {
    fn from(raw: Option<String>) -> Self {
        raw.map_or(SqlValue::Null, SqlValue::Text)
    }
}

impl From<&str> for SqlValue {
    fn from(raw: &str) -> Self {
        SqlValue::Text(raw.to_string())
    }
}

/// A positional statement parameter: the value plus the column type used for typed NULLs
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub data_type: PrimitiveType,
    pub value: SqlValue,
}

impl Param {
    pub fn new(data_type: PrimitiveType, value: SqlValue) -> Self {
        Self { data_type, value }
    }
}

/// A parameterized write: SQL with `$n` placeholders and its parameters in order
#[derive(Debug, Clone, PartialEq)]
pub struct WriteStatement {
    pub sql: String,
    pub params: Vec<Param>,
}

//! SQL executor
//!
//! Binds typed parameters and runs parameterized writes.

use chrono::{NaiveDate, NaiveDateTime};
use bigdecimal::BigDecimal;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};

use crate::error::Result;
use crate::schema::types::{Param, PrimitiveType, SqlValue, WriteStatement};

/// Run a parameterized write and return the number of affected rows
pub async fn execute_write(pool: &PgPool, statement: &WriteStatement) -> Result<u64> {
    let query = statement
        .params
        .iter()
        .fold(sqlx::query(&statement.sql), bind_param);

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

/// Bind one parameter. NULLs are bound with the column's type so PostgreSQL
/// does not reject them as `text`.
fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &Param,
) -> Query<'q, Postgres, PgArguments> {
    match &param.value {
        SqlValue::Null => match param.data_type {
            PrimitiveType::Integer => query.bind(None::<i32>),
            PrimitiveType::LongInteger => query.bind(None::<i64>),
            PrimitiveType::Decimal => query.bind(None::<BigDecimal>),
            PrimitiveType::Boolean => query.bind(None::<bool>),
            PrimitiveType::Date => query.bind(None::<NaiveDate>),
            PrimitiveType::Timestamp => query.bind(None::<NaiveDateTime>),
            PrimitiveType::Text => query.bind(None::<String>),
        },
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::BigInt(v) => query.bind(*v),
        SqlValue::Decimal(v) => query.bind(v.clone()),
        SqlValue::Boolean(v) => query.bind(*v),
        SqlValue::Date(v) => query.bind(*v),
        SqlValue::Timestamp(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
    }
}

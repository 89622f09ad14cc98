//! Write statement builders
//!
//! Parameters are positional: `$1` is always the id, the remaining columns
//! follow in the order given. Target tables are always schema-qualified.

use crate::schema::types::{Param, WriteStatement, ID_COLUMN};
use crate::utils::naming::{quote_identifier, quote_qualified};

/// Build `INSERT ... ON CONFLICT ("id") DO UPDATE SET ...`.
///
/// Every inserted non-id column is overwritten with the new value on conflict.
/// With no non-id columns the conflict action is `DO NOTHING`.
pub fn build_upsert(schema: &str, table: &str, id: Param, columns: Vec<(String, Param)>) -> WriteStatement {
    let id_column = quote_identifier(ID_COLUMN);

    let mut insert_columns = vec![id_column.clone()];
    insert_columns.extend(columns.iter().map(|(name, _)| quote_identifier(name)));

    let placeholders: Vec<String> = (1..=insert_columns.len()).map(|i| format!("${}", i)).collect();

    let conflict_action = if columns.is_empty() {
        "DO NOTHING".to_string()
    } else {
        let assignments: Vec<String> = insert_columns[1..]
            .iter()
            .map(|c| format!("{} = EXCLUDED.{}", c, c))
            .collect();
        format!("DO UPDATE SET {}", assignments.join(", "))
    };

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) {}",
        quote_qualified(schema, table),
        insert_columns.join(", "),
        placeholders.join(", "),
        id_column,
        conflict_action
    );

    WriteStatement {
        sql,
        params: params(id, columns),
    }
}

/// Build `UPDATE ... SET ... WHERE "id" = $1`, or `None` when there is nothing to set
pub fn build_update(
    schema: &str,
    table: &str,
    id: Param,
    columns: Vec<(String, Param)>,
) -> Option<WriteStatement> {
    if columns.is_empty() {
        return None;
    }

    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, (name, _))| format!("{} = ${}", quote_identifier(name), i + 2))
        .collect();

    let sql = format!(
        "UPDATE {} SET {} WHERE {} = $1",
        quote_qualified(schema, table),
        assignments.join(", "),
        quote_identifier(ID_COLUMN)
    );

    Some(WriteStatement {
        sql,
        params: params(id, columns),
    })
}

fn params(id: Param, columns: Vec<(String, Param)>) -> Vec<Param> {
    std::iter::once(id)
        .chain(columns.into_iter().map(|(_, param)| param))
        .collect()
}

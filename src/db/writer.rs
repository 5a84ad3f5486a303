//! Writes in-memory tables into SQLite

use rusqlite::{params_from_iter, Connection};
use serde::Serialize;

use super::quote_ident;
use crate::error::LoadError;
use crate::model::Table;

/// What to do when the target table already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IfExists {
    /// Drop the table and recreate it from the inferred column types
    Replace,
    /// Insert into the existing table, creating it only if it is missing
    Append,
}

/// Write every row of `table` into `name`, returning the number of rows written.
///
/// Rows are inserted by column name inside one transaction, so either every
/// row lands or none do.
pub fn write_table(
    conn: &mut Connection,
    name: &str,
    table: &Table,
    if_exists: IfExists,
) -> Result<usize, LoadError> {
    let tx = conn.transaction()?;
    let exists = table_exists(&tx, name)?;

    match if_exists {
        IfExists::Replace => {
            if exists {
                tracing::debug!(table = name, "dropping existing table");
                tx.execute_batch(&format!("DROP TABLE {}", quote_ident(name)))?;
            }
            tx.execute_batch(&inferred_create_sql(name, table))?;
        }
        IfExists::Append => {
            if !exists {
                tx.execute_batch(&inferred_create_sql(name, table))?;
            }
        }
    }

    {
        let mut stmt = tx.prepare(&insert_sql(name, table))?;
        for row in &table.rows {
            stmt.execute(params_from_iter(row.cells.iter()))?;
        }
    }

    tx.commit()?;
    Ok(table.row_count())
}

/// Check whether a table exists
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, LoadError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Count the rows of a table
pub fn count_rows(conn: &Connection, name: &str) -> Result<usize, LoadError> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(name)),
        [],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// `CREATE TABLE` from the column types inferred while parsing
fn inferred_create_sql(name: &str, table: &Table) -> String {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), c.inferred_type.sql_type()))
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(name), columns.join(", "))
}

fn insert_sql(name: &str, table: &Table) -> String {
    let columns: Vec<String> = table.column_names().map(quote_ident).collect();
    let placeholders: Vec<String> = (1..=table.column_count()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(name),
        columns.join(", "),
        placeholders.join(", ")
    )
}

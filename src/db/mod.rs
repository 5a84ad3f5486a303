//! SQLite targets: the keyed database with declared constraints and the
//! schema-less database whose tables follow the source data

pub mod declared;
mod writer;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub use declared::{TableSchema, CHILD, FAMILY};
pub use writer::{count_rows, table_exists, write_table, IfExists};

/// Open a database, creating the file if absent, with foreign key
/// enforcement switched on
pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open SQLite database: {}", path.display()))?;
    conn.pragma_update(None, "foreign_keys", true)
        .context("Failed to enable foreign keys")?;
    Ok(conn)
}

/// Live handles on both output databases
pub struct Databases {
    pub keyed: Connection,
    pub schemaless: Connection,
}

impl Databases {
    /// Recreate the keyed database from scratch with the declared schema and
    /// open the schema-less database as it is
    pub fn initialize(keys_path: &Path, no_keys_path: &Path) -> Result<Self> {
        remove_if_exists(keys_path)?;

        let mut keyed = connect(keys_path)?;
        declared::create_schema(&mut keyed)
            .with_context(|| format!("Failed to create schema in {}", keys_path.display()))?;

        let schemaless = connect(no_keys_path)?;

        Ok(Self { keyed, schemaless })
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed existing database");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove existing database: {}", path.display()))
        }
    }
}

/// Quote an SQL identifier
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

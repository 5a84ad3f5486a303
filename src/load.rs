//! The load pipeline: read each source table and write it to both databases

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::db::{declared, write_table, Databases, IfExists};
use crate::model::{Column, Table};
use crate::parser::CsvParser;

/// Summary of one loaded table
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub name: String,
    pub source: PathBuf,
    pub columns: Vec<Column>,
    /// Rows read from the source file
    pub rows: usize,
    /// Rows written to the schema-less database
    pub no_keys_rows: usize,
    /// Rows written to the keyed database
    pub keys_rows: usize,
}

/// Summary of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub keys_db: PathBuf,
    pub no_keys_db: PathBuf,
    pub tables: Vec<TableReport>,
}

impl LoadReport {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Read a source file and add the synthesized key column its declared
/// schema asks for
pub fn prepare_table(name: &str, source: &Path) -> Result<Table> {
    let mut table = CsvParser.parse(source)?;

    if let Some(schema) = declared::lookup(name) {
        if schema.synthesized_key {
            if let Some(key) = schema.primary_key() {
                table
                    .insert_index_column(key.name)
                    .with_context(|| format!("Failed to add `{}` to table `{}`", key.name, name))?;
            }
        }
    }

    Ok(table)
}

/// Run the full pipeline described by `config`.
///
/// The schema-less write for a table happens before the keyed write and is
/// not undone if the keyed write fails.
pub fn run(config: &Config) -> Result<LoadReport> {
    let keys_db = config.keys_db_path();
    let no_keys_db = config.no_keys_db_path();
    let mut databases = Databases::initialize(&keys_db, &no_keys_db)?;

    let mut tables = Vec::new();
    for (name, source) in config.table_sources() {
        let table = prepare_table(name, &source)?;

        let no_keys_rows = write_table(&mut databases.schemaless, name, &table, IfExists::Replace)
            .with_context(|| {
                format!("Failed to write table `{}` to {}", name, no_keys_db.display())
            })?;
        info!(table = name, rows = no_keys_rows, db = %no_keys_db.display(), "replaced table");

        let keys_rows = write_table(&mut databases.keyed, name, &table, IfExists::Append)
            .with_context(|| format!("Failed to write table `{}` to {}", name, keys_db.display()))?;
        info!(table = name, rows = keys_rows, db = %keys_db.display(), "appended table");

        tables.push(TableReport {
            name: name.to_string(),
            source,
            rows: table.row_count(),
            columns: table.columns,
            no_keys_rows,
            keys_rows,
        });
    }

    Ok(LoadReport {
        keys_db,
        no_keys_db,
        tables,
    })
}

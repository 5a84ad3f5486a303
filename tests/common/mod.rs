//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use rusqlite::Connection;

pub const FAMILIES_CSV: &str = "\
family,father,mother
1,78.5,67.0
2,75.5,66.5
3,75.0,64.0
136A,68.5,65.0
";

pub const CHILDREN_CSV: &str = "\
child_number,gender,height,family
1,male,73.2,1
2,female,69.2,1
1,male,73.5,2
1,female,65.5,3
1,male,72.0,136A
";

/// Write both source files into `dir`
pub fn write_sources(dir: &Path, families: &str, children: &str) {
    fs::write(dir.join("galton_families.csv"), families).unwrap();
    fs::write(dir.join("galton_children.csv"), children).unwrap();
}

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}

/// Every row of a table rendered as text, in rowid order
pub fn dump(conn: &Connection, table: &str) -> Vec<Vec<String>> {
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {} ORDER BY rowid", table))
        .unwrap();
    let width = stmt.column_count();
    stmt.query_map([], |row| {
        (0..width)
            .map(|i| {
                let value: rusqlite::types::Value = row.get(i)?;
                Ok(format!("{:?}", value))
            })
            .collect::<rusqlite::Result<Vec<_>>>()
    })
    .unwrap()
    .collect::<rusqlite::Result<Vec<_>>>()
    .unwrap()
}

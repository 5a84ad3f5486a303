//! Declared schema for the keyed database
//!
//! `families` holds one row per family keyed by its short code; `children`
//! holds one row per child keyed by a synthesized row number and points back
//! to its family through a foreign key.

use rusqlite::Connection;

/// A foreign key target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

/// A declared column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub primary_key: bool,
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    const fn plain(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            primary_key: false,
            references: None,
        }
    }

    const fn key(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            primary_key: true,
            references: None,
        }
    }

    const fn foreign(name: &'static str, sql_type: &'static str, target: ForeignKey) -> Self {
        Self {
            name,
            sql_type,
            primary_key: false,
            references: Some(target),
        }
    }
}

/// A declared table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    /// The primary key is the zero-based source row number rather than a
    /// column of the source file
    pub synthesized_key: bool,
}

pub static FAMILY: TableSchema = TableSchema {
    name: "families",
    columns: &[
        ColumnDef::key("family", "VARCHAR(10)"),
        ColumnDef::plain("father", "FLOAT"),
        ColumnDef::plain("mother", "FLOAT"),
    ],
    synthesized_key: false,
};

pub static CHILD: TableSchema = TableSchema {
    name: "children",
    columns: &[
        ColumnDef::key("child_id", "INTEGER"),
        ColumnDef::plain("child_number", "INTEGER"),
        ColumnDef::plain("gender", "VARCHAR(10)"),
        ColumnDef::plain("height", "FLOAT"),
        ColumnDef::foreign(
            "family",
            "VARCHAR(10)",
            ForeignKey {
                table: "families",
                column: "family",
            },
        ),
    ],
    synthesized_key: true,
};

/// Declared tables, referenced tables first
pub static DECLARED: &[&TableSchema] = &[&FAMILY, &CHILD];

/// Find the declared schema for a table name
pub fn lookup(name: &str) -> Option<&'static TableSchema> {
    DECLARED.iter().copied().find(|schema| schema.name == name)
}

impl TableSchema {
    /// The primary key column, if one is declared
    pub fn primary_key(&self) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Render the `CREATE TABLE` statement for this table
    pub fn create_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                if c.primary_key {
                    format!("    {} {} NOT NULL", c.name, c.sql_type)
                } else {
                    format!("    {} {}", c.name, c.sql_type)
                }
            })
            .collect();

        let keys: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name)
            .collect();
        if !keys.is_empty() {
            lines.push(format!("    PRIMARY KEY ({})", keys.join(", ")));
        }

        for column in self.columns {
            if let Some(target) = column.references {
                lines.push(format!(
                    "    FOREIGN KEY ({}) REFERENCES {} ({})",
                    column.name, target.table, target.column
                ));
            }
        }

        format!("CREATE TABLE {} (\n{}\n)", self.name, lines.join(",\n"))
    }
}

/// Creates every declared table in a single transaction
pub fn create_schema(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    let tx = conn.transaction()?;
    for schema in DECLARED {
        tracing::debug!(table = schema.name, "creating declared table");
        tx.execute_batch(&schema.create_sql())?;
    }
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_ddl() {
        assert_eq!(
            FAMILY.create_sql(),
            "CREATE TABLE families (\n\
             \x20   family VARCHAR(10) NOT NULL,\n\
             \x20   father FLOAT,\n\
             \x20   mother FLOAT,\n\
             \x20   PRIMARY KEY (family)\n\
             )"
        );
    }

    #[test]
    fn test_child_ddl_declares_foreign_key() {
        let sql = CHILD.create_sql();
        assert!(sql.contains("child_id INTEGER NOT NULL"));
        assert!(sql.contains("PRIMARY KEY (child_id)"));
        assert!(sql.contains("FOREIGN KEY (family) REFERENCES families (family)"));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("children"), Some(&CHILD));
        assert_eq!(lookup("children").and_then(|s| s.primary_key()).map(|c| c.name), Some("child_id"));
        assert!(lookup("parents").is_none());
        assert!(CHILD.synthesized_key);
        assert!(!FAMILY.synthesized_key);
    }

    #[test]
    fn test_schema_creation() {
        let mut conn = Connection::open_in_memory().unwrap();
        create_schema(&mut conn).unwrap();

        for table in ["families", "children"] {
            let count: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table {} should exist", table);
        }

        let fk_target: String = conn
            .query_row(
                "SELECT \"table\" FROM pragma_foreign_key_list('children')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(fk_target, "families");
    }
}

//! Table, Row, and Cell data structures

use std::borrow::Cow;

use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

use super::schema::{CellType, Column};
use crate::error::LoadError;

/// A cell value with type information
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl CellValue {
    /// The narrowest column type that holds this value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Null => ToSqlOutput::Owned(Value::Null),
            CellValue::Bool(b) => ToSqlOutput::Owned(Value::Integer(i64::from(*b))),
            CellValue::Int(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            CellValue::Float(f) => ToSqlOutput::Owned(Value::Real(*f)),
            CellValue::String(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// A row in the table
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/row number in source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A table containing columns and rows
#[derive(Debug, Clone)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table, in source order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    /// Insert a leading integer column holding each row's zero-based position.
    ///
    /// Fails if a column with the same name already exists.
    pub fn insert_index_column(&mut self, name: &str) -> Result<(), LoadError> {
        if self.column_index(name).is_some() {
            return Err(LoadError::DuplicateColumn(name.to_string()));
        }

        for column in &mut self.columns {
            column.index += 1;
        }
        self.columns
            .insert(0, Column::with_type(name, 0, CellType::Int));

        for (position, row) in self.rows.iter_mut().enumerate() {
            row.cells.insert(0, CellValue::Int(position as i64));
        }

        Ok(())
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec![
            Column::with_type("child_number", 0, CellType::Int),
            Column::with_type("gender", 1, CellType::String),
        ]);
        table.add_row(vec![CellValue::Int(1), CellValue::from("M")], 2);
        table.add_row(vec![CellValue::Int(2), CellValue::from("F")], 3);
        table
    }

    #[test]
    fn test_insert_index_column() {
        let mut table = sample();
        table.insert_index_column("child_id").unwrap();

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["child_id", "child_number", "gender"]
        );
        assert_eq!(table.column("gender").unwrap().index, 2);
        assert_eq!(table.column("child_id").unwrap().inferred_type, CellType::Int);
        assert_eq!(table.rows[0].get(0), Some(&CellValue::Int(0)));
        assert_eq!(table.rows[1].get(0), Some(&CellValue::Int(1)));
        assert_eq!(table.rows[1].get(2), Some(&CellValue::from("F")));
    }

    #[test]
    fn test_insert_index_column_rejects_existing_name() {
        let mut table = sample();
        let err = table.insert_index_column("gender").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn(ref name) if name == "gender"));
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_float_nan_equality() {
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert_ne!(CellValue::Int(1), CellValue::Float(1.0));
    }
}

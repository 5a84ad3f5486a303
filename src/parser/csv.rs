//! CSV file parser

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::LoadError;
use crate::model::{CellType, CellValue, Column, Table};

/// Parser for comma-separated files with a header row
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    /// Read a CSV file into a typed table
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        self.parse_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse CSV file: {}", path.display()))
    }

    /// Read CSV data from any reader into a typed table
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();
        let width = headers.len();
        if width == 0 {
            return Err(LoadError::NoColumns.into());
        }

        let mut seen = HashSet::with_capacity(width);
        for name in headers.iter().map(str::trim) {
            if !seen.insert(name) {
                return Err(LoadError::DuplicateColumn(name.to_string()).into());
            }
        }

        // Raw fields are kept until every column's type is known
        let mut raw_rows: Vec<(usize, Vec<String>)> = Vec::new();
        for (record_num, result) in csv_reader.records().enumerate() {
            let record =
                result.with_context(|| format!("Failed to read CSV record {}", record_num + 1))?;
            // Records may span several lines when a quoted field holds a newline
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(record_num + 2);

            if record.len() > width {
                return Err(LoadError::RowTooLong {
                    line,
                    found: record.len(),
                    expected: width,
                }
                .into());
            }

            let mut fields: Vec<String> = record.iter().map(|s| s.trim().to_string()).collect();
            fields.resize(width, String::new());
            raw_rows.push((line, fields));
        }

        let mut columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.trim(), i))
            .collect();

        for (col_idx, column) in columns.iter_mut().enumerate() {
            column.inferred_type = raw_rows
                .iter()
                .map(|(_, fields)| parse_cell_value(&fields[col_idx]).cell_type())
                .fold(CellType::Null, CellType::widen);
        }

        let types: Vec<CellType> = columns.iter().map(|c| c.inferred_type).collect();
        let mut table = Table::new(columns);
        for (line, fields) in raw_rows {
            let cells = fields
                .into_iter()
                .zip(&types)
                .map(|(raw, &cell_type)| coerce_cell(raw, cell_type))
                .collect();
            table.add_row(cells, line);
        }

        Ok(table)
    }
}

/// Parse a string value into a CellValue with type inference
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if is_null_marker(trimmed) {
        return CellValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    CellValue::String(Cow::Owned(trimmed.to_string()))
}

fn is_null_marker(s: &str) -> bool {
    matches!(s, "" | "NA" | "N/A" | "NaN" | "nan" | "null" | "NULL")
}

/// Convert a raw field into the representation its column settled on
fn coerce_cell(raw: String, column_type: CellType) -> CellValue {
    match (parse_cell_value(&raw), column_type) {
        (CellValue::Null, _) => CellValue::Null,
        (_, CellType::Mixed) => CellValue::String(Cow::Owned(raw)),
        (CellValue::Int(i), CellType::Float) => CellValue::Float(i as f64),
        (value, _) => value,
    }
}

//! Typed failures raised by galtondb itself

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no columns to parse: the source has no header row")]
    NoColumns,

    #[error("line {line} has {found} fields but the header declares {expected}")]
    RowTooLong {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("column `{0}` already exists")]
    DuplicateColumn(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

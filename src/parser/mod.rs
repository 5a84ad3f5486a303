//! Parser layer for reading source tables

mod csv;

pub use self::csv::CsvParser;

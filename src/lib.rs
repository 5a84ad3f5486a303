//! galtondb - Galton family/child heights as SQLite
//!
//! Reads the family-level and child-level CSV files and writes them into two
//! SQLite databases: one whose tables carry declared primary and foreign keys,
//! and one whose tables are created from the shape of the source data.

pub mod config;
pub mod db;
pub mod error;
pub mod load;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::LoadError;
pub use load::{run, LoadReport};
pub use model::Table;

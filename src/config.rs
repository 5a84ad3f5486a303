//! Configuration handling for galtondb

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::db::{CHILD, FAMILY};

pub const DEFAULT_FAMILIES_CSV: &str = "galton_families.csv";
pub const DEFAULT_CHILDREN_CSV: &str = "galton_children.csv";
pub const DEFAULT_KEYS_DB: &str = "galton_keys.db";
pub const DEFAULT_NO_KEYS_DB: &str = "galton_no_keys.db";

/// Output format for the load report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Configuration for a load run
///
/// Relative file names are resolved against `data_dir` (inputs) and
/// `out_dir` (databases); absolute paths are used as given.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the source CSV files
    pub data_dir: PathBuf,
    /// Directory receiving the databases, defaults to `data_dir`
    pub out_dir: Option<PathBuf>,
    /// Family-level source file
    pub families_csv: PathBuf,
    /// Child-level source file
    pub children_csv: PathBuf,
    /// Database with declared primary/foreign keys
    pub keys_db: PathBuf,
    /// Database with tables inferred from the source data
    pub no_keys_db: PathBuf,
    /// Output format
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            out_dir: None,
            families_csv: PathBuf::from(DEFAULT_FAMILIES_CSV),
            children_csv: PathBuf::from(DEFAULT_CHILDREN_CSV),
            keys_db: PathBuf::from(DEFAULT_KEYS_DB),
            no_keys_db: PathBuf::from(DEFAULT_NO_KEYS_DB),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Create a Config reading from and writing to `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Set the family-level source file
    pub fn with_families_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.families_csv = path.into();
        self
    }

    /// Set the child-level source file
    pub fn with_children_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.children_csv = path.into();
        self
    }

    /// Set the keyed database file
    pub fn with_keys_db(mut self, path: impl Into<PathBuf>) -> Self {
        self.keys_db = path.into();
        self
    }

    /// Set the schema-less database file
    pub fn with_no_keys_db(mut self, path: impl Into<PathBuf>) -> Self {
        self.no_keys_db = path.into();
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    fn out_dir(&self) -> &Path {
        self.out_dir.as_deref().unwrap_or(&self.data_dir)
    }

    /// Resolved path of the keyed database
    pub fn keys_db_path(&self) -> PathBuf {
        self.out_dir().join(&self.keys_db)
    }

    /// Resolved path of the schema-less database
    pub fn no_keys_db_path(&self) -> PathBuf {
        self.out_dir().join(&self.no_keys_db)
    }

    /// Table name to source file, in load order.
    ///
    /// Families come first so the children's foreign key has rows to point at.
    pub fn table_sources(&self) -> IndexMap<&'static str, PathBuf> {
        let mut sources = IndexMap::new();
        sources.insert(FAMILY.name, self.data_dir.join(&self.families_csv));
        sources.insert(CHILD.name, self.data_dir.join(&self.children_csv));
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_working_directory() {
        let config = Config::default();
        assert_eq!(config.keys_db_path(), Path::new(".").join("galton_keys.db"));
        assert_eq!(
            config.no_keys_db_path(),
            Path::new(".").join("galton_no_keys.db")
        );

        let sources: Vec<_> = config.table_sources().into_iter().collect();
        assert_eq!(
            sources,
            vec![
                ("families", Path::new(".").join("galton_families.csv")),
                ("children", Path::new(".").join("galton_children.csv")),
            ]
        );
    }

    #[test]
    fn test_out_dir_only_moves_databases() {
        let config = Config::new("/data").with_out_dir("/out");
        assert_eq!(config.keys_db_path(), PathBuf::from("/out/galton_keys.db"));
        assert_eq!(
            config.table_sources()["families"],
            PathBuf::from("/data/galton_families.csv")
        );
    }

    #[test]
    fn test_absolute_file_overrides_directory() {
        let config = Config::new("/data").with_children_csv("/elsewhere/kids.csv");
        assert_eq!(
            config.table_sources()["children"],
            PathBuf::from("/elsewhere/kids.csv")
        );
    }
}

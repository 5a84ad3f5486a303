//! JSON output format

use std::io::Write;

use anyhow::Result;

use crate::load::LoadReport;

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, report: &LoadReport, writer: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, report)?;
        } else {
            serde_json::to_writer(&mut *writer, report)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::TableReport;
    use crate::model::{CellType, Column};
    use std::path::PathBuf;

    #[test]
    fn test_compact_report() {
        let report = LoadReport {
            keys_db: PathBuf::from("k.db"),
            no_keys_db: PathBuf::from("n.db"),
            tables: vec![TableReport {
                name: "children".into(),
                source: PathBuf::from("c.csv"),
                columns: vec![Column::with_type("child_id", 0, CellType::Int)],
                rows: 1,
                no_keys_rows: 1,
                keys_rows: 1,
            }],
        };

        let mut out = Vec::new();
        JsonOutput::compact().render(&report, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["keys_db"], "k.db");
        assert_eq!(value["tables"][0]["name"], "children");
        assert_eq!(value["tables"][0]["columns"][0]["type"], "int");
        assert_eq!(value["tables"][0]["keys_rows"], 1);
    }
}

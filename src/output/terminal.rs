//! Plain terminal output

use std::io::Write;

use anyhow::Result;
use tabled::settings::Style;
use tabled::{Table as Grid, Tabled};

use crate::load::{LoadReport, TableReport};

use super::OutputFormatter;

/// Terminal output as an aligned grid
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn write_header(&self, report: &LoadReport, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer, " galtondb")?;
        writeln!(writer, "   keyed:       {}", report.keys_db.display())?;
        writeln!(writer, "   schema-less: {}", report.no_keys_db.display())?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Tabled)]
struct GridLine {
    table: String,
    source: String,
    columns: String,
    rows: usize,
    #[tabled(rename = "no keys")]
    no_keys: usize,
    keys: usize,
}

impl From<&TableReport> for GridLine {
    fn from(t: &TableReport) -> Self {
        let columns = t
            .columns
            .iter()
            .map(|c| format!("{}:{}", c.name, c.inferred_type))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            table: t.name.clone(),
            source: t.source.display().to_string(),
            columns,
            rows: t.rows,
            no_keys: t.no_keys_rows,
            keys: t.keys_rows,
        }
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, report: &LoadReport, writer: &mut dyn Write) -> Result<()> {
        self.write_header(report, writer)?;

        if report.tables.is_empty() {
            writeln!(writer, "No tables loaded.")?;
            return Ok(());
        }

        let mut grid = Grid::new(report.tables.iter().map(GridLine::from));
        grid.with(Style::modern());
        writeln!(writer, "{}", grid)?;
        Ok(())
    }
}

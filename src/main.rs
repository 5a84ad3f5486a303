//! galtondb - Galton family/child heights as SQLite

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};

use galtondb::config::{
    Config, OutputFormat, DEFAULT_CHILDREN_CSV, DEFAULT_FAMILIES_CSV, DEFAULT_KEYS_DB,
    DEFAULT_NO_KEYS_DB,
};
use galtondb::output::render_to_stdout;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Load the Galton height tables into keyed and schema-less SQLite databases
#[derive(Parser, Debug)]
#[command(name = "galtondb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the source CSV files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Directory receiving the databases (defaults to the data directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Family-level source file
    #[arg(long, default_value = DEFAULT_FAMILIES_CSV)]
    families: PathBuf,

    /// Child-level source file
    #[arg(long, default_value = DEFAULT_CHILDREN_CSV)]
    children: PathBuf,

    /// Database created with declared primary/foreign keys (recreated every run)
    #[arg(long, default_value = DEFAULT_KEYS_DB)]
    keys_db: PathBuf,

    /// Database whose tables follow the source data (tables replaced every run)
    #[arg(long, default_value = DEFAULT_NO_KEYS_DB)]
    no_keys_db: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    galtondb::logging::init(cli.verbose);

    let mut config = Config::new(cli.data_dir)
        .with_families_csv(cli.families)
        .with_children_csv(cli.children)
        .with_keys_db(cli.keys_db)
        .with_no_keys_db(cli.no_keys_db)
        .with_output_format(cli.format.into());
    if let Some(out_dir) = cli.out_dir {
        config = config.with_out_dir(out_dir);
    }

    let report = galtondb::run(&config)?;

    render_to_stdout(&report, config.output_format)
}

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    app::RunConfig,
    date_filter::DateRange,
    records::parse_date,
    report::OutputFormat,
};

/// Processes a CSV file of sales and generates reports
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Path to the sales CSV file
    #[arg(value_name = "CSV_FILE")]
    pub input: PathBuf,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Start date to filter sales (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub start: Option<NaiveDate>,

    /// End date to filter sales (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub end: Option<NaiveDate>,

    /// Raise the log level to DEBUG
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_cli_date(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|_| format!("invalid date format: '{}'. Use YYYY-MM-DD.", value))
}

impl Args {
    /// Turns the parsed arguments into a pipeline configuration
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            input: self.input.clone(),
            range: DateRange::new(self.start, self.end),
            format: self.format,
        }
    }
}

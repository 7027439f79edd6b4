use std::path::PathBuf;

use anyhow::Context;

use crate::{
    date_filter::{filter_sales_by_date, DateRange},
    diagnostics::DiagnosticSink,
    metrics::calculate_sales_metrics,
    report::OutputFormat,
    sales_reader::SalesReader,
};

/// Everything a single run needs to know
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub range: DateRange,
    pub format: OutputFormat,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The rendered report
    Report(String),
    /// Nothing survived reading and filtering; it's up to the caller to decide if that's a failure
    NoSales,
}

/// The main application
pub struct SalesReportApp {}

impl SalesReportApp {
    /// Runs the read -> filter -> aggregate -> render pipeline for `config.input`.
    /// The reader is abstract so other sources can be plugged in
    pub fn run(
        config: &RunConfig,
        reader: impl SalesReader,
        sink: &mut dyn DiagnosticSink,
    ) -> anyhow::Result<RunOutcome> {
        sink.info(format!("Processing file: {}", config.input.display()));
        sink.debug(format!("Run configuration: {:?}", config));

        let sales = reader
            .read_sales(&config.input, sink)
            .with_context(|| format!("failed to read sales from '{}'", config.input.display()))?;

        let filtered = filter_sales_by_date(&sales, &config.range, sink);
        if filtered.is_empty() {
            sink.warn(
                "No sales found for the specified period (or the file was empty/invalid).".to_string(),
            );
            return Ok(RunOutcome::NoSales);
        }

        let metrics = calculate_sales_metrics(&filtered, sink);
        let report = config.format.render(&metrics, sink);

        sink.info("Report generated successfully.".to_string());
        Ok(RunOutcome::Report(report))
    }
}

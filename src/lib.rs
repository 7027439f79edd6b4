//! Reads a CSV file of sales, optionally narrows it to a date range,
//! aggregates totals per product and renders a text or JSON report.

pub mod app;
pub mod cli;
pub mod date_filter;
pub mod diagnostics;
pub mod error;
pub mod metrics;
pub mod records;
pub mod report;
pub mod sales_reader;

pub use app::{RunConfig, RunOutcome, SalesReportApp};
pub use error::{RowError, SalesError};
pub use metrics::{calculate_sales_metrics, SaleMetrics};
pub use records::Sale;

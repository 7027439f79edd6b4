use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    diagnostics::DiagnosticSink,
    error::{Result, SalesError},
    metrics::SaleMetrics,
};

/// Prefix put in front of every amount in the text report
pub const CURRENCY: &str = "$";

const BANNER: &str = "--- Sales Report ---";
const FOOTER: &str = "--------------------";

/// Supported report encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(SalesError::Config(format!(
                "invalid output format: '{}'. Use 'text' or 'json'.",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    pub fn render(self, metrics: &SaleMetrics, sink: &mut dyn DiagnosticSink) -> String {
        sink.info(format!("Generating report in format: {}", self));
        match self {
            OutputFormat::Text => format_text(metrics),
            OutputFormat::Json => format_json(metrics, sink),
        }
    }
}

/// Renders `metrics` with the format named by `format`.
/// An unknown format fails before anything is rendered.
pub fn render_report(
    metrics: &SaleMetrics,
    format: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<String> {
    let format = format.parse::<OutputFormat>().map_err(|err| {
        sink.error(err.to_string());
        err
    })?;

    Ok(format.render(metrics, sink))
}

fn money(amount: f64) -> String {
    format!("{} {:.2}", CURRENCY, amount)
}

/// Human readable report with a grid table of totals sorted by product
pub fn format_text(metrics: &SaleMetrics) -> String {
    let mut lines = vec![BANNER.to_string(), String::new()];

    lines.push("Total Sales by Product:".to_string());
    if metrics.totals_by_product().is_empty() {
        lines.push("No sales found.".to_string());
    } else {
        let rows: Vec<[String; 2]> = metrics
            .totals_by_product()
            .sorted_by_product()
            .into_iter()
            .map(|(product, total)| [product.to_string(), money(total)])
            .collect();
        lines.push(grid_table(["Product", "Total Value"], &rows));
    }

    lines.push(String::new());
    lines.push(format!("Grand Total Sales: {}", money(metrics.grand_total())));

    match metrics.best_selling_product() {
        Some(best) => lines.push(format!(
            "Best-Selling Product: {} ({})",
            best.product,
            money(best.total)
        )),
        None => lines.push("Best-Selling Product: N/A (no sales)".to_string()),
    }

    lines.push(String::new());
    lines.push(FOOTER.to_string());
    lines.join("\n")
}

/// Lays out a two column table:
/// +---------+-------------+
/// | Product | Total Value |
/// +=========+=============+
/// | A       | $ 1.00      |
/// +---------+-------------+
fn grid_table(headers: [&str; 2], rows: &[[String; 2]]) -> String {
    let mut widths = [headers[0].chars().count(), headers[1].chars().count()];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |fill: char| {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| std::iter::repeat(fill).take(w + 2).collect())
            .collect();
        format!("+{}+", segments.join("+"))
    };
    let line = |cells: [&str; 2]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - cell.chars().count())))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut table = vec![rule('-'), line(headers), rule('=')];
    for row in rows {
        table.push(line([row[0].as_str(), row[1].as_str()]));
        table.push(rule('-'));
    }
    table.join("\n")
}

#[derive(Serialize)]
struct JsonError<'a> {
    error: &'a str,
    details: String,
}

/// Pretty JSON with four space indentation
pub fn format_json(metrics: &SaleMetrics, sink: &mut dyn DiagnosticSink) -> String {
    match to_pretty_json(metrics) {
        Ok(json) => json,
        Err(err) => {
            sink.error(format!("Failed to serialize metrics to JSON: {}", err));
            let fallback = JsonError {
                error: "failed to generate JSON",
                details: err.to_string(),
            };
            to_pretty_json(&fallback).unwrap_or_else(|_| {
                r#"{"error": "failed to generate JSON"}"#.to_string()
            })
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Reads sales from a CSV file
/// Kept behind a trait so other sources can be plugged into the pipeline
use std::{io::ErrorKind, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use hashbrown::HashMap;

use crate::{
    diagnostics::DiagnosticSink,
    error::{Result, RowError, SalesError},
    records::{parse_row, ColumnIndex, Sale},
};

/// Column names every input file must carry, in the order they are reported
pub const EXPECTED_COLUMNS: [&str; 3] = ["product", "amount", "date"];

pub trait SalesReader {
    /// Reads every valid sale in `path`, in file order.
    /// Invalid rows are skipped and reported to `sink`; only a missing file
    /// or a broken header fails the whole read.
    fn read_sales(&self, path: &Path, sink: &mut dyn DiagnosticSink) -> Result<Vec<Sale>>;
}

/// Loads the whole file into memory and parses it in one pass
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvSalesReader;

impl CsvSalesReader {
    pub fn new() -> Self {
        Self
    }
}

impl SalesReader for CsvSalesReader {
    fn read_sales(&self, path: &Path, sink: &mut dyn DiagnosticSink) -> Result<Vec<Sale>> {
        sink.info(format!("Reading CSV file: {}", path.display()));

        let contents = std::fs::read(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                sink.error(format!("File not found: '{}'", path.display()));
                SalesError::NotFound(path.to_path_buf())
            } else {
                sink.error(format!("Unexpected error reading '{}': {}", path.display(), source));
                SalesError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let sales = read_from_csv(contents.as_slice(), sink)?;

        if sales.is_empty() {
            sink.warn(format!("No valid sales found in file {}", path.display()));
        } else {
            sink.info(format!(
                "Finished reading {}: {} sales read successfully",
                path.display(),
                sales.len()
            ));
        }

        Ok(sales)
    }
}

/// Parses sales out of any CSV source
pub fn read_from_csv<R: std::io::Read>(input: R, sink: &mut dyn DiagnosticSink) -> Result<Vec<Sale>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = match csv_reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            sink.error(format!("Could not read CSV header: {}", err));
            return Err(err.into());
        }
    };
    let columns = match locate_columns(&headers) {
        Ok(columns) => columns,
        Err(err) => {
            sink.error(err.to_string());
            return Err(err);
        }
    };

    let mut sales = Vec::new();
    for (index, record) in csv_reader.byte_records().enumerate() {
        // the header takes line 1
        let line_number = index + 2;

        let record = match record {
            Ok(bytes) => StringRecord::from_byte_record(bytes),
            Err(err) => {
                let err = RowError::Unreadable(err.to_string());
                report_skipped_row(sink, line_number, &err, "");
                continue;
            }
        };

        match record {
            Ok(record) => match parse_row(&record, &columns) {
                Ok(sale) => sales.push(sale),
                Err(err) => {
                    let raw = record.iter().collect::<Vec<_>>().join(",");
                    report_skipped_row(sink, line_number, &err, &raw);
                }
            },
            Err(utf8_err) => {
                let err = RowError::Unreadable(utf8_err.utf8_error().to_string());
                let bytes = utf8_err.into_byte_record();
                let raw = bytes
                    .iter()
                    .map(String::from_utf8_lossy)
                    .collect::<Vec<_>>()
                    .join(",");
                report_skipped_row(sink, line_number, &err, &raw);
            }
        }
    }

    Ok(sales)
}

fn report_skipped_row(sink: &mut dyn DiagnosticSink, line_number: usize, err: &RowError, raw: &str) {
    sink.warn(format!(
        "Line {}: invalid '{}' - {}. Row: [{}]. Skipping row.",
        line_number,
        err.field(),
        err,
        raw
    ));
}

/// Finds the expected columns by name, ignoring case, order and extra columns
fn locate_columns(headers: &StringRecord) -> Result<ColumnIndex> {
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SalesError::Format("empty or header-less CSV input".to_string()));
    }

    // first occurrence wins when a column name is repeated
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (position, name) in headers.iter().enumerate() {
        positions
            .entry(name.trim().to_ascii_lowercase())
            .or_insert(position);
    }

    let missing: Vec<&str> = EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !positions.contains_key(*column))
        .collect();

    if !missing.is_empty() {
        return Err(SalesError::Format(format!(
            "missing columns in CSV header: {}. Expected: {}",
            missing.join(", "),
            EXPECTED_COLUMNS.join(", ")
        )));
    }

    Ok(ColumnIndex {
        product: positions["product"],
        amount: positions["amount"],
        date: positions["date"],
    })
}

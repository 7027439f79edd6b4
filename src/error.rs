use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum SalesError {
    /// The input path does not resolve to a file
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural problem with the input (no header, missing columns)
    #[error("{0}")]
    Format(String),

    /// The caller asked for something we cannot do, e.g. an unknown output format
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SalesError>;

/// Why a single data row was rejected.
/// Never escapes the reader: the row is dropped and a diagnostic is emitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("essential column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("column 'product' cannot be empty")]
    EmptyProduct,

    #[error("could not convert '{0}' to a number")]
    InvalidAmount(String),

    #[error("column 'amount' cannot be negative ({0})")]
    NegativeAmount(f64),

    #[error("column 'date' cannot be empty")]
    EmptyDate,

    #[error("date '{0}' does not match format YYYY-MM-DD")]
    InvalidDate(String),

    #[error("unreadable row: {0}")]
    Unreadable(String),
}

impl RowError {
    /// Name of the field that caused the rejection
    pub fn field(&self) -> &'static str {
        match self {
            RowError::MissingColumn(column) => column,
            RowError::EmptyProduct => "product",
            RowError::InvalidAmount(_) | RowError::NegativeAmount(_) => "amount",
            RowError::EmptyDate | RowError::InvalidDate(_) => "date",
            RowError::Unreadable(_) => "row",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_names_the_offending_field() {
        assert_eq!(RowError::MissingColumn("date").field(), "date");
        assert_eq!(RowError::EmptyProduct.field(), "product");
        assert_eq!(RowError::InvalidAmount("abc".into()).field(), "amount");
        assert_eq!(RowError::NegativeAmount(-1.0).field(), "amount");
        assert_eq!(RowError::InvalidDate("2025/01/17".into()).field(), "date");
    }

    #[test]
    fn test_not_found_message_contains_path() {
        let err = SalesError::NotFound(PathBuf::from("missing.csv"));
        assert_eq!(err.to_string(), "file not found: missing.csv");
    }
}

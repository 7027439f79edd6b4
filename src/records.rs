use chrono::NaiveDate;
use csv::StringRecord;

use crate::error::RowError;

/// Strict date format for the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single validated sale.
/// Can only be built through [`Sale::new`] or [`parse_row`], so every value
/// in circulation has a non-empty product, a finite non-negative amount and a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    product: String,
    amount: f64,
    date: NaiveDate,
}

impl Sale {
    pub fn new(product: &str, amount: f64, date: NaiveDate) -> Result<Self, RowError> {
        let product = product.trim();
        if product.is_empty() {
            return Err(RowError::EmptyProduct);
        }
        if !amount.is_finite() {
            return Err(RowError::InvalidAmount(amount.to_string()));
        }
        if amount < 0.0 {
            return Err(RowError::NegativeAmount(amount));
        }

        Ok(Self {
            product: product.to_string(),
            amount,
            date,
        })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Positions of the expected columns inside a CSV record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnIndex {
    pub product: usize,
    pub amount: usize,
    pub date: usize,
}

/// Parses one CSV data row into a [`Sale`], or tells why it can't
pub fn parse_row(record: &StringRecord, columns: &ColumnIndex) -> Result<Sale, RowError> {
    let product = record
        .get(columns.product)
        .ok_or(RowError::MissingColumn("product"))?;
    let amount = record
        .get(columns.amount)
        .ok_or(RowError::MissingColumn("amount"))?;
    let date = record
        .get(columns.date)
        .ok_or(RowError::MissingColumn("date"))?;

    let product = product.trim();
    if product.is_empty() {
        return Err(RowError::EmptyProduct);
    }

    let amount = parse_amount(amount)?;
    let date = parse_date(date)?;

    Sale::new(product, amount, date)
}

/// Accepts both `.` and `,` as decimal separator
pub fn parse_amount(raw: &str) -> Result<f64, RowError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() => {
            if amount < 0.0 {
                Err(RowError::NegativeAmount(amount))
            } else {
                Ok(amount)
            }
        }
        _ => Err(RowError::InvalidAmount(raw.trim().to_string())),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, RowError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RowError::EmptyDate);
    }
    // chrono's %Y takes a signed year; the year must start with a digit
    if !raw.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(RowError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| RowError::InvalidDate(raw.to_string()))
}

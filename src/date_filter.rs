use std::borrow::Cow;

use chrono::NaiveDate;

use crate::{diagnostics::DiagnosticSink, records::Sale};

/// Inclusive date window, either side may be open
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    fn describe(&self) -> String {
        let mut parts = vec!["Filtering sales".to_string()];
        if let Some(start) = self.start {
            parts.push(format!("from {}", start));
        }
        if let Some(end) = self.end {
            parts.push(format!("until {}", end));
        }
        parts.join(" ") + "."
    }
}

/// Keeps the sales whose date falls inside `range`, preserving their order.
/// An unbounded range hands back the input slice untouched.
pub fn filter_sales_by_date<'a>(
    sales: &'a [Sale],
    range: &DateRange,
    sink: &mut dyn DiagnosticSink,
) -> Cow<'a, [Sale]> {
    if range.is_unbounded() {
        sink.debug("No date filter applied.".to_string());
        return Cow::Borrowed(sales);
    }

    sink.info(range.describe());
    if let (Some(start), Some(end)) = (range.start, range.end) {
        if start > end {
            sink.warn(format!(
                "Start date {} is after end date {}; no sale can match.",
                start, end
            ));
        }
    }

    let filtered: Vec<Sale> = sales
        .iter()
        .filter(|sale| range.contains(sale.date()))
        .cloned()
        .collect();

    sink.info(format!(
        "{} sales found in the specified period.",
        filtered.len()
    ));
    Cow::Owned(filtered)
}

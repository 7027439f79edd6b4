use hashbrown::HashMap;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{diagnostics::DiagnosticSink, records::Sale};

/// Summed amount per product, remembering the order products first appeared in.
/// That order decides ties for the best-selling product.
#[derive(Debug, Default, Clone)]
pub struct ProductTotals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl ProductTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `product`, creating the entry on first sight
    pub fn add(&mut self, product: &str, amount: f64) {
        match self.index.get(product) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(product.to_string(), self.entries.len());
                self.entries.push((product.to_string(), amount));
            }
        }
    }

    pub fn get(&self, product: &str) -> Option<f64> {
        self.index.get(product).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(product, total)| (product.as_str(), *total))
    }

    /// Entries sorted by product name
    pub fn sorted_by_product(&self) -> Vec<(&str, f64)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, total)| total).sum()
    }

    /// Highest total; on a tie the product seen first wins
    pub fn max(&self) -> Option<(&str, f64)> {
        self.iter().fold(None, |best, current| match best {
            Some((_, best_total)) if current.1 <= best_total => best,
            _ => Some(current),
        })
    }
}

impl PartialEq for ProductTotals {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Serialize for ProductTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (product, total) in &self.entries {
            map.serialize_entry(product, total)?;
        }
        map.end()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BestSeller {
    pub product: String,
    pub total: f64,
}

/// Aggregated view over a set of sales.
/// Only [`calculate_sales_metrics`] builds one; it is read-only afterwards.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct SaleMetrics {
    totals_by_product: ProductTotals,
    grand_total: f64,
    best_selling_product: Option<BestSeller>,
}

impl SaleMetrics {
    pub fn totals_by_product(&self) -> &ProductTotals {
        &self.totals_by_product
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    pub fn best_selling_product(&self) -> Option<&BestSeller> {
        self.best_selling_product.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.totals_by_product.is_empty()
    }
}

/// Reduces `sales` to per-product totals, the grand total and the best seller
pub fn calculate_sales_metrics(sales: &[Sale], sink: &mut dyn DiagnosticSink) -> SaleMetrics {
    sink.info(format!("Calculating metrics for {} sales.", sales.len()));

    if sales.is_empty() {
        sink.warn("Sales list is empty. Returning zeroed metrics.".to_string());
        return SaleMetrics::default();
    }

    let mut totals_by_product = ProductTotals::new();
    let mut grand_total = 0.0;
    for sale in sales {
        totals_by_product.add(sale.product(), sale.amount());
        grand_total += sale.amount();
    }

    let best_selling_product = totals_by_product.max().map(|(product, total)| BestSeller {
        product: product.to_string(),
        total,
    });

    match &best_selling_product {
        Some(best) => sink.info(format!(
            "Best-selling product: {} with a total of {:.2}",
            best.product, best.total
        )),
        None => sink.info("No product found to determine the best seller.".to_string()),
    }
    sink.info(format!("Metrics calculated. Grand total: {:.2}", grand_total));

    SaleMetrics {
        totals_by_product,
        grand_total,
        best_selling_product,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::diagnostics::CollectedDiagnostics;

    fn sale(product: &str, amount: f64, day: u32) -> Sale {
        Sale::new(product, amount, NaiveDate::from_ymd_opt(2025, 1, day).unwrap()).unwrap()
    }

    fn metrics(sales: &[Sale]) -> SaleMetrics {
        calculate_sales_metrics(sales, &mut CollectedDiagnostics::new())
    }

    #[test]
    fn test_basic_metrics() {
        let sales = vec![
            sale("Product A", 100.50, 15),
            sale("Product B", 75.20, 16),
            sale("Product A", 50.00, 17),
            sale("Product C", 200.00, 18),
            sale("Product B", 25.80, 19),
        ];
        let metrics = metrics(&sales);

        assert_eq!(metrics.totals_by_product().len(), 3);
        assert_eq!(metrics.totals_by_product().get("Product A"), Some(150.5));
        assert!((metrics.totals_by_product().get("Product B").unwrap() - 101.0).abs() < 1e-9);
        assert_eq!(metrics.totals_by_product().get("Product C"), Some(200.0));
        assert!((metrics.grand_total() - 451.5).abs() < 1e-9);
        assert_eq!(
            metrics.best_selling_product(),
            Some(&BestSeller {
                product: "Product C".to_string(),
                total: 200.0
            })
        );
    }

    #[test]
    fn test_empty_sales() {
        let mut sink = CollectedDiagnostics::new();
        let metrics = calculate_sales_metrics(&[], &mut sink);

        assert!(metrics.totals_by_product().is_empty());
        assert_eq!(metrics.grand_total(), 0.0);
        assert_eq!(metrics.best_selling_product(), None);
        assert!(sink.contains("Sales list is empty"));
    }

    #[test]
    fn test_single_sale() {
        let metrics = metrics(&[sale("Solo", 42.0, 1)]);

        assert_eq!(metrics.grand_total(), 42.0);
        assert_eq!(metrics.best_selling_product().unwrap().product, "Solo");
    }

    /* Ties: B and A both reach 30.0
        B appears first in the input, so B wins even though A sorts first
    */
    #[test]
    fn test_tie_goes_to_first_seen_product() {
        let sales = vec![
            sale("B", 10.0, 1),
            sale("A", 30.0, 2),
            sale("B", 20.0, 3),
        ];
        let best = metrics(&sales).best_selling_product().unwrap().clone();

        assert_eq!(best.product, "B");
        assert_eq!(best.total, 30.0);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let sales = vec![sale("Zeta", 1.0, 1), sale("Alpha", 2.0, 2), sale("Zeta", 3.0, 3)];
        let metrics = metrics(&sales);

        let order: Vec<&str> = metrics.totals_by_product().iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec!["Zeta", "Alpha"]);

        let sorted: Vec<&str> = metrics
            .totals_by_product()
            .sorted_by_product()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(sorted, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_grand_total_matches_sum_of_products() {
        let sales = vec![
            sale("A", 0.1, 1),
            sale("B", 0.2, 2),
            sale("A", 0.3, 3),
            sale("C", 1234.56, 4),
            sale("B", 0.0, 5),
        ];
        let metrics = metrics(&sales);

        assert!((metrics.grand_total() - metrics.totals_by_product().sum()).abs() < 1e-9);
        assert_eq!(metrics.grand_total(), 0.1 + 0.2 + 0.3 + 1234.56 + 0.0);
    }

    /* The accessors hand out read-only views:
        best seller is the maximum of the totals, grand total their sum
    */
    #[test]
    fn test_accessors_agree_with_each_other() {
        let metrics = metrics(&[sale("A", 4.0, 1), sale("B", 6.0, 2), sale("A", 1.0, 3)]);
        let best = metrics.best_selling_product().unwrap();

        assert_eq!(metrics.totals_by_product().max(), Some((best.product.as_str(), best.total)));
        assert_eq!(metrics.grand_total(), metrics.totals_by_product().sum());
        assert!(!metrics.is_empty());
    }

    #[test]
    fn test_json_keeps_insertion_order() {
        let mut totals = ProductTotals::new();
        totals.add("b", 1.0);
        totals.add("a", 2.0);
        totals.add("b", 0.5);

        assert_eq!(serde_json::to_string(&totals).unwrap(), r#"{"b":1.5,"a":2.0}"#);
    }
}

use std::collections::BTreeMap;

use super::model::{OrderDataset, OrderRecord, YearMonth};

// ---------------------------------------------------------------------------
// Monthly sales
// ---------------------------------------------------------------------------

/// Summed sales for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySales {
    pub month: YearMonth,
    pub sales: f64,
}

/// Sum `Sales` per calendar month of `Order_Date`.
///
/// The result is ordered by month ascending and sparse: months without rows
/// are absent rather than zero. Empty input gives an empty result.
pub fn monthly_sales<'a, I>(rows: I) -> Vec<MonthlySales>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut buckets: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for rec in rows {
        *buckets.entry(YearMonth::of(rec.order_date)).or_insert(0.0) += rec.sales;
    }
    buckets
        .into_iter()
        .map(|(month, sales)| MonthlySales { month, sales })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Profit as a percentage of sales; `0` when sales are zero.
pub fn profit_margin(total_sales: f64, total_profit: f64) -> f64 {
    if total_sales == 0.0 {
        0.0
    } else {
        total_profit / total_sales * 100.0
    }
}

/// Totals and margin over a set of rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Percentage, see [`profit_margin`].
    pub profit_margin: f64,
}

impl Summary {
    pub fn of<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let (total_sales, total_profit) = rows
            .into_iter()
            .fold((0.0, 0.0), |(s, p), rec| (s + rec.sales, p + rec.profit));
        Self {
            total_sales,
            total_profit,
            profit_margin: profit_margin(total_sales, total_profit),
        }
    }
}

/// A selection's summary set against the whole-dataset baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionMetrics {
    pub selection: Summary,
    pub baseline: Summary,
    /// `selection.profit_margin - baseline.profit_margin`, in percentage points.
    pub margin_delta: f64,
}

impl SelectionMetrics {
    pub fn compute(dataset: &OrderDataset, rows: &[&OrderRecord]) -> Self {
        let selection = Summary::of(rows.iter().copied());
        let baseline = Summary::of(&dataset.records);
        Self {
            selection,
            baseline,
            margin_delta: selection.profit_margin - baseline.profit_margin,
        }
    }
}

// ---------------------------------------------------------------------------
// Whole-dataset rollups
// ---------------------------------------------------------------------------

/// Sales and profit summed over one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    pub category: String,
    pub sales: f64,
    pub profit: f64,
}

/// Group the full dataset by category; categories sorted by name.
pub fn category_rollup(dataset: &OrderDataset) -> Vec<CategoryTotals> {
    let mut groups: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for rec in &dataset.records {
        let entry = groups.entry(rec.category.as_str()).or_insert((0.0, 0.0));
        entry.0 += rec.sales;
        entry.1 += rec.profit;
    }
    groups
        .into_iter()
        .map(|(category, (sales, profit))| CategoryTotals {
            category: category.to_string(),
            sales,
            profit,
        })
        .collect()
}

/// Monthly sales over the full dataset.
pub fn monthly_rollup(dataset: &OrderDataset) -> Vec<MonthlySales> {
    monthly_sales(&dataset.records)
}

use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const COL_CATEGORY: &str = "Category";
pub const COL_SUB_CATEGORY: &str = "Sub_Category";
pub const COL_ORDER_DATE: &str = "Order_Date";
pub const COL_SALES: &str = "Sales";
pub const COL_PROFIT: &str = "Profit";

// ---------------------------------------------------------------------------
// YearMonth – calendar month bucket
// ---------------------------------------------------------------------------

/// A calendar month. Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Months since year 0, used as a continuous plot axis.
    pub fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Inverse of [`YearMonth::ordinal`].
    pub fn from_ordinal(ordinal: i64) -> Self {
        let year = ordinal.div_euclid(12) as i32;
        let month = ordinal.rem_euclid(12) as u32 + 1;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// OrderRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single retail order line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub category: String,
    pub sub_category: String,
    pub order_date: NaiveDate,
    pub sales: f64,
    /// May be negative.
    pub profit: f64,
    /// Every column of the source row as text, aligned with
    /// [`OrderDataset::columns`].
    pub cells: Vec<String>,
}

// ---------------------------------------------------------------------------
// CategoryOptions – the category → sub-category index
// ---------------------------------------------------------------------------

/// A category together with the distinct sub-categories seen under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    pub name: String,
    /// First-appearance order.
    pub sub_categories: Vec<String>,
}

// ---------------------------------------------------------------------------
// OrderDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with a pre-computed category index.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct OrderDataset {
    /// All order rows, in file order.
    pub records: Vec<OrderRecord>,
    /// Every column header of the source, in file order.
    pub columns: Vec<String>,
    /// Categories in first-appearance order.
    pub categories: Vec<CategoryOptions>,
}

impl OrderDataset {
    /// Build the category index from the loaded records.
    pub fn from_records(columns: Vec<String>, records: Vec<OrderRecord>) -> Self {
        let mut categories: Vec<CategoryOptions> = Vec::new();

        for rec in &records {
            let pos = match categories.iter().position(|c| c.name == rec.category) {
                Some(pos) => pos,
                None => {
                    categories.push(CategoryOptions {
                        name: rec.category.clone(),
                        sub_categories: Vec::new(),
                    });
                    categories.len() - 1
                }
            };
            let subs = &mut categories[pos].sub_categories;
            if !subs.contains(&rec.sub_category) {
                subs.push(rec.sub_category.clone());
            }
        }

        OrderDataset {
            records,
            columns,
            categories,
        }
    }

    /// Distinct category names, first-appearance order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Distinct sub-categories of `category`; empty for an unknown category.
    pub fn sub_categories_of(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.sub_categories.as_slice())
            .unwrap_or(&[])
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(cat: &str, sub: &str, date: (i32, u32, u32), sales: f64, profit: f64) -> OrderRecord {
        let order_date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        OrderRecord {
            category: cat.to_string(),
            sub_category: sub.to_string(),
            order_date,
            sales,
            profit,
            cells: vec![
                cat.to_string(),
                sub.to_string(),
                order_date.to_string(),
                sales.to_string(),
                profit.to_string(),
            ],
        }
    }

    pub fn dataset(records: Vec<OrderRecord>) -> OrderDataset {
        let columns = [COL_CATEGORY, COL_SUB_CATEGORY, COL_ORDER_DATE, COL_SALES, COL_PROFIT]
            .iter()
            .map(|c| c.to_string())
            .collect();
        OrderDataset::from_records(columns, records)
    }

    /// The two-row Furniture/Chairs dataset.
    pub fn chairs() -> OrderDataset {
        dataset(vec![
            record("Furniture", "Chairs", (2024, 1, 15), 100.0, 20.0),
            record("Furniture", "Chairs", (2024, 2, 10), 50.0, -10.0),
        ])
    }

    /// A mixed dataset across three categories.
    pub fn superstore() -> OrderDataset {
        dataset(vec![
            record("Furniture", "Chairs", (2017, 1, 3), 200.0, 30.0),
            record("Office Supplies", "Paper", (2017, 1, 9), 20.0, 8.0),
            record("Technology", "Phones", (2017, 1, 31), 400.0, -40.0),
            record("Furniture", "Tables", (2017, 3, 1), 600.0, -90.0),
            record("Office Supplies", "Binders", (2017, 3, 14), 35.0, 12.0),
            record("Furniture", "Chairs", (2017, 3, 28), 150.0, 15.0),
            record("Technology", "Copiers", (2018, 1, 2), 1000.0, 350.0),
            record("Office Supplies", "Paper", (2016, 12, 31), 15.0, 6.0),
        ])
    }
}

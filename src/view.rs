use crate::data::aggregate::{
    CategoryTotals, MonthlySales, SelectionMetrics, category_rollup, monthly_rollup,
    monthly_sales,
};
use crate::data::filter::{Selection, filtered_view, sub_category_options};
use crate::data::model::OrderDataset;

// ---------------------------------------------------------------------------
// Selection-scoped view model
// ---------------------------------------------------------------------------

/// What the selection section of the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionView {
    /// Nothing matched: ask for at least one sub-category, no chart, no metrics.
    Prompt,
    Report {
        monthly_sales: Vec<MonthlySales>,
        metrics: SelectionMetrics,
    },
}

/// Everything derived from one `(dataset, selection)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub sub_category_options: Vec<String>,
    /// Size of the filtered view.
    pub selected_rows: usize,
    pub body: SelectionView,
}

#[cfg(test)]
impl ViewModel {
    pub fn is_prompt(&self) -> bool {
        matches!(self.body, SelectionView::Prompt)
    }
}

/// Run the filter → aggregate pipeline for one selection.
///
/// Pure: called afresh on every selection change, nothing carried over.
pub fn render(dataset: &OrderDataset, selection: &Selection) -> ViewModel {
    let sub_category_options =
        sub_category_options(dataset, selection.category.as_deref()).to_vec();

    let rows = filtered_view(dataset, &selection.sub_categories);
    let body = if rows.is_empty() {
        SelectionView::Prompt
    } else {
        SelectionView::Report {
            monthly_sales: monthly_sales(rows.iter().copied()),
            metrics: SelectionMetrics::compute(dataset, &rows),
        }
    };

    ViewModel {
        sub_category_options,
        selected_rows: rows.len(),
        body,
    }
}

// ---------------------------------------------------------------------------
// Whole-dataset rollups
// ---------------------------------------------------------------------------

/// Selection-independent reports, computed once per loaded dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rollups {
    pub categories: Vec<CategoryTotals>,
    pub monthly: Vec<MonthlySales>,
}

impl Rollups {
    pub fn compute(dataset: &OrderDataset) -> Self {
        Self {
            categories: category_rollup(dataset),
            monthly: monthly_rollup(dataset),
        }
    }
}

// ---------------------------------------------------------------------------
// Metric formatting
// ---------------------------------------------------------------------------

/// `$1,234.56`, negatives as `-$1,234.56`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two-decimal percentage, e.g. `6.67%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", normalize_zero(value))
}

/// Signed two-decimal percentage, e.g. `+0.00%` or `-1.25%`.
pub fn format_delta(value: f64) -> String {
    format!("{:+.2}%", normalize_zero(value))
}

/// Values that round to zero at two decimals print without a minus sign.
fn normalize_zero(value: f64) -> f64 {
    if (value * 100.0).round() == 0.0 { 0.0 } else { value }
}

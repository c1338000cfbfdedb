use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::data::aggregate::{CategoryTotals, MonthlySales};
use crate::data::model::YearMonth;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Monthly sales line chart
// ---------------------------------------------------------------------------

/// `[x, y]` per month, x being [`YearMonth::ordinal`].
fn month_points(months: &[MonthlySales]) -> Vec<[f64; 2]> {
    months
        .iter()
        .map(|m| [m.month.ordinal() as f64, m.sales])
        .collect()
}

/// Line chart of sales per month, with a marker on every month so a single
/// month still shows.
pub fn monthly_sales_chart(ui: &mut Ui, id: &str, months: &[MonthlySales]) {
    let coords = month_points(months);

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Order_Date")
        .y_axis_label("Sales")
        .x_axis_formatter(month_axis_label)
        .label_formatter(|name, value| {
            let month = YearMonth::from_ordinal(value.x.round() as i64);
            if name.is_empty() {
                format!("{month}\n{:.2}", value.y)
            } else {
                format!("{name}\n{month}\n{:.2}", value.y)
            }
        })
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Sales")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .name("Sales")
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}

/// Only whole months get a tick label.
fn month_axis_label(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    if mark.value.fract().abs() > f64::EPSILON {
        return String::new();
    }
    YearMonth::from_ordinal(mark.value as i64).to_string()
}

// ---------------------------------------------------------------------------
// Category sales bar chart
// ---------------------------------------------------------------------------

/// One bar per category, in rollup order.
pub fn category_sales_chart(ui: &mut Ui, totals: &[CategoryTotals], colors: &CategoryColors) {
    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.sales)
                .name(&c.category)
                .fill(colors.color_for(&c.category))
                .width(0.6)
        })
        .collect();

    let labels: Vec<String> = totals.iter().map(|c| c.category.clone()).collect();

    Plot::new("category_sales_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Category")
        .y_axis_label("Sales")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Sales"));
        });
}

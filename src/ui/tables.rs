use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{CategoryTotals, MonthlySales};
use crate::data::model::OrderDataset;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 240.0;

/// Shared table chrome. Each table gets its own id scope.
fn table<'a>(ui: &'a mut Ui, columns: usize) -> TableBuilder<'a> {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0), columns)
        .max_scroll_height(MAX_TABLE_HEIGHT)
        .auto_shrink([false, true])
}

fn amount(ui: &mut Ui, value: f64) {
    ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
        ui.monospace(format!("{value:.2}"));
    });
}

// ---------------------------------------------------------------------------
// Full dataset
// ---------------------------------------------------------------------------

/// Every row and column of the loaded dataset, as text.
pub fn dataset_table(ui: &mut Ui, dataset: &OrderDataset) {
    ui.push_id("dataset_table", |ui: &mut Ui| {
        table(ui, dataset.columns.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for col in &dataset.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                    let rec = &dataset.records[row.index()];
                    for i in 0..dataset.columns.len() {
                        row.col(|ui: &mut Ui| {
                            ui.label(rec.cells.get(i).map(String::as_str).unwrap_or(""));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

/// Category, Sales, Profit.
pub fn category_table(ui: &mut Ui, totals: &[CategoryTotals]) {
    ui.push_id("category_table", |ui: &mut Ui| {
        table(ui, 3)
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for title in ["Category", "Sales", "Profit"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, totals.len(), |mut row| {
                    let c = &totals[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(&c.category);
                    });
                    row.col(|ui: &mut Ui| amount(ui, c.sales));
                    row.col(|ui: &mut Ui| amount(ui, c.profit));
                });
            });
    });
}

/// Order month, Sales.
pub fn monthly_table(ui: &mut Ui, id: &str, months: &[MonthlySales]) {
    ui.push_id(id, |ui: &mut Ui| {
        table(ui, 2)
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for title in ["Order_Date", "Sales"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, months.len(), |mut row| {
                    let m = &months[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.monospace(m.month.to_string());
                    });
                    row.col(|ui: &mut Ui| amount(ui, m.sales));
                });
            });
    });
}

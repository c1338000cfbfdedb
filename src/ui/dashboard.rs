use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::SelectionMetrics;
use crate::state::AppState;
use crate::ui::{plot, tables};
use crate::view::{SelectionView, format_currency, format_delta, format_percent};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the report sections top to bottom.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view orders  (File → Open…)");
        });
        return;
    };
    if dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("The loaded file has no orders.");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Sales Dashboard");

            ui.add_space(8.0);
            ui.label(RichText::new("Input Data").heading().size(16.0));
            tables::dataset_table(ui, dataset);

            ui.add_space(12.0);
            ui.separator();
            if let Some(view) = &state.view {
                selection_section(ui, &view.body);
            }

            ui.add_space(12.0);
            ui.separator();
            ui.label(RichText::new("Sales by Category").heading().size(16.0));
            tables::category_table(ui, &state.rollups.categories);
            plot::category_sales_chart(ui, &state.rollups.categories, &state.category_colors);

            ui.add_space(12.0);
            ui.separator();
            ui.label(RichText::new("Sales by Month").heading().size(16.0));
            tables::monthly_table(ui, "monthly_all_table", &state.rollups.monthly);
            plot::monthly_sales_chart(ui, "monthly_all_chart", &state.rollups.monthly);
        });
}

// ---------------------------------------------------------------------------
// Selection section
// ---------------------------------------------------------------------------

fn selection_section(ui: &mut Ui, body: &SelectionView) {
    ui.label(RichText::new("Selected Sub-Categories").heading().size(16.0));
    match body {
        SelectionView::Prompt => {
            ui.label(
                RichText::new("Please select at least one sub-category.")
                    .italics()
                    .color(Color32::YELLOW),
            );
        }
        SelectionView::Report {
            monthly_sales,
            metrics,
        } => {
            plot::monthly_sales_chart(ui, "monthly_selection_chart", monthly_sales);
            ui.add_space(8.0);
            metric_row(ui, metrics);
        }
    }
}

fn metric_row(ui: &mut Ui, metrics: &SelectionMetrics) {
    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Total Sales", &format_currency(metrics.selection.total_sales), None);
        metric(ui, "Total Profit", &format_currency(metrics.selection.total_profit), None);
        metric(
            ui,
            "Profit Margin (%)",
            &format_percent(metrics.selection.profit_margin),
            Some(metrics.margin_delta),
        );
    });
}

/// A labelled value with an optional signed percentage delta underneath.
fn metric(ui: &mut Ui, label: &str, value: &str, delta: Option<f64>) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(180.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.label(RichText::new(value).size(26.0).strong());
            if let Some(d) = delta {
                let text = format_delta(d);
                let color = if text.starts_with('-') {
                    Color32::from_rgb(0xff, 0x4b, 0x4b)
                } else {
                    Color32::from_rgb(0x09, 0xab, 0x3b)
                };
                let arrow = if text.starts_with('-') { "↓" } else { "↑" };
                ui.label(RichText::new(format!("{arrow} {text}")).color(color));
            }
        });
    });
}

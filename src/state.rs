use std::path::Path;

use crate::color::CategoryColors;
use crate::config::DashboardConfig;
use crate::data::filter::Selection;
use crate::data::loader::load_file;
use crate::data::model::OrderDataset;
use crate::view::{Rollups, ViewModel, render};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<OrderDataset>,

    /// Current category / sub-category choice.
    pub selection: Selection,

    /// Output of [`render`] for the current selection.
    pub view: Option<ViewModel>,

    /// Selection-independent reports for the loaded dataset.
    pub rollups: Rollups,

    /// Bar colours for the category rollup.
    pub category_colors: CategoryColors,

    pub config: DashboardConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            view: None,
            rollups: Rollups::default(),
            category_colors: CategoryColors::distinct(std::iter::empty()),
            config,
            status_message: None,
        }
    }

    /// Load a dataset from disk. On failure the previous dataset (if any)
    /// stays in place and the error is surfaced.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} orders across {} categories from {}",
                    dataset.len(),
                    dataset.categories.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error loading {}: {e:#}", path.display()));
            }
        }
    }

    /// Ingest a newly loaded dataset, compute rollups and reset the selection.
    pub fn set_dataset(&mut self, dataset: OrderDataset) {
        self.rollups = Rollups::compute(&dataset);
        self.category_colors = match self.config.bar_rgb() {
            Ok(Some(rgb)) => CategoryColors::uniform(rgb),
            Ok(None) => CategoryColors::distinct(dataset.category_names()),
            Err(e) => {
                log::warn!("{e}; using palette colours");
                CategoryColors::distinct(dataset.category_names())
            }
        };
        self.selection = Selection::initial(&dataset);
        self.view = Some(render(&dataset, &self.selection));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Replace the selection and re-run the pipeline.
    fn apply(&mut self, next: Selection) {
        let Some(ds) = &self.dataset else {
            return;
        };
        log::debug!(
            "Selection changed: category={:?} sub_categories={:?}",
            next.category,
            next.sub_categories
        );
        self.view = Some(render(ds, &next));
        self.selection = next;
    }

    pub fn select_category(&mut self, category: Option<String>) {
        if let Some(ds) = &self.dataset {
            let next = self.selection.with_category(ds, category);
            self.apply(next);
        }
    }

    /// Toggle a single sub-category in the selection.
    pub fn toggle_sub_category(&mut self, sub_category: &str) {
        if let Some(ds) = &self.dataset {
            let next = self.selection.with_toggled(ds, sub_category);
            self.apply(next);
        }
    }

    /// Select all sub-categories of the current category.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            let next = self.selection.with_all(ds);
            self.apply(next);
        }
    }

    /// Deselect all sub-categories.
    pub fn select_none(&mut self) {
        let next = self.selection.with_none();
        self.apply(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::*;

    fn loaded() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(chairs());
        state
    }

    #[test]
    fn fresh_dataset_starts_at_the_prompt() {
        let state = loaded();
        assert_eq!(state.selection.category.as_deref(), Some("Furniture"));
        assert!(state.view.as_ref().unwrap().is_prompt());
        assert_eq!(state.rollups.categories.len(), 1);
    }

    #[test]
    fn toggling_a_sub_category_produces_a_report() {
        let mut state = loaded();
        state.toggle_sub_category("Chairs");
        assert!(!state.view.as_ref().unwrap().is_prompt());

        state.select_none();
        assert!(state.view.as_ref().unwrap().is_prompt());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        state.load(Path::new("/nonexistent/orders.csv"));
        assert!(state.status_message.is_some());
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(2));
    }

    #[test]
    fn actions_without_dataset_are_ignored() {
        let mut state = AppState::new(DashboardConfig::default());
        state.select_all();
        state.toggle_sub_category("Chairs");
        assert!(state.view.is_none());
    }
}

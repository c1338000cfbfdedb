use std::collections::BTreeSet;

use super::model::{OrderDataset, OrderRecord};

// ---------------------------------------------------------------------------
// Selection – the user's current filter choice
// ---------------------------------------------------------------------------

/// Immutable snapshot of the category / sub-category controls.
///
/// Each user action produces a new `Selection` through one of the
/// `with_*` builders; nothing mutates a selection in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: Option<String>,
    pub sub_categories: BTreeSet<String>,
}

impl Selection {
    /// Initial selection for a freshly loaded dataset: the first category,
    /// nothing picked underneath it.
    pub fn initial(dataset: &OrderDataset) -> Self {
        Self {
            category: dataset.categories.first().map(|c| c.name.clone()),
            sub_categories: BTreeSet::new(),
        }
    }

    /// Switch category, dropping sub-categories that do not belong to it.
    pub fn with_category(&self, dataset: &OrderDataset, category: Option<String>) -> Self {
        let allowed = sub_category_options(dataset, category.as_deref());
        let sub_categories = self
            .sub_categories
            .iter()
            .filter(|s| allowed.contains(s))
            .cloned()
            .collect();
        Self {
            category,
            sub_categories,
        }
    }

    /// Toggle one sub-category. Values outside the current category's
    /// options are ignored.
    pub fn with_toggled(&self, dataset: &OrderDataset, sub_category: &str) -> Self {
        let mut next = self.clone();
        if next.sub_categories.remove(sub_category) {
            return next;
        }
        if sub_category_options(dataset, self.category.as_deref())
            .iter()
            .any(|s| s == sub_category)
        {
            next.sub_categories.insert(sub_category.to_string());
        }
        next
    }

    /// Select every sub-category of the current category.
    pub fn with_all(&self, dataset: &OrderDataset) -> Self {
        Self {
            category: self.category.clone(),
            sub_categories: sub_category_options(dataset, self.category.as_deref())
                .iter()
                .cloned()
                .collect(),
        }
    }

    /// Clear the sub-category selection.
    pub fn with_none(&self) -> Self {
        Self {
            category: self.category.clone(),
            sub_categories: BTreeSet::new(),
        }
    }
}

/// Sub-category choices offered for `category`: exactly the distinct values
/// seen under it. No category means no options.
pub fn sub_category_options<'a>(dataset: &'a OrderDataset, category: Option<&str>) -> &'a [String] {
    match category {
        Some(cat) => dataset.sub_categories_of(cat),
        None => &[],
    }
}

/// Rows whose sub-category is in `selected`, in dataset order.
///
/// An empty `selected` set yields an empty view. The category is not
/// consulted; membership of the sub-category alone decides.
pub fn filtered_view<'a>(
    dataset: &'a OrderDataset,
    selected: &BTreeSet<String>,
) -> Vec<&'a OrderRecord> {
    if selected.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .filter(|rec| selected.contains(&rec.sub_category))
        .collect()
}

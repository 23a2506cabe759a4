use std::sync::Arc;

use crate::color::CountryColors;
use crate::data::filter::{all_countries, filtered_indices, CountrySelection, YEAR_MAX, YEAR_MIN};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Trends,
    Geography,
    Economy,
    Satisfaction,
    Breakdown,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Trends,
        Tab::Geography,
        Tab::Economy,
        Tab::Satisfaction,
        Tab::Breakdown,
        Tab::Data,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Trends => "📈 Trends",
            Tab::Geography => "🌍 Geography",
            Tab::Economy => "💰 Economy",
            Tab::Satisfaction => "😊 Satisfaction",
            Tab::Breakdown => "🗂 Breakdown",
            Tab::Data => "📋 Dataset",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Written once per load,
    /// read-only thereafter — render cycles only clone the handle.
    pub dataset: Option<Arc<Dataset>>,

    /// Inclusive year range selected in the sidebar.
    pub year_range: (i32, i32),

    /// Currently selected countries.
    pub selected_countries: CountrySelection,

    /// Indices of rows passing the current filters (cached per change).
    pub visible_indices: Vec<usize>,

    /// Which tab is showing.
    pub active_tab: Tab,

    /// Stable per-country colours.
    pub country_colors: Option<CountryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            year_range: (YEAR_MIN, YEAR_MAX),
            selected_countries: CountrySelection::default(),
            visible_indices: Vec::new(),
            active_tab: Tab::default(),
            country_colors: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: full year range, every country
    /// selected, colours rebuilt, filters applied.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.year_range = (YEAR_MIN, YEAR_MAX);
        self.selected_countries = all_countries(&dataset);
        self.country_colors = Some(CountryColors::new(&dataset.countries));
        self.dataset = Some(Arc::new(dataset));
        self.refilter();
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, self.year_range, &self.selected_countries);
        }
    }

    /// Set the inclusive year range. `lo > hi` is allowed and yields an
    /// empty view.
    pub fn set_year_range(&mut self, range: (i32, i32)) {
        self.year_range = range;
        self.refilter();
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selected_countries.remove(country) {
            self.selected_countries.insert(country.to_string());
        }
        self.refilter();
    }

    /// Select every country in the dataset.
    pub fn select_all_countries(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected_countries = all_countries(ds);
            self.refilter();
        }
    }

    /// Deselect every country. All downstream summaries become empty, not
    /// errors.
    pub fn select_no_countries(&mut self) {
        self.selected_countries.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ObservationRow;

    fn row(country: &str, year: i32) -> ObservationRow {
        ObservationRow {
            country: country.to_string(),
            year,
            total_buyers: 10,
            total_spend_usd: 250.0,
            avg_spend_usd: 25.0,
            avg_income_usd: 1200.0,
            total_items: 30,
            avg_items: 3.0,
            avg_age: 31.5,
            pct_satisfied: 80.0,
            pct_recommend: 75.0,
            pct_first_time: 20.0,
            top_channel: "Online".to_string(),
            top_platform: "Vinted".to_string(),
            top_category: "Ropa casual".to_string(),
            top_motivation: "Precio".to_string(),
        }
    }

    fn state_with_data() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Dataset::from_rows(vec![
            row("Perú", 2020),
            row("México", 2021),
            row("Chile", 2025),
        ]));
        state
    }

    #[test]
    fn set_dataset_selects_everything() {
        let state = state_with_data();
        assert_eq!(state.year_range, (YEAR_MIN, YEAR_MAX));
        assert_eq!(state.selected_countries.len(), 3);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert!(state.country_colors.is_some());
    }

    #[test]
    fn year_range_and_country_toggles_refilter() {
        let mut state = state_with_data();
        state.set_year_range((2020, 2021));
        assert_eq!(state.visible_indices, vec![0, 1]);

        state.toggle_country("Perú");
        assert_eq!(state.visible_indices, vec![1]);

        state.toggle_country("Perú");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn deselecting_everything_empties_the_view() {
        let mut state = state_with_data();
        state.select_no_countries();
        assert!(state.visible_indices.is_empty());

        state.select_all_countries();
        assert_eq!(state.visible_indices.len(), 3);
    }
}

use eframe::egui::Ui;

use crate::data::aggregate;
use crate::data::model::Metric;
use crate::state::AppState;
use crate::ui::charts;

/// Per-country rankings across all selected years.
pub fn show(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let Some(colors) = &state.country_colors else { return };
    let idx = &state.visible_indices;

    ui.heading("🌍 Geographic analysis");
    ui.add_space(4.0);

    ui.columns(2, |cols| {
        charts::ranked_bars(
            &mut cols[0],
            "geo_buyers_ranked",
            "Total buyers by country (all selected years)",
            &aggregate::sum_by_country(ds, idx, Metric::TotalBuyers),
            colors,
            false,
        );
        charts::ranked_bars(
            &mut cols[1],
            "geo_spend_ranked",
            "Avg spend by country (USD)",
            &aggregate::mean_by_country(ds, idx, Metric::AvgSpend),
            colors,
            false,
        );
    });

    ui.columns(2, |cols| {
        charts::ranked_bars(
            &mut cols[0],
            "geo_income_ranked",
            "Avg income by country (USD)",
            &aggregate::mean_by_country(ds, idx, Metric::AvgIncome),
            colors,
            false,
        );
        // Ascending for the horizontal layout, youngest at the bottom.
        let mut ages = aggregate::mean_by_country(ds, idx, Metric::AvgAge);
        ages.reverse();
        charts::ranked_bars(
            &mut cols[1],
            "geo_age_ranked",
            "Avg buyer age by country",
            &ages,
            colors,
            true,
        );
    });
}

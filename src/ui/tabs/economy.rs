use eframe::egui::{Color32, Ui};

use crate::data::aggregate;
use crate::data::model::Metric;
use crate::state::AppState;
use crate::ui::charts;

/// Spend and income analysis.
pub fn show(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let Some(colors) = &state.country_colors else { return };
    let idx = &state.visible_indices;

    ui.heading("💰 Economic analysis");
    ui.add_space(4.0);

    ui.columns(2, |cols| {
        let spend = aggregate::metric_values(ds, idx, Metric::AvgSpend);
        charts::histogram_bars(
            &mut cols[0],
            "eco_spend_hist",
            "Distribution of avg spend (USD)",
            &aggregate::histogram(&spend, 30),
            aggregate::mean(&spend),
            aggregate::median(&spend),
            Color32::from_rgb(240, 147, 251),
        );

        let points = aggregate::points_by_country(ds, idx, Metric::AvgIncome, Metric::AvgSpend);
        let flat: Vec<[f64; 2]> = points.iter().flat_map(|(_, p)| p.iter().copied()).collect();
        charts::scatter_by_country(
            &mut cols[1],
            "eco_income_scatter",
            "Avg income vs avg spend by country/year",
            &points,
            colors,
            aggregate::linear_fit(&flat),
            "Avg income (USD)",
            "Avg spend (USD)",
        );
    });

    ui.columns(2, |cols| {
        charts::area_by_year(
            &mut cols[0],
            "eco_cumulative_area",
            "Cumulative total spend (USD)",
            &aggregate::cumulative_by_year(ds, idx, Metric::TotalSpend),
            Color32::from_rgb(67, 233, 123),
        );
        charts::box_plots(
            &mut cols[1],
            "eco_spend_box",
            "Spend variability by country",
            &aggregate::spread_by_country(ds, idx, Metric::AvgSpend),
            colors,
        );
    });

    ui.add_space(8.0);
    charts::lines_by_country(
        ui,
        "eco_spend_lines",
        "Total annual spend by country (USD)",
        &aggregate::series_by_country(ds, idx, Metric::TotalSpend),
        colors,
        false,
    );

    ui.add_space(8.0);
    charts::bars_by_year(
        ui,
        "eco_items_bars",
        "Total items purchased per year",
        &aggregate::sum_by_year(ds, idx, Metric::TotalItems),
        Color32::from_rgb(102, 126, 234),
    );
}

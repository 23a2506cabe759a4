use eframe::egui::{Color32, Ui};

use crate::data::aggregate::{self, GroupMatrix};
use crate::data::model::{CategoryCol, Metric};
use crate::state::AppState;
use crate::ui::charts;

/// Temporal evolution per country.
pub fn show(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let Some(colors) = &state.country_colors else { return };
    let idx = &state.visible_indices;

    ui.heading("📈 Temporal evolution by country");
    ui.add_space(4.0);

    ui.columns(2, |cols| {
        charts::area_by_year(
            &mut cols[0],
            "trends_buyers_area",
            "Total buyers per year",
            &aggregate::sum_by_year(ds, idx, Metric::TotalBuyers),
            Color32::from_rgb(102, 126, 234),
        );
        charts::lines_by_country(
            &mut cols[1],
            "trends_spend_lines",
            "Avg spend per year by country (USD)",
            &aggregate::series_by_country(ds, idx, Metric::AvgSpend),
            colors,
            false,
        );
    });

    ui.columns(2, |cols| {
        let by_country = GroupMatrix::from_pairs(
            aggregate::group_sum(ds, idx, CategoryCol::Year, CategoryCol::Country, Metric::TotalBuyers)
                .into_iter()
                .map(|p| (p.primary, p.secondary, p.value)),
        );
        let palette: Vec<Color32> = by_country
            .series
            .iter()
            .map(|(country, _)| colors.color_for(country))
            .collect();
        charts::stacked_matrix_bars(
            &mut cols[0],
            "trends_buyers_stacked",
            "Buyers by country and year (stacked)",
            &by_country,
            &palette,
        );
        charts::lines_by_country(
            &mut cols[1],
            "trends_items_lines",
            "Avg items per year by country",
            &aggregate::series_by_country(ds, idx, Metric::AvgItems),
            colors,
            false,
        );
    });

    ui.add_space(8.0);
    charts::heat_grid(
        ui,
        "Heatmap: buyers by country × year",
        &aggregate::pivot_sum(ds, idx, Metric::TotalBuyers),
    );

    ui.add_space(8.0);
    let channel_by_year = GroupMatrix::from_pairs(
        aggregate::group_count(ds, idx, CategoryCol::Year, CategoryCol::TopChannel)
            .into_iter()
            .map(|p| (p.primary, p.secondary, p.count as f64)),
    );
    let palette = crate::color::generate_palette(channel_by_year.series.len());
    charts::stacked_matrix_bars(
        ui,
        "trends_channel_stacked",
        "Most frequent channel per year",
        &channel_by_year,
        &palette,
    );
}

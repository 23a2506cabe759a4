use std::collections::BTreeMap;

use eframe::egui::Ui;

use crate::data::aggregate::{self, GroupMatrix};
use crate::data::model::{CategoryCol, Metric};
use crate::state::AppState;
use crate::ui::charts;

/// Satisfaction and behavior breakdowns.
pub fn show(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let Some(colors) = &state.country_colors else { return };
    let idx = &state.visible_indices;

    ui.heading("😊 Satisfaction and behavior");
    ui.add_space(4.0);

    ui.columns(2, |cols| {
        charts::lines_by_country(
            &mut cols[0],
            "sat_satisfied_lines",
            "% satisfied per year by country",
            &aggregate::series_by_country(ds, idx, Metric::PctSatisfied),
            colors,
            true,
        );
        charts::lines_by_country(
            &mut cols[1],
            "sat_recommend_lines",
            "% who recommend per year by country",
            &aggregate::series_by_country(ds, idx, Metric::PctRecommend),
            colors,
            true,
        );
    });

    ui.columns(2, |cols| {
        charts::grouped_matrix_bars(
            &mut cols[0],
            "sat_behavior_grouped",
            "Behavior KPIs by country (%)",
            &behavior_matrix(state),
            &crate::color::generate_palette(3),
        );
        charts::scatter_by_country(
            &mut cols[1],
            "sat_vs_recommend_scatter",
            "Satisfaction vs recommendation",
            &aggregate::points_by_country(ds, idx, Metric::PctSatisfied, Metric::PctRecommend),
            colors,
            None,
            "% satisfied",
            "% recommend",
        );
    });

    ui.add_space(8.0);
    let channel = GroupMatrix::from_pairs(
        aggregate::group_count(ds, idx, CategoryCol::Country, CategoryCol::TopChannel)
            .into_iter()
            .map(|p| (p.primary, p.secondary, p.count as f64)),
    );
    charts::grouped_matrix_bars(
        ui,
        "sat_channel_grouped",
        "Most frequent channel by country",
        &channel,
        &crate::color::generate_palette(channel.series.len()),
    );

    ui.add_space(8.0);
    let platform = GroupMatrix::from_pairs(
        aggregate::group_count(ds, idx, CategoryCol::Country, CategoryCol::TopPlatform)
            .into_iter()
            .map(|p| (p.primary, p.secondary, p.count as f64)),
    );
    charts::stacked_matrix_bars(
        ui,
        "sat_platform_stacked",
        "Top discovery platform by country",
        &platform,
        &crate::color::generate_palette(platform.series.len()),
    );
}

/// Mean of the three behavior percentages per country, in a fixed country
/// order so the bar clusters line up.
fn behavior_matrix(state: &AppState) -> GroupMatrix {
    let Some(ds) = &state.dataset else {
        return GroupMatrix {
            categories: Vec::new(),
            series: Vec::new(),
        };
    };
    let idx = &state.visible_indices;
    let countries = aggregate::countries_in_view(ds, idx);

    let series = [
        ("% satisfied", Metric::PctSatisfied),
        ("% recommend", Metric::PctRecommend),
        ("% first-time", Metric::PctFirstTime),
    ]
    .into_iter()
    .map(|(label, metric)| {
        let means: BTreeMap<String, f64> = aggregate::mean_by_country(ds, idx, metric)
            .into_iter()
            .map(|cv| (cv.country, cv.value))
            .collect();
        let values = countries
            .iter()
            .map(|c| means.get(c).copied().unwrap_or(0.0))
            .collect();
        (label.to_string(), values)
    })
    .collect();

    GroupMatrix {
        categories: countries,
        series,
    }
}

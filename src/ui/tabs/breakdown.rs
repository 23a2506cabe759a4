use eframe::egui::{self, Ui};

use crate::data::aggregate::{self, GroupMatrix};
use crate::data::model::{CategoryCol, Metric};
use crate::state::AppState;
use crate::ui::charts;
use crate::ui::panels::{fmt_int, fmt_usd};

/// Hierarchical breakdowns and the correlation matrix.
pub fn show(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let Some(colors) = &state.country_colors else { return };
    let idx = &state.visible_indices;

    ui.heading("🗂 Hierarchical breakdowns");
    ui.add_space(4.0);

    ui.columns(2, |cols| {
        let by_channel = GroupMatrix::from_pairs(
            aggregate::group_sum(
                ds,
                idx,
                CategoryCol::Country,
                CategoryCol::TopChannel,
                Metric::TotalBuyers,
            )
            .into_iter()
            .map(|p| (p.primary, p.secondary, p.value)),
        );
        charts::stacked_matrix_bars(
            &mut cols[0],
            "brk_channel_stacked",
            "Buyers by country → channel",
            &by_channel,
            &crate::color::generate_palette(by_channel.series.len()),
        );

        let by_motivation = GroupMatrix::from_pairs(
            aggregate::group_sum(
                ds,
                idx,
                CategoryCol::Country,
                CategoryCol::TopMotivation,
                Metric::TotalBuyers,
            )
            .into_iter()
            .map(|p| (p.primary, p.secondary, p.value)),
        );
        charts::stacked_matrix_bars(
            &mut cols[1],
            "brk_motivation_stacked",
            "Buyers by country → main motivation",
            &by_motivation,
            &crate::color::generate_palette(by_motivation.series.len()),
        );
    });

    ui.add_space(8.0);
    ui.strong("Country → channel → top category");
    let rows = aggregate::channel_category_breakdown(ds, idx);
    if rows.is_empty() {
        ui.weak("No data for the current selection.");
    } else {
        egui::Grid::new("brk_table")
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui: &mut Ui| {
                for header in ["Country", "Channel", "Category", "Buyers", "Mean spend"] {
                    ui.strong(header);
                }
                ui.end_row();
                for row in &rows {
                    let label = egui::RichText::new(row.country.as_str())
                        .color(colors.color_for(&row.country));
                    ui.label(label);
                    ui.label(&row.channel);
                    ui.label(&row.category);
                    ui.label(fmt_int(row.buyers));
                    ui.label(fmt_usd(row.mean_spend));
                    ui.end_row();
                }
            });
    }

    ui.add_space(8.0);
    charts::corr_grid(
        ui,
        "Correlation matrix (Pearson)",
        &aggregate::correlation_matrix(ds, idx),
    );
}

use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::export;
use crate::data::model::ObservationRow;
use crate::state::AppState;
use crate::ui::panels::fmt_int;

/// The filtered dataset as a table, with CSV export.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = state.dataset.clone() else { return };

    ui.heading("📋 Normalized dataset");
    ui.small("1 row per country × year · 4-digit years · numeric columns carry no letters");
    ui.add_space(4.0);

    // ---- Summary metrics ----
    let years: Vec<i32> = state.visible_indices.iter().map(|&i| ds.rows[i].year).collect();
    let period = match (years.iter().min(), years.iter().max()) {
        (Some(lo), Some(hi)) => format!("{lo} – {hi}"),
        _ => "–".to_string(),
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Rows: {}", fmt_int(state.visible_indices.len() as u64)));
        ui.separator();
        ui.label(format!("Columns: {}", ObservationRow::COLUMNS.len()));
        ui.separator();
        ui.label(format!("Period: {period}"));
        ui.separator();
        if ui.button("📥 Export filtered CSV").clicked() {
            export_dialog(state, &ds);
        }
    });
    ui.add_space(4.0);

    // ---- Table ----
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto(), ObservationRow::COLUMNS.len())
        .header(20.0, |mut header| {
            for name in ObservationRow::COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            let indices = state.visible_indices.clone();
            body.rows(18.0, indices.len(), |mut table_row| {
                let obs = &ds.rows[indices[table_row.index()]];
                let cells = [
                    obs.country.clone(),
                    obs.year.to_string(),
                    obs.total_buyers.to_string(),
                    format!("{:.2}", obs.total_spend_usd),
                    format!("{:.2}", obs.avg_spend_usd),
                    format!("{:.2}", obs.avg_income_usd),
                    obs.total_items.to_string(),
                    format!("{:.2}", obs.avg_items),
                    format!("{:.1}", obs.avg_age),
                    format!("{:.1}", obs.pct_satisfied),
                    format!("{:.1}", obs.pct_recommend),
                    format!("{:.1}", obs.pct_first_time),
                    obs.top_channel.clone(),
                    obs.top_platform.clone(),
                    obs.top_category.clone(),
                    obs.top_motivation.clone(),
                ];
                for cell in cells {
                    table_row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

fn export_dialog(state: &mut AppState, ds: &crate::data::model::Dataset) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .set_file_name("filtered.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::export_csv(&path, ds, &state.visible_indices) {
            Ok(()) => {
                state.status_message = Some(format!(
                    "Exported {} rows to {}",
                    state.visible_indices.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }
}

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::aggregate::Kpis;
use crate::data::filter::{YEAR_MAX, YEAR_MIN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Thousands-separated integer, e.g. `1234567` → `1,234,567`.
pub fn fmt_int(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with separator, NaN-safe.
pub fn fmt_usd(v: f64) -> String {
    if !v.is_finite() {
        return "–".to_string();
    }
    format!("${}", fmt_int(v.round().max(0.0) as u64))
}

/// Percentage with one decimal; NaN (undefined statistic) renders as a dash.
pub fn fmt_pct(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.1}%")
    } else {
        "–".to_string()
    }
}

fn fmt_years(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.1} yrs")
    } else {
        "–".to_string()
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} observations loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: year range and country multi-select.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("📅 Years");
            let (mut lo, mut hi) = state.year_range;
            let mut changed = false;
            changed |= ui
                .add(Slider::new(&mut lo, YEAR_MIN..=YEAR_MAX).text("from"))
                .changed();
            changed |= ui
                .add(Slider::new(&mut hi, YEAR_MIN..=YEAR_MAX).text("to"))
                .changed();
            if changed {
                // lo > hi is allowed: it simply yields an empty view.
                state.set_year_range((lo, hi));
            }
            ui.separator();

            // ---- Country multi-select ----
            let n_selected = state.selected_countries.len();
            let n_total = dataset.countries.len();
            let header_text = format!("🌎 Countries  ({n_selected}/{n_total})");

            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("country_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_countries();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_countries();
                        }
                    });

                    for country in &dataset.countries {
                        let is_selected = state.selected_countries.contains(country);

                        // Swatch the label with the country's chart colour.
                        let mut text = RichText::new(country);
                        if let Some(colors) = &state.country_colors {
                            text = text.color(colors.color_for(country));
                        }

                        let mut checked = is_selected;
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_country(country);
                        }
                    }
                });

            ui.separator();
            ui.label(format!("Records: {} rows", fmt_int(state.visible_indices.len() as u64)));
            ui.small("1 row = 1 country × 1 year");
        });
}

// ---------------------------------------------------------------------------
// KPI strip
// ---------------------------------------------------------------------------

/// The six headline cards across the top of the central panel.
pub fn kpi_strip(ui: &mut Ui, kpis: &Kpis) {
    let cards = [
        ("👥 Total buyers", fmt_int(kpis.total_buyers)),
        ("💰 Total spend", fmt_usd(kpis.total_spend_usd)),
        ("📦 Total items", fmt_int(kpis.total_items)),
        ("🎂 Avg age", fmt_years(kpis.mean_age)),
        ("😊 Satisfied", fmt_pct(kpis.mean_satisfied)),
        ("📣 Recommend", fmt_pct(kpis.mean_recommend)),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.strong(RichText::new(value).size(18.0));
                    ui.small(label);
                });
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open observation data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} observations across {} countries",
                    dataset.len(),
                    dataset.countries.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
                state.loading = false;
            }
        }
    }
}

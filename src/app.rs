use eframe::egui::{self, ScrollArea};

use crate::data::aggregate;
use crate::state::{AppState, Tab};
use crate::ui::{panels, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ThriftboardApp {
    pub state: AppState,
}

impl eframe::App for ThriftboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, tab bar, active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(ds) = self.state.dataset.clone() else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a dataset to explore it  (File → Open…)");
                });
                return;
            };

            panels::kpi_strip(ui, &aggregate::kpis(&ds, &self.state.visible_indices));
            ui.separator();

            ui.horizontal(|ui: &mut egui::Ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.active_tab, tab, tab.label());
                }
            });
            ui.separator();

            match self.state.active_tab {
                // The table scrolls itself.
                Tab::Data => tabs::table::show(ui, &mut self.state),
                tab => {
                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| match tab {
                            Tab::Trends => tabs::trends::show(ui, &self.state),
                            Tab::Geography => tabs::geography::show(ui, &self.state),
                            Tab::Economy => tabs::economy::show(ui, &self.state),
                            Tab::Satisfaction => tabs::satisfaction::show(ui, &self.state),
                            Tab::Breakdown => tabs::breakdown::show(ui, &self.state),
                            Tab::Data => {}
                        });
                }
            }
        });
    }
}

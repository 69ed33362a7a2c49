use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Query entries and corpus lists ----
        egui::TopBottomPanel::top("query_panel").show(ctx, |ui| {
            panels::query_panel(ui, &mut self.state);
        });

        // ---- Bottom panel: messages and instructions ----
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            panels::status_panel(ui, &self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::ngram_plot(ui, &mut self.state);
        });

        panels::settings_window(ctx, &mut self.state);
        panels::about_window(ctx, &mut self.state);
    }
}

mod app;
mod chart;
mod color;
mod config;
mod corpus;
mod ngram;
mod query;
mod state;
mod timespan;
mod ui;

use app::ExplorerApp;
use clap::Parser;
use config::Args;
use eframe::egui;
use ngram::GoogleBooks;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();
    let source = match GoogleBooks::new(args.endpoint.clone()) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Cannot set up the HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Culturomics Explorer",
        options,
        Box::new(move |_cc| {
            let state = AppState::new(&args, Box::new(source));
            Ok(Box::new(ExplorerApp::new(state)))
        }),
    )
}

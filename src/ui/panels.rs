use eframe::egui::{self, Color32, Key, RichText, ScrollArea, Ui};

use crate::corpus::{self, CORPORA};
use crate::state::AppState;

/// Shown under the query grid.
pub const INSTRUCTIONS: &str = "Default corpus is the 2012 corpus for English books published in the US (eng_us_2012).\n\
    Use parentheses for scaled data, as in (petrichor*100), or for plotting the difference in frequencies, as in (past-future).\n\
    Apostrophes, commas, and other special characters aren't searchable. Searches are case sensitive.";

const ABOUT: &str = "Plots ngrams against background timespans (e.g. US presidential terms) \
    to give context to trends in word frequency, for the years 1900-2008.\n\n\
    Background timespans are read from a tab-separated file (Files → Timespan File…). \
    Every ngram fetched is appended to a tab-separated log (Files → Ngram Log…).\n\n\
    Wildcard searches of the Google ngram viewer are not supported.";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Files", |ui: &mut Ui| {
            if ui.button("Timespan File…").clicked() {
                open_timespan_dialog(state);
                ui.close_menu();
            }
            if ui.button("Ngram Log…").clicked() {
                open_log_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("Plot Settings", |ui: &mut Ui| {
            if ui.button("Reset…").clicked() {
                state.open_settings();
                ui.close_menu();
            }
        });

        ui.menu_button("Help", |ui: &mut Ui| {
            if ui.button("About").clicked() {
                state.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.settings.to_string());

        ui.separator();
        match state.log.path() {
            Some(path) => ui.label(format!("log: {}", path.display())),
            None => ui.label("log: none"),
        };
    });
}

// ---------------------------------------------------------------------------
// Query panel
// ---------------------------------------------------------------------------

/// Render the ngram entries, corpus lists, background list and plot button.
pub fn query_panel(ui: &mut Ui, state: &mut AppState) {
    let mut plot_requested = false;

    ui.horizontal_top(|ui: &mut Ui| {
        for (i, slot) in state.slots.iter_mut().enumerate() {
            ui.vertical(|ui: &mut Ui| {
                ui.set_width(130.0);
                let entry = ui.add(
                    egui::TextEdit::singleline(&mut slot.text)
                        .hint_text(format!("ngram {}", i + 1))
                        .desired_width(125.0),
                );
                if entry.lost_focus() && ui.input(|inp| inp.key_pressed(Key::Enter)) {
                    plot_requested = true;
                }

                ScrollArea::vertical()
                    .id_salt(("corpus_list", i))
                    .max_height(120.0)
                    .show(ui, |ui: &mut Ui| {
                        for (index, corpus) in CORPORA.iter().enumerate() {
                            let selected = slot.corpus == Some(index);
                            if ui.selectable_label(selected, corpus.name).clicked() {
                                slot.corpus = if selected { None } else { Some(index) };
                            }
                        }
                    });
                ui.small(corpus::by_index(slot.corpus).id);
            });
        }

        ui.separator();

        ui.vertical(|ui: &mut Ui| {
            ui.strong("background plot");
            ScrollArea::vertical()
                .id_salt("background_list")
                .max_height(120.0)
                .show(ui, |ui: &mut Ui| {
                    if ui.selectable_label(state.background.is_none(), "none").clicked() {
                        state.background = None;
                    }
                    for (index, ts) in state.timespans.iter().enumerate() {
                        let text = if ts.is_valid() {
                            RichText::new(&ts.name)
                        } else {
                            RichText::new(&ts.name).italics().weak()
                        };
                        if ui
                            .selectable_label(state.background == Some(index), text)
                            .clicked()
                        {
                            state.background = Some(index);
                        }
                    }
                });
            ui.add_space(8.0);
            if ui.button("plot ngrams").clicked() {
                plot_requested = true;
            }
        });
    });

    if plot_requested {
        state.plot_ngrams();
    }
}

// ---------------------------------------------------------------------------
// Status area
// ---------------------------------------------------------------------------

pub fn status_panel(ui: &mut Ui, state: &AppState) {
    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).color(Color32::RED));
    }
    for msg in &state.entry_messages {
        ui.label(msg);
    }
    ui.separator();
    ui.small(INSTRUCTIONS);
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// "Plot Settings → Reset…" window.
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(form) = state.settings_form.as_mut() else {
        return;
    };

    let mut open = true;
    let mut apply = false;
    egui::Window::new("Plot settings")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label("for a default value,\nleave entry blank");
            let submitted = egui::Grid::new("settings_grid")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("start year\n(default 1900)");
                    let start =
                        ui.add(egui::TextEdit::singleline(&mut form.start_year).desired_width(48.0));
                    ui.end_row();

                    ui.label("end year\n(default 2008)");
                    let end =
                        ui.add(egui::TextEdit::singleline(&mut form.end_year).desired_width(48.0));
                    ui.end_row();

                    ui.label("smoothing\n(default 5)");
                    let smoothing =
                        ui.add(egui::TextEdit::singleline(&mut form.smoothing).desired_width(36.0));
                    ui.end_row();

                    // Enter only counts when it left one of these fields
                    [start, end, smoothing].iter().any(|r| r.lost_focus())
                        && ui.input(|inp| inp.key_pressed(Key::Enter))
                })
                .inner;
            if ui.button("set values").clicked() || submitted {
                apply = true;
            }
        });

    if apply {
        state.apply_settings();
    } else if !open {
        state.settings_form = None;
    }
}

pub fn about_window(ctx: &egui::Context, state: &mut AppState) {
    egui::Window::new("About Culturomics Explorer")
        .open(&mut state.show_about)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label(ABOUT);
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_timespan_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open timespan file")
        .add_filter("Tab-separated", &["tsv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.set_timespan_path(path);
    }
}

/// A cancelled dialog leaves the session without a log.
pub fn open_log_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Choose ngram log")
        .add_filter("Tab-separated", &["tsv", "txt"])
        .save_file();

    state.set_log_path(file);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Args;
    use crate::ngram::{FetchError, NgramQuery, NgramSource};
    use clap::Parser;

    struct NoData;

    impl NgramSource for NoData {
        fn fetch(&self, _query: &NgramQuery) -> Result<Option<Vec<f64>>, FetchError> {
            Ok(None)
        }
    }

    fn press_enter(ctx: &egui::Context, state: &mut AppState) {
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| settings_window(ctx, state));
    }

    #[test]
    fn enter_elsewhere_does_not_apply_settings() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::parse_from([
            "culturomics-explorer",
            "--timespans",
            dir.path().join("missing.tsv").to_str().unwrap(),
            "--log",
            dir.path().join("ngrams_data.tsv").to_str().unwrap(),
        ]);
        let mut state = AppState::new(&args, Box::new(NoData));
        state.open_settings();
        if let Some(form) = state.settings_form.as_mut() {
            form.start_year = "1950".into();
        }

        let ctx = egui::Context::default();
        press_enter(&ctx, &mut state);

        assert!(state.settings_form.is_some());
        assert_eq!(state.settings.start_year, 1900);
    }
}

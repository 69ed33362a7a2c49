use eframe::egui::{self, Color32, Stroke, Ui, Vec2b};
use egui_plot::{
    Corner, HLine, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoint, PlotPoints, PlotUi,
    Polygon, Text, VLine,
};

use crate::chart::Chart;
use crate::state::AppState;
use crate::timespan::{Fill, Mark};

/// Height of the timespan label strip under the chart.
const STRIP_HEIGHT: f32 = 90.0;

// ---------------------------------------------------------------------------
// Ngram chart (central panel)
// ---------------------------------------------------------------------------

/// Render the last chart, with its timespan strip when a background is set.
pub fn ngram_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(chart) = &state.chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Enter ngrams and press \"plot ngrams\"");
        });
        return;
    };
    let reset = std::mem::take(&mut state.reset_view);

    ui.vertical_centered(|ui: &mut Ui| ui.heading(&chart.title));

    let main_height = match chart.strip {
        Some(_) => (ui.available_height() - STRIP_HEIGHT).max(100.0),
        None => ui.available_height(),
    };

    Plot::new("ngram_plot")
        .height(main_height)
        .legend(Legend::default().position(Corner::RightTop))
        .y_axis_label("% of ngrams")
        .link_axis("ngram_years", Vec2b::new(true, false))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if reset {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [chart.x_range.0, chart.y_range.0],
                    [chart.x_range.1, chart.y_range.1],
                ));
            }

            draw_marks(plot_ui, &chart.background, chart.y_range);
            for entry in &chart.legend {
                // Zero-width swatch carrying only the legend entry.
                let x = chart.x_range.0;
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(vec![[x, 0.0], [x, 0.0], [x, 0.0]]))
                        .name(&entry.label)
                        .fill_color(entry.color)
                        .stroke(fill_stroke(entry.color, entry.fill)),
                );
            }

            if chart.zero_line {
                plot_ui.hline(
                    HLine::new(0.0)
                        .color(Color32::from_black_alpha(128))
                        .width(0.5),
                );
            }

            for series in &chart.series {
                plot_ui.line(
                    Line::new(PlotPoints::new(series.points.clone()))
                        .name(&series.label)
                        .color(series.color)
                        .width(2.0),
                );
            }
        });

    if let Some(ticks) = &chart.strip {
        timespan_strip(ui, chart, ticks, reset);
    }
}

/// Thin band under the chart repeating the timespan with era labels.
fn timespan_strip(ui: &mut Ui, chart: &Chart, ticks: &[(f64, String)], reset: bool) {
    Plot::new("timespan_strip")
        .height(STRIP_HEIGHT)
        .show_y(false)
        .show_axes([false, false])
        .show_grid(false)
        .link_axis("ngram_years", Vec2b::new(true, false))
        .allow_drag(Vec2b::new(true, false))
        .allow_zoom(Vec2b::new(true, false))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            if reset {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [chart.x_range.0, -1.0],
                    [chart.x_range.1, 1.0],
                ));
            }
            draw_marks(plot_ui, &chart.background, (0.0, 1.0));
            for (i, (year, label)) in ticks.iter().enumerate() {
                // Alternate rows keep neighbouring labels readable.
                let y = if i % 2 == 0 { -0.3 } else { -0.7 };
                plot_ui.text(
                    Text::new(PlotPoint::new(*year, y), label.as_str())
                        .color(ui_text_color())
                        .anchor(egui::Align2::CENTER_CENTER),
                );
            }
        });
}

fn ui_text_color() -> Color32 {
    Color32::from_gray(60)
}

// ---------------------------------------------------------------------------
// Background marks
// ---------------------------------------------------------------------------

fn fill_stroke(color: Color32, fill: Fill) -> Stroke {
    match fill {
        Fill::Solid => Stroke::NONE,
        Fill::Hatched => Stroke::new(1.5, color.to_opaque().gamma_multiply(0.6)),
    }
}

/// Draw spans over `y0..y1` and single years as vertical lines.
fn draw_marks(plot_ui: &mut PlotUi, marks: &[Mark], (y0, y1): (f64, f64)) {
    for mark in marks {
        match *mark {
            Mark::Span {
                start,
                end,
                color,
                fill,
            } => {
                let outline = PlotPoints::new(vec![[start, y0], [end, y0], [end, y1], [start, y1]]);
                let polygon = match fill {
                    Fill::Solid => Polygon::new(outline).fill_color(color).stroke(Stroke::NONE),
                    Fill::Hatched => Polygon::new(outline)
                        .fill_color(Color32::TRANSPARENT)
                        .stroke(fill_stroke(color, fill))
                        .style(LineStyle::dotted_dense()),
                };
                plot_ui.polygon(polygon);
            }
            Mark::Year { year, color } => {
                plot_ui.vline(VLine::new(year).color(color).width(2.0));
            }
        }
    }
}

use eframe::egui::Color32;

use crate::color;
use crate::config::{PlotSettings, Year, FIRST_YEAR, LAST_YEAR};
use crate::ngram::Ngram;
use crate::timespan::{Fill, LegendEntry, Mark, Timespan};

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// One ngram line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw one "plot ngrams" result, independent of egui.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub series: Vec<Series>,
    /// Shapes behind the lines (timespan eras or the plain grid).
    pub background: Vec<Mark>,
    pub legend: Vec<LegendEntry>,
    /// Present when a timespan is selected: era labels for the strip below.
    pub strip: Option<Vec<(f64, String)>>,
    /// Draw a horizontal line at zero (some values are negative).
    pub zero_line: bool,
}

impl Chart {
    pub fn build(ngrams: &[&Ngram], timespan: Option<&Timespan>, settings: &PlotSettings) -> Self {
        let (min, max) = y_bounds(ngrams, settings.start_year, settings.end_year);

        let series = ngrams
            .iter()
            .enumerate()
            .map(|(i, ngram)| Series {
                label: ngram.label.clone(),
                color: color::series_color(i),
                points: ngram
                    .points()
                    .map(|(year, value)| [year as f64, value])
                    .collect(),
            })
            .collect();

        let (title, background, legend, strip) = match timespan {
            Some(ts) => (
                format!("Ngrams and {}", ts.name),
                ts.marks(),
                ts.legend(),
                Some(ts.tick_labels()),
            ),
            None => (
                format!("Ngrams {}-{}", settings.start_year, settings.end_year),
                plain_grid(),
                Vec::new(),
                None,
            ),
        };

        Self {
            title,
            x_range: (settings.start_year as f64, settings.end_year as f64),
            y_range: (min, max),
            series,
            background,
            legend,
            strip,
            zero_line: min < 0.0,
        }
    }
}

/// Grey wash over the data range with white lines every five years.
fn plain_grid() -> Vec<Mark> {
    let mut marks = vec![Mark::Span {
        start: FIRST_YEAR as f64,
        end: LAST_YEAR as f64,
        color: color::with_alpha(color::named("grey"), 0.2),
        fill: Fill::Solid,
    }];
    marks.extend((FIRST_YEAR..LAST_YEAR).step_by(5).map(|year| Mark::Year {
        year: year as f64,
        color: color::with_alpha(Color32::WHITE, 0.7),
    }));
    marks
}

/// Vertical extent of the visible window with a 10% margin.
///
/// The lower bound stays at zero unless some value is negative.
pub fn y_bounds(ngrams: &[&Ngram], start: Year, end: Year) -> (f64, f64) {
    let mut max = 0.0_f64;
    let mut min = 0.0_f64;
    for ngram in ngrams {
        for value in ngram.window(start, end) {
            max = max.max(value);
            min = min.min(value);
        }
    }

    let margin = if min.abs() > max.abs() {
        min.abs() / 10.0
    } else {
        max / 10.0
    };
    max += margin;
    if min != 0.0 {
        min -= margin;
    }
    if max <= min {
        max = min + 1.0;
    }
    (min, max)
}

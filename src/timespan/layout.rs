use eframe::egui::Color32;

use crate::color::{self, TIMESPAN_COLORS};
use crate::config::{Year, FIRST_YEAR, LAST_YEAR};

use super::{Era, Timespan};

/// Opacity of shaded spans.
pub const SPAN_ALPHA: f32 = 0.2;

/// Opacity of single-year lines.
pub const YEAR_LINE_ALPHA: f32 = 0.4;

/// Spans summing to at least this many years are drawn as full coverage.
pub const FULL_COVERAGE_YEARS: Year = (LAST_YEAR - FIRST_YEAR) - 10;

// ---------------------------------------------------------------------------
// Annotation shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    /// Second stage of a staged era.
    Hatched,
}

/// Something drawn behind the ngram lines. Colours already carry their opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    Span {
        start: f64,
        end: f64,
        color: Color32,
        fill: Fill,
    },
    Year {
        year: f64,
        color: Color32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color32,
    pub fill: Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Eras tile (nearly) the whole plotted range: alternate two colours.
    Full,
    /// Sparse eras: one colour, single years as lines.
    Intermittent,
}

fn span(start: Year, end: Year, color: Color32, fill: Fill) -> Mark {
    Mark::Span {
        start: start as f64,
        end: end as f64,
        color: color::with_alpha(color, SPAN_ALPHA),
        fill,
    }
}

/// Solid over the whole era, hatched over its second stage.
fn staged(era: &Era, color: Color32, marks: &mut Vec<Mark>) {
    marks.push(span(era.start, era.end, color, Fill::Solid));
    if let Some(stage_break) = era.stage_break {
        marks.push(span(stage_break, era.end, color, Fill::Hatched));
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

impl Timespan {
    /// Total years spanned by all eras. Widened so any `Year` pair fits.
    pub fn covered_years(&self) -> i64 {
        self.eras
            .iter()
            .map(|era| i64::from(era.end) - i64::from(era.start))
            .sum()
    }

    pub fn coverage(&self) -> Coverage {
        if self.covered_years() >= i64::from(FULL_COVERAGE_YEARS) {
            Coverage::Full
        } else {
            Coverage::Intermittent
        }
    }

    fn primary_color(&self) -> Color32 {
        color::named(TIMESPAN_COLORS[0])
    }

    /// Background shapes, in drawing order.
    pub fn marks(&self) -> Vec<Mark> {
        let mut marks = Vec::new();
        if !self.is_valid() {
            return marks;
        }
        let staged_span = self.is_staged();

        match self.coverage() {
            Coverage::Full => {
                let colors = TIMESPAN_COLORS.map(color::named);
                for (era, color) in self.eras.iter().zip(colors.iter().cycle()) {
                    if staged_span {
                        staged(era, *color, &mut marks);
                    } else {
                        marks.push(span(era.start, era.end, *color, Fill::Solid));
                    }
                }
            }
            Coverage::Intermittent => {
                let color = self.primary_color();
                for era in &self.eras {
                    if staged_span {
                        staged(era, color, &mut marks);
                    } else if era.start == era.end {
                        marks.push(Mark::Year {
                            year: era.start as f64,
                            color: color::with_alpha(color, YEAR_LINE_ALPHA),
                        });
                    } else {
                        marks.push(span(era.start, era.end, color, Fill::Solid));
                    }
                }
            }
        }
        marks
    }

    /// Legend entries for the two stages, named after the header columns.
    pub fn legend(&self) -> Vec<LegendEntry> {
        if !self.is_valid() || !self.is_staged() {
            return Vec::new();
        }
        let color = color::with_alpha(self.primary_color(), SPAN_ALPHA);
        vec![
            LegendEntry {
                label: self.columns[0].clone(),
                color,
                fill: Fill::Solid,
            },
            LegendEntry {
                label: self.columns[1].clone(),
                color,
                fill: Fill::Hatched,
            },
        ]
    }

    /// Era labels placed at their midpoints.
    ///
    /// Neighbours closer than a year are pushed half a year apart each.
    pub fn tick_labels(&self) -> Vec<(f64, String)> {
        let mut ticks: Vec<(f64, String)> = self
            .eras
            .iter()
            .map(|era| ((era.start as f64 + era.end as f64) / 2.0, era.label.clone()))
            .collect();
        for i in 1..ticks.len() {
            if ticks[i].0 - ticks[i - 1].0 <= 1.0 {
                ticks[i].0 += 0.5;
                ticks[i - 1].0 -= 0.5;
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn era(label: &str, start: Year, end: Year) -> Era {
        Era {
            label: label.into(),
            start,
            stage_break: None,
            end,
        }
    }

    fn timespan(eras: Vec<Era>) -> Timespan {
        Timespan {
            name: "test".into(),
            columns: vec!["from".into(), "to".into()],
            eras,
        }
    }

    fn span_colors(marks: &[Mark]) -> Vec<Color32> {
        marks
            .iter()
            .map(|m| match m {
                Mark::Span { color, .. } | Mark::Year { color, .. } => *color,
            })
            .collect()
    }

    #[test]
    fn full_coverage_alternates_colors() {
        let ts = timespan(vec![
            era("a", 1900, 1940),
            era("b", 1940, 1970),
            era("c", 1970, 2000),
        ]);
        assert_eq!(ts.covered_years(), 100);
        assert_eq!(ts.coverage(), Coverage::Full);

        let red = color::with_alpha(color::named("red"), SPAN_ALPHA);
        let orange = color::with_alpha(color::named("orange"), SPAN_ALPHA);
        assert_eq!(span_colors(&ts.marks()), vec![red, orange, red]);
    }

    #[test]
    fn coverage_threshold() {
        assert_eq!(timespan(vec![era("a", 1900, 1998)]).coverage(), Coverage::Full);
        assert_eq!(
            timespan(vec![era("a", 1900, 1997)]).coverage(),
            Coverage::Intermittent
        );
    }

    #[test]
    fn intermittent_single_years_are_lines() {
        let ts = timespan(vec![era("crash", 1929, 1929), era("war", 1941, 1945)]);
        let marks = ts.marks();
        assert_eq!(marks.len(), 2);
        assert!(matches!(marks[0], Mark::Year { year, .. } if year == 1929.0));
        assert!(matches!(
            marks[1],
            Mark::Span { start, end, fill: Fill::Solid, .. } if start == 1941.0 && end == 1945.0
        ));
    }

    #[test]
    fn staged_eras_have_a_hatched_second_stage() {
        let ts = Timespan {
            name: "Wars".into(),
            columns: vec!["start".into(), "US involvement".into(), "end".into()],
            eras: vec![Era {
                label: "WWI".into(),
                start: 1914,
                stage_break: Some(1917),
                end: 1918,
            }],
        };
        let marks = ts.marks();
        assert_eq!(marks.len(), 2);
        assert!(matches!(
            marks[1],
            Mark::Span { start, fill: Fill::Hatched, .. } if start == 1917.0
        ));

        let legend = ts.legend();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].label, "start");
        assert_eq!(legend[1].label, "US involvement");
        assert_eq!(legend[1].fill, Fill::Hatched);
    }

    #[test]
    fn invalid_timespans_draw_nothing() {
        let ts = Timespan {
            name: "odd".into(),
            columns: vec![],
            eras: vec![],
        };
        assert!(ts.marks().is_empty());
        assert!(ts.legend().is_empty());
    }

    #[test]
    fn close_labels_are_spread() {
        let ts = timespan(vec![
            era("a", 1900, 1910),
            era("b", 1905, 1906),
            era("c", 1950, 1960),
        ]);
        let ticks = ts.tick_labels();
        assert_eq!(ticks[0].0, 1904.5);
        assert_eq!(ticks[1].0, 1906.0);
        assert_eq!(ticks[2].0, 1955.0);
        assert_eq!(ticks[1].1, "b");
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        let (ts, errors) = crate::timespan::parse("T\tfrom\tto\nX\t-2000000000\t2000000000\n");
        assert!(errors.is_empty());
        assert_eq!(ts[0].covered_years(), 4_000_000_000);
        assert_eq!(ts[0].coverage(), Coverage::Full);
        assert_eq!(ts[0].tick_labels()[0].0, 0.0);

        let far = timespan(vec![era("far", 2_000_000_000, 2_000_000_000)]);
        assert_eq!(far.tick_labels()[0].0, 2_000_000_000.0);
        assert_eq!(far.coverage(), Coverage::Intermittent);
    }
}

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Year range and defaults
// ---------------------------------------------------------------------------

/// Calendar year.
pub type Year = i32;

/// First year for which ngram data is requested and plotted.
pub const FIRST_YEAR: Year = 1900;

/// Last year with available ngram data.
pub const LAST_YEAR: Year = 2008;

pub const DEFAULT_SMOOTHING: u32 = 5;

pub const DEFAULT_TIMESPAN_FILE: &str = "timespan_data.tsv";
pub const DEFAULT_LOG_FILE: &str = "ngrams_data.tsv";
pub const DEFAULT_ENDPOINT: &str = "http://books.google.com/ngrams/graph";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Plot Google Books ngrams against background timespans
/// (e.g. US presidential terms).
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Tab-separated file with the background timespans
    #[arg(short, long, default_value = DEFAULT_TIMESPAN_FILE)]
    pub timespans: PathBuf,

    /// Tab-separated log receiving every ngram fetched this session
    #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
    pub log: PathBuf,

    /// Ngram viewer endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// First plotted year
    #[arg(long, default_value_t = FIRST_YEAR)]
    pub start_year: Year,

    /// Last plotted year
    #[arg(long, default_value_t = LAST_YEAR)]
    pub end_year: Year,

    /// Smoothing window requested from the ngram viewer
    #[arg(short, long, default_value_t = DEFAULT_SMOOTHING)]
    pub smoothing: u32,
}

impl Args {
    pub fn plot_settings(&self) -> PlotSettings {
        PlotSettings::new(self.start_year, self.end_year, self.smoothing)
    }
}

// ---------------------------------------------------------------------------
// Plot settings
// ---------------------------------------------------------------------------

/// Visible year window and smoothing of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSettings {
    pub start_year: Year,
    pub end_year: Year,
    pub smoothing: u32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            start_year: FIRST_YEAR,
            end_year: LAST_YEAR,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl PlotSettings {
    /// Reversed years are swapped, then both are clamped to the data range.
    pub fn new(start_year: Year, end_year: Year, smoothing: u32) -> Self {
        let (start, end) = if start_year > end_year {
            (end_year, start_year)
        } else {
            (start_year, end_year)
        };
        Self {
            start_year: start.clamp(FIRST_YEAR, LAST_YEAR),
            end_year: end.clamp(FIRST_YEAR, LAST_YEAR),
            smoothing,
        }
    }
}

impl std::fmt::Display for PlotSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start year: {}, end year: {}, smoothing: {}",
            self.start_year, self.end_year, self.smoothing
        )
    }
}

// ---------------------------------------------------------------------------
// Settings form (Plot Settings → Reset…)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("'{value}' is not a valid {field}")]
    Invalid { field: &'static str, value: String },
}

/// Raw text of the settings window. A blank field means "use the default".
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub start_year: String,
    pub end_year: String,
    pub smoothing: String,
}

impl SettingsForm {
    pub fn apply(&self) -> Result<PlotSettings, SettingsError> {
        let defaults = PlotSettings::default();
        let start = parse_field(&self.start_year, "start year", defaults.start_year)?;
        let end = parse_field(&self.end_year, "end year", defaults.end_year)?;
        let smoothing = parse_field(&self.smoothing, "smoothing", defaults.smoothing)?;
        Ok(PlotSettings::new(start, end, smoothing))
    }
}

fn parse_field<T: std::str::FromStr>(
    text: &str,
    field: &'static str,
    default: T,
) -> Result<T, SettingsError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(default);
    }
    text.parse().map_err(|_| SettingsError::Invalid {
        field,
        value: text.to_string(),
    })
}

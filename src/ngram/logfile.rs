use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Ngram;

// ---------------------------------------------------------------------------
// Tab-separated ngram log
// ---------------------------------------------------------------------------

/// Append-only record of every ngram fetched from the network.
///
/// Row layout: `term \t corpus \t smoothing \t label \t [v1, v2, ...]`.
#[derive(Debug, Clone, Default)]
pub struct NgramLog {
    path: Option<PathBuf>,
}

impl NgramLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    /// Append one row. Without a log file this is a no-op.
    pub fn append(&self, ngram: &Ngram) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening ngram log {}", path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record([
                ngram.query.term.as_str(),
                ngram.query.corpus.id,
                ngram.query.smoothing.to_string().as_str(),
                ngram.label.as_str(),
                format_values(&ngram.values).as_str(),
            ])
            .context("writing ngram log row")?;
        writer.flush().context("flushing ngram log")?;
        Ok(())
    }
}

/// Values as a bracketed list, e.g. `[0.5, 1e-07, 2.0]`.
fn format_values(values: &[f64]) -> String {
    let joined = values
        .iter()
        .map(|&v| format_value(v))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

/// Shortest round-trip form with a signed, two-digit exponent (`1e-07`, `1.5e+20`).
fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = format!("{value:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{FIRST_YEAR, LAST_YEAR};

use super::NgramQuery;

// ---------------------------------------------------------------------------
// Source abstraction
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to the ngram viewer failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed ngram data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything able to answer an ngram query with yearly frequencies.
///
/// `Ok(None)` means the service knows nothing about the query. The returned
/// series always starts at [`FIRST_YEAR`].
pub trait NgramSource {
    fn fetch(&self, query: &NgramQuery) -> Result<Option<Vec<f64>>, FetchError>;
}

// ---------------------------------------------------------------------------
// Google Books ngram viewer
// ---------------------------------------------------------------------------

/// Scrapes the Google Books ngram viewer graph page.
pub struct GoogleBooks {
    client: reqwest::blocking::Client,
    endpoint: String,
    data_pattern: Regex,
}

impl GoogleBooks {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            client: reqwest::blocking::Client::builder().build()?,
            endpoint: endpoint.into(),
            data_pattern: data_pattern(),
        })
    }
}

impl NgramSource for GoogleBooks {
    fn fetch(&self, query: &NgramQuery) -> Result<Option<Vec<f64>>, FetchError> {
        let year_start = FIRST_YEAR.to_string();
        let year_end = LAST_YEAR.to_string();
        let corpus = query.corpus.code.to_string();
        let smoothing = query.smoothing.to_string();

        log::debug!("Fetching {:?} from {} ({})", query.term, self.endpoint, query.corpus);
        let html = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("content", query.term.as_str()),
                ("year_start", year_start.as_str()),
                ("year_end", year_end.as_str()),
                ("corpus", corpus.as_str()),
                ("smoothing", smoothing.as_str()),
                ("share", ""),
            ])
            .send()?
            .error_for_status()?
            .text()?;

        scrape_timeseries(&self.data_pattern, &html)
    }
}

// ---------------------------------------------------------------------------
// HTML scraping
// ---------------------------------------------------------------------------

/// Matches the first JSON object of the `var data = [...]` script variable.
fn data_pattern() -> Regex {
    Regex::new(r"var data = \[(.*?\})\]").expect("static regex")
}

#[derive(Deserialize)]
struct DataRecord {
    timeseries: Vec<f64>,
}

/// Extract the `timeseries` of the page's first data record.
///
/// Pages without a data record, and series with fewer than two points, are
/// "no data".
pub fn scrape_timeseries(pattern: &Regex, html: &str) -> Result<Option<Vec<f64>>, FetchError> {
    let Some(captures) = pattern.captures(html) else {
        return Ok(None);
    };
    let record: DataRecord = serde_json::from_str(&captures[1])?;
    if record.timeseries.len() < 2 {
        return Ok(None);
    }
    Ok(Some(record.timeseries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapes_first_record() {
        let html = r#"<script>
            var data = [{"ngram": "war", "type": "NGRAM", "timeseries": [0.5, 0.25, 1e-05], "parent": ""}];
            if (data.length > 0) { ngrams.drawD3Chart(data, 1900, 2008); }
        </script>"#;
        let series = scrape_timeseries(&data_pattern(), html).unwrap();
        assert_eq!(series, Some(vec![0.5, 0.25, 1e-5]));
    }

    #[test]
    fn empty_data_is_no_data() {
        let html = "<script>var data = [];</script>";
        assert!(scrape_timeseries(&data_pattern(), html).unwrap().is_none());

        let html = r#"var data = [{"ngram": "x", "timeseries": [0.0]}];"#;
        assert!(scrape_timeseries(&data_pattern(), html).unwrap().is_none());
    }

    #[test]
    fn broken_json_is_an_error() {
        let html = r#"var data = [{"ngram": "x", "timeseries": [0.1, oops]}];"#;
        assert!(matches!(
            scrape_timeseries(&data_pattern(), html),
            Err(FetchError::Json(_))
        ));
    }
}

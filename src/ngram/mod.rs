/// Ngram layer: queries, the session cache, fetching and logging.
///
/// Architecture:
/// ```text
///   NgramQuery (term, corpus, smoothing)
///        │
///        ▼
///   ┌───────────┐   hit
///   │   cache    │ ─────────► Ngram
///   └───────────┘
///        │ miss
///        ▼
///   ┌───────────┐
///   │   fetch    │  HTTP GET → scrape `var data = [...]`
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  logfile   │  append TSV row
///   └───────────┘
/// ```

pub mod fetch;
pub mod logfile;

use std::collections::HashMap;

use crate::config::Year;
use crate::corpus::Corpus;

pub use fetch::{FetchError, GoogleBooks, NgramSource};
pub use logfile::NgramLog;

// ---------------------------------------------------------------------------
// NgramQuery / Ngram
// ---------------------------------------------------------------------------

/// One search: the cache key of the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NgramQuery {
    pub term: String,
    pub corpus: &'static Corpus,
    pub smoothing: u32,
}

/// A fetched ngram: the query, its legend label and one value per year.
#[derive(Debug, Clone, PartialEq)]
pub struct Ngram {
    pub query: NgramQuery,
    pub label: String,
    /// Frequencies starting at `first_year`.
    pub values: Vec<f64>,
    pub first_year: Year,
}

impl Ngram {
    /// `(year, value)` pairs of the whole series.
    pub fn points(&self) -> impl Iterator<Item = (Year, f64)> + '_ {
        (self.first_year..).zip(self.values.iter().copied())
    }

    /// Values whose year lies in `start..=end`.
    pub fn window(&self, start: Year, end: Year) -> impl Iterator<Item = f64> + '_ {
        self.points()
            .filter(move |&(year, _)| year >= start && year <= end)
            .map(|(_, value)| value)
    }
}

// ---------------------------------------------------------------------------
// Session cache
// ---------------------------------------------------------------------------

/// Ngrams fetched during this session; never evicted.
#[derive(Debug, Default)]
pub struct NgramCache {
    entries: HashMap<NgramQuery, Ngram>,
}

impl NgramCache {
    pub fn get(&self, query: &NgramQuery) -> Option<&Ngram> {
        self.entries.get(query)
    }

    pub fn insert(&mut self, ngram: Ngram) {
        self.entries.insert(ngram.query.clone(), ngram);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

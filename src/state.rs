use std::path::PathBuf;

use crate::chart::Chart;
use crate::config::{Args, PlotSettings, SettingsForm, FIRST_YEAR};
use crate::corpus;
use crate::ngram::{Ngram, NgramCache, NgramLog, NgramQuery, NgramSource};
use crate::query;
use crate::timespan::{self, Timespan};

/// Number of ngram entry fields.
pub const ENTRY_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Query slots
// ---------------------------------------------------------------------------

/// One ngram entry field and its corpus list selection.
#[derive(Debug, Clone, Default)]
pub struct QuerySlot {
    pub text: String,
    /// Index into [`corpus::CORPORA`]; `None` means the default corpus.
    pub corpus: Option<usize>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub slots: [QuerySlot; ENTRY_COUNT],

    /// Timespans read from `timespan_path`.
    pub timespans: Vec<Timespan>,
    pub timespan_path: Option<PathBuf>,

    /// Selected background timespan (None = no background).
    pub background: Option<usize>,

    pub log: NgramLog,
    pub settings: PlotSettings,

    /// Open "Plot Settings" window, if any.
    pub settings_form: Option<SettingsForm>,

    pub cache: NgramCache,

    /// Result of the last successful plot.
    pub chart: Option<Chart>,

    /// Set when the chart changed and the plot view must be reset to it.
    pub reset_view: bool,

    /// Outcome of the last plot ("no data found for …").
    pub status_message: Option<String>,

    /// One line per character removed from the entries.
    pub entry_messages: Vec<String>,

    pub show_about: bool,

    source: Box<dyn NgramSource>,
}

impl AppState {
    pub fn new(args: &Args, source: Box<dyn NgramSource>) -> Self {
        let mut state = Self {
            slots: Default::default(),
            timespans: Vec::new(),
            timespan_path: Some(args.timespans.clone()),
            background: None,
            log: NgramLog::new(Some(args.log.clone())),
            settings: args.plot_settings(),
            settings_form: None,
            cache: NgramCache::default(),
            chart: None,
            reset_view: false,
            status_message: None,
            entry_messages: Vec::new(),
            show_about: false,
            source,
        };
        state.reload_timespans();
        state
    }

    /// Re-read the timespan file; failures leave only "none" to choose.
    pub fn reload_timespans(&mut self) {
        self.background = None;
        self.timespans = match &self.timespan_path {
            Some(path) => match timespan::load(path) {
                Ok(timespans) => {
                    log::info!("Loaded {} timespans from {}", timespans.len(), path.display());
                    timespans
                }
                Err(e) => {
                    log::warn!("No background timespans: {e:#}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
    }

    /// Switch to another timespan file and reload it.
    pub fn set_timespan_path(&mut self, path: PathBuf) {
        self.timespan_path = Some(path);
        self.reload_timespans();
    }

    pub fn set_log_path(&mut self, path: Option<PathBuf>) {
        log::info!("Ngram log set to {path:?}");
        self.log.set_path(path);
    }

    /// Start editing the plot settings from a blank form.
    pub fn open_settings(&mut self) {
        self.settings_form = Some(SettingsForm::default());
    }

    /// Apply the settings form. Bad input keeps the window open.
    pub fn apply_settings(&mut self) {
        let Some(form) = &self.settings_form else {
            return;
        };
        match form.apply() {
            Ok(settings) => {
                log::info!("Plot settings: {settings}");
                self.settings = settings;
                self.settings_form = None;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn background_timespan(&self) -> Option<&Timespan> {
        self.background.and_then(|i| self.timespans.get(i))
    }

    /// Collect, sanitize and look up every entered ngram, then build the chart.
    pub fn plot_ngrams(&mut self) {
        self.status_message = None;
        self.entry_messages.clear();

        let mut queries = Vec::new();
        for slot in &self.slots {
            if slot.text.is_empty() {
                continue;
            }
            let (term, removed) = query::sanitize(&slot.text);
            self.entry_messages.extend(
                removed
                    .iter()
                    .map(|&c| query::removal_message(c, &slot.text)),
            );
            if term.is_empty() {
                continue;
            }
            queries.push(NgramQuery {
                term,
                corpus: corpus::by_index(slot.corpus),
                smoothing: self.settings.smoothing,
            });
        }

        if queries.is_empty() {
            self.status_message = Some("nothing entered to search".to_string());
            return;
        }

        let mut found = Vec::new();
        let mut not_found = Vec::new();
        for q in queries {
            if self.lookup(&q) {
                found.push(q);
            } else {
                not_found.push(format!("'{}' in {}", q.term, q.corpus.id));
            }
        }

        if !found.is_empty() {
            let ngrams: Vec<&Ngram> = found.iter().filter_map(|q| self.cache.get(q)).collect();
            let chart = Chart::build(&ngrams, self.background_timespan(), &self.settings);
            self.chart = Some(chart);
            self.reset_view = true;
        }
        if !not_found.is_empty() {
            self.status_message = Some(format!("no data found for {}", not_found.join(", ")));
        }
    }

    /// Make sure `query` is cached, fetching and logging it on a miss.
    /// Returns whether data is available.
    fn lookup(&mut self, query: &NgramQuery) -> bool {
        if self.cache.get(query).is_some() {
            return true;
        }
        let values = match self.source.fetch(query) {
            Ok(Some(values)) => values,
            Ok(None) => {
                log::info!("No ngram data for {:?} in {}", query.term, query.corpus.id);
                return false;
            }
            Err(e) => {
                log::error!("Failed to fetch {:?}: {e}", query.term);
                return false;
            }
        };

        let ngram = Ngram {
            label: query::plot_label(&query.term, query.corpus),
            query: query.clone(),
            values,
            first_year: FIRST_YEAR,
        };
        if let Err(e) = self.log.append(&ngram) {
            log::warn!("Ngram not logged: {e:#}");
        }
        self.cache.insert(ngram);
        log::debug!("{} ngrams cached", self.cache.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::FetchError;
    use clap::Parser;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Answers every term except "nothing"; records each fetch.
    struct StubSource {
        calls: Rc<RefCell<Vec<NgramQuery>>>,
    }

    impl NgramSource for StubSource {
        fn fetch(&self, query: &NgramQuery) -> Result<Option<Vec<f64>>, FetchError> {
            self.calls.borrow_mut().push(query.clone());
            if query.term == "nothing" {
                return Ok(None);
            }
            Ok(Some(vec![1.0, 2.0, -0.5]))
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        log_path: PathBuf,
        calls: Rc<RefCell<Vec<NgramQuery>>>,
        state: AppState,
    }

    fn fixture(timespans: Option<&str>) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let ts_path = dir.path().join("timespan_data.tsv");
        if let Some(text) = timespans {
            std::fs::write(&ts_path, text).unwrap();
        }
        let log_path = dir.path().join("ngrams_data.tsv");
        let args = Args::parse_from([
            "culturomics-explorer",
            "--timespans",
            ts_path.to_str().unwrap(),
            "--log",
            log_path.to_str().unwrap(),
        ]);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let state = AppState::new(
            &args,
            Box::new(StubSource {
                calls: calls.clone(),
            }),
        );
        Fixture {
            _dir: dir,
            log_path,
            calls,
            state,
        }
    }

    #[test]
    fn nothing_entered() {
        let mut f = fixture(None);
        f.state.plot_ngrams();
        assert_eq!(f.state.status_message.as_deref(), Some("nothing entered to search"));
        assert!(f.state.chart.is_none());
    }

    #[test]
    fn missing_timespan_file_still_plots() {
        let mut f = fixture(None);
        assert!(f.state.timespans.is_empty());
        f.state.slots[0].text = "war".into();
        f.state.plot_ngrams();

        let chart = f.state.chart.as_ref().unwrap();
        assert_eq!(chart.title, "Ngrams 1900-2008");
        assert_eq!(chart.series[0].label, "'war'(US)");
        assert!(f.state.status_message.is_none());
        assert!(f.state.reset_view);
    }

    #[test]
    fn cached_queries_are_not_fetched_again() {
        let mut f = fixture(None);
        f.state.slots[0].text = "war".into();
        f.state.plot_ngrams();
        f.state.plot_ngrams();
        assert_eq!(f.calls.borrow().len(), 1);

        // Different smoothing is a different query.
        f.state.settings.smoothing = 0;
        f.state.plot_ngrams();
        assert_eq!(f.calls.borrow().len(), 2);

        let logged = std::fs::read_to_string(&f.log_path).unwrap();
        assert_eq!(logged.lines().count(), 2);
        assert!(logged.starts_with("war\teng_us_2012\t5\t'war'(US)\t[1.0, 2.0, -0.5]"));
    }

    #[test]
    fn missing_data_is_reported() {
        let mut f = fixture(None);
        f.state.slots[0].text = "war".into();
        f.state.slots[2].text = "nothing".into();
        f.state.slots[2].corpus = Some(1);
        f.state.plot_ngrams();

        assert_eq!(
            f.state.status_message.as_deref(),
            Some("no data found for 'nothing' in eng_gb_2012")
        );
        assert_eq!(f.state.chart.as_ref().unwrap().series.len(), 1);
    }

    #[test]
    fn removed_characters_are_reported() {
        let mut f = fixture(None);
        f.state.slots[0].text = "war, peace".into();
        f.state.slots[1].text = "...".into();
        f.state.plot_ngrams();

        assert_eq!(f.state.entry_messages.len(), 4);
        assert_eq!(f.calls.borrow().len(), 1);
        assert_eq!(f.calls.borrow()[0].term, "war peace");
    }

    #[test]
    fn background_timespan_is_used() {
        let mut f = fixture(Some("Wars\tstart\tend\nWWI\t1914\t1918\n"));
        assert_eq!(f.state.timespans.len(), 1);
        f.state.background = Some(0);
        f.state.slots[0].text = "war".into();
        f.state.plot_ngrams();

        let chart = f.state.chart.as_ref().unwrap();
        assert_eq!(chart.title, "Ngrams and Wars");
        assert!(chart.strip.is_some());
    }

    #[test]
    fn changing_timespan_file_resets_background() {
        let mut f = fixture(Some("Wars\tstart\tend\nWWI\t1914\t1918\n"));
        f.state.background = Some(0);

        let other = f._dir.path().join("presidents.tsv");
        std::fs::write(
            &other,
            "Presidents\tfrom\tto\nTaft\t1909\t1913\n\nDecades\tfrom\tto\n1920s\t1920\t1929\n",
        )
        .unwrap();
        f.state.set_timespan_path(other.clone());

        assert!(f.state.background.is_none());
        assert_eq!(f.state.timespan_path.as_deref(), Some(other.as_path()));
        let names: Vec<&str> = f.state.timespans.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Presidents", "Decades"]);
    }

    #[test]
    fn malformed_timespan_file_still_plots() {
        let mut f = fixture(Some("Broken\tfrom\tto\nX\tnope\t1910\n"));
        assert!(f.state.timespans.is_empty());
        assert!(f.state.background_timespan().is_none());

        f.state.slots[0].text = "war".into();
        f.state.plot_ngrams();

        let chart = f.state.chart.as_ref().unwrap();
        assert_eq!(chart.title, "Ngrams 1900-2008");
        assert!(chart.strip.is_none());
    }

    #[test]
    fn settings_form_applies_or_reports() {
        let mut f = fixture(None);
        f.state.open_settings();
        f.state.settings_form.as_mut().unwrap().start_year = "1950".into();
        f.state.apply_settings();
        assert!(f.state.settings_form.is_none());
        assert_eq!(f.state.settings.start_year, 1950);

        f.state.open_settings();
        f.state.settings_form.as_mut().unwrap().end_year = "soon".into();
        f.state.apply_settings();
        assert!(f.state.settings_form.is_some());
        assert!(f.state.status_message.is_some());
    }
}

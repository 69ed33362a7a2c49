//! Google Books ngram corpora offered in the corpus lists

/// A searchable text collection of the ngram viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corpus {
    /// Name shown in the corpus lists
    pub name: &'static str,

    /// Corpus identifier, e.g. "eng_us_2012"
    pub id: &'static str,

    /// Numeric code expected by the ngram viewer endpoint
    pub code: u32,

    /// Suffix appended to plot labels, e.g. "(US)"
    pub tag: &'static str,
}

impl std::fmt::Display for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}, '{}', '{}'", self.id, self.code, self.name, self.tag)
    }
}

/// Supported corpora, in the order shown to the user
pub const CORPORA: [Corpus; 11] = [
    Corpus { name: "American", id: "eng_us_2012", code: 17, tag: "(US)" },
    Corpus { name: "British", id: "eng_gb_2012", code: 18, tag: "(GB)" },
    Corpus { name: "English", id: "eng_2012", code: 15, tag: "(Eng)" },
    Corpus { name: "Fiction", id: "eng_fiction_2012", code: 16, tag: "(Fiction)" },
    Corpus { name: "German", id: "ger_2012", code: 20, tag: "(Ger)" },
    Corpus { name: "French", id: "fre_2012", code: 19, tag: "(Fre)" },
    Corpus { name: "Spanish", id: "spa_2012", code: 21, tag: "(Spa)" },
    Corpus { name: "Italian", id: "ita_2012", code: 22, tag: "(Ita)" },
    Corpus { name: "Hebrew", id: "heb_2012", code: 24, tag: "(Heb)" },
    Corpus { name: "Russian", id: "rus_2012", code: 25, tag: "(Rus)" },
    Corpus { name: "Chinese", id: "chi_2012", code: 23, tag: "(Chi)" },
];

/// Corpus used when none is selected (US English 2012)
pub fn default_corpus() -> &'static Corpus {
    &CORPORA[0]
}

/// Find a corpus from its identifier
#[cfg(test)]
pub fn by_id(id: &str) -> Option<&'static Corpus> {
    CORPORA.iter().find(|corpus| corpus.id == id)
}

/// Corpus at a list position, falling back to the default corpus
pub fn by_index(index: Option<usize>) -> &'static Corpus {
    index
        .and_then(|i| CORPORA.get(i))
        .unwrap_or_else(default_corpus)
}

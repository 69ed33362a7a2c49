use std::sync::OnceLock;

use regex::Regex;

use crate::corpus::Corpus;

// ---------------------------------------------------------------------------
// Query sanitizing
// ---------------------------------------------------------------------------

/// Characters the ngram viewer cannot search for.
const NOT_SEARCHABLE: [char; 9] = [',', '\'', '"', ':', ';', '[', ']', '<', '>'];

/// Operators only allowed inside a parenthesised query such as `(women-men)`.
const OPERATORS: [char; 3] = ['+', '*', '.'];

fn repeated_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(" {2,}").expect("static regex"))
}

/// Strip characters the endpoint cannot search.
///
/// Returns the cleaned term and every removed character, in input order.
pub fn sanitize(term: &str) -> (String, Vec<char>) {
    let compound = term.starts_with('(');
    let mut removed = Vec::new();
    let kept: String = term
        .chars()
        .filter(|c| {
            let drop = NOT_SEARCHABLE.contains(c) || (!compound && OPERATORS.contains(c));
            if drop {
                removed.push(*c);
            }
            !drop
        })
        .collect();

    let cleaned = repeated_spaces()
        .replace_all(kept.trim_matches(' '), " ")
        .into_owned();
    (cleaned, removed)
}

/// User-facing notice for one removed character.
pub fn removal_message(character: char, raw: &str) -> String {
    format!("The character '{character}' is not searchable and was removed from '{raw}'")
}

// ---------------------------------------------------------------------------
// Legend label
// ---------------------------------------------------------------------------

/// Legend label of a term, e.g. `'women-men'(US)`.
pub fn plot_label(term: &str, corpus: &Corpus) -> String {
    let bare = if term.starts_with('(') {
        term.trim_matches(|c| c == '(' || c == ')')
    } else {
        term
    };
    format!("'{bare}'{}", corpus.tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus;

    #[test]
    fn plain_terms_lose_operators() {
        let (term, removed) = sanitize("  petrichor*100.  ");
        assert_eq!(term, "petrichor100");
        assert_eq!(removed, vec!['*', '.']);
    }

    #[test]
    fn compound_terms_keep_operators() {
        let (term, removed) = sanitize("(Chagall+Marc  Chagall,)");
        assert_eq!(term, "(Chagall+Marc Chagall)");
        assert_eq!(removed, vec![',']);
    }

    #[test]
    fn quotes_and_brackets_are_removed() {
        let (term, removed) = sanitize("\"don't\"   [stop]");
        assert_eq!(term, "dont stop");
        assert_eq!(removed, vec!['"', '\'', '"', '[', ']']);
    }

    #[test]
    fn only_spaces_are_trimmed() {
        let (term, removed) = sanitize("\tword ");
        assert_eq!(term, "\tword");
        assert!(removed.is_empty());
    }

    #[test]
    fn message() {
        assert_eq!(
            removal_message(';', "a;b"),
            "The character ';' is not searchable and was removed from 'a;b'"
        );
    }

    #[test]
    fn labels() {
        let us = corpus::default_corpus();
        let gb = corpus::by_id("eng_gb_2012").unwrap();
        assert_eq!(plot_label("(women-men)", us), "'women-men'(US)");
        assert_eq!(plot_label("petrichor", gb), "'petrichor'(GB)");
        assert_eq!(plot_label("word (x)", us), "'word (x)'(US)");
    }
}

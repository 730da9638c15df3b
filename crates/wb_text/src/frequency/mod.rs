use std::collections::{HashMap, HashSet};
use std::fmt;

use wb_core::WordFrequency;

mod stopwords;

pub use stopwords::STOP_WORDS;

/// Default number of entries returned by [`WordFrequencyAnalyzer::analyze`].
pub const DEFAULT_MAX_WORDS: usize = 100;

/// Tokens of this many characters or fewer are ignored.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Ranks the words of a text by how often they appear.
///
/// Text is lowercased and stripped of ASCII punctuation before being split on
/// whitespace. Stop words and very short tokens are dropped. Ties keep the
/// order in which the words were first seen, so the output is deterministic.
#[derive(Clone)]
pub struct WordFrequencyAnalyzer {
    stop_words: HashSet<String>,
}

impl fmt::Debug for WordFrequencyAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordFrequencyAnalyzer")
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

impl Default for WordFrequencyAnalyzer {
    fn default() -> Self {
        Self::with_stop_words(STOP_WORDS.iter().copied())
    }
}

impl WordFrequencyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an analyzer with a custom stop-word list.
    ///
    /// Entries go through the same punctuation stripping as the analyzed
    /// text, so `"you're"` filters the token `"youre"`. Comparing the raw
    /// entries instead would let contraction tokens such as `youre` and
    /// `thatll` through, since the text loses its apostrophes first; this
    /// analyzer filters them.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|w| strip_punctuation(&w.as_ref().to_lowercase()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { stop_words }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn analyze(&self, text: &str, max_words: usize) -> Vec<WordFrequency> {
        let text = strip_punctuation(&text.to_lowercase());

        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for token in text.split_whitespace() {
            if token.chars().count() <= MIN_TOKEN_CHARS || self.is_stop_word(token) {
                continue;
            }
            match index.get(token) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token, counts.len());
                    counts.push((token, 1));
                }
            }
        }

        // stable, so equal counts stay in first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(max_words);

        counts
            .into_iter()
            .map(|(text, value)| WordFrequency::new(text, value))
            .collect()
    }

    pub fn analyze_default(&self, text: &str) -> Vec<WordFrequency> {
        self.analyze(text, DEFAULT_MAX_WORDS)
    }
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

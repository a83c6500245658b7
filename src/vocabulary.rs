//! Vocabulary index built from a transient corpus.
//!
//! The vocabulary is the dictionary the query corrector fuzzy-matches against:
//! every lowercase alphabetic word (two or more letters) found in the corpus,
//! minus stop words. Each [`VocabularyIndex::build`] call replaces the
//! previous contents entirely, so words from an earlier corpus never leak
//! into a later search.

use ahash::AHashSet;
use log::debug;

use crate::analysis::token_filter::{Filter, StopFilter};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};

/// Set of normalized words derived from a corpus.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    words: AHashSet<String>,
    tokenizer: RegexTokenizer,
    stop_filter: StopFilter,
}

impl VocabularyIndex {
    /// Create an empty index that drops the given stop words while building.
    pub fn new(stop_filter: StopFilter) -> Self {
        VocabularyIndex {
            words: AHashSet::new(),
            tokenizer: RegexTokenizer::index_words(),
            stop_filter,
        }
    }

    /// Clear the index and repopulate it from `corpus`.
    ///
    /// Building twice from the same corpus yields the same index. Empty,
    /// numeric or symbol-only documents contribute nothing.
    pub fn build<S: AsRef<str>>(&mut self, corpus: &[S]) {
        self.words.clear();

        for text in corpus {
            let lowered = text.as_ref().to_lowercase();
            let tokens = self.stop_filter.filter(self.tokenizer.tokenize(&lowered));
            self.words.extend(tokens.map(|token| token.text));
        }

        debug!(
            "Built vocabulary of {} words from {} documents",
            self.words.len(),
            corpus.len()
        );
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the index holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check if `word` (already lowercase) is in the index.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterate the words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// All words in alphabetical order.
    pub fn sorted_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.iter().collect();
        words.sort_unstable();
        words
    }

    /// The stop filter applied while building.
    pub fn stop_filter(&self) -> &StopFilter {
        &self.stop_filter
    }
}

impl Default for VocabularyIndex {
    fn default() -> Self {
        Self::new(StopFilter::new())
    }
}

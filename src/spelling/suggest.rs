//! Statistical spelling suggestions.
//!
//! [`SuggestionEngine`] is a frequency-dictionary corrector in the classic
//! edit-candidate style: a known word is kept, otherwise the most frequent
//! known word one edit away wins, then two edits away, otherwise the word is
//! returned unchanged.
//!
//! One-edit candidates are generated; two-edit candidates are found by
//! scanning the dictionary with a bounded distance instead, since the
//! second edit set grows with the square of the word length.

use std::collections::HashSet;

use crate::error::Result;
use crate::fuzzy::distance::osa_distance_within;
use crate::spelling::dictionary::{BuiltinDictionary, SpellingDictionary};

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// The baseline spelling correction capability.
///
/// Implementations may fail; the query corrector treats an error or an empty
/// suggestion as "no correction" and keeps the original token.
pub trait SpellCorrect: Send + Sync {
    /// Return the most likely intended spelling of a lowercase word.
    fn correct(&self, word: &str) -> Result<String>;
}

/// Configuration for spelling suggestion generation.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Maximum edit distance to consider (1 or 2).
    pub max_distance: usize,
    /// Minimum frequency for a dictionary word to be suggested.
    pub min_frequency: u32,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_distance: 2,
            min_frequency: 1,
        }
    }
}

/// Frequency-based spelling corrector.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    dictionary: SpellingDictionary,
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create a new suggestion engine with the given dictionary.
    pub fn new(dictionary: SpellingDictionary) -> Self {
        SuggestionEngine {
            dictionary,
            config: SuggestionConfig::default(),
        }
    }

    /// Create a new suggestion engine with custom configuration.
    pub fn with_config(dictionary: SpellingDictionary, config: SuggestionConfig) -> Self {
        SuggestionEngine { dictionary, config }
    }

    /// Get the underlying dictionary.
    pub fn dictionary(&self) -> &SpellingDictionary {
        &self.dictionary
    }

    /// Best correction for `word`, or `None` when no known word is close enough.
    pub fn suggest(&self, word: &str) -> Option<String> {
        let word = word.to_lowercase();

        if self.is_known(&word) {
            return Some(word);
        }

        let first_edits = Self::generate_edits(&word);
        if let Some(best) = self.most_frequent(first_edits.iter()) {
            return Some(best);
        }

        if self.config.max_distance >= 2 {
            return self.most_frequent(self.within_two_edits(&word));
        }

        None
    }

    /// Dictionary words at most two edits from `word`.
    fn within_two_edits<'a>(&'a self, word: &str) -> impl Iterator<Item = &'a String> {
        let chars: Vec<char> = word.chars().collect();
        self.dictionary.words().filter(move |candidate| {
            if candidate.chars().count().abs_diff(chars.len()) > 2 {
                return false;
            }
            let candidate: Vec<char> = candidate.chars().collect();
            osa_distance_within(&chars, &candidate, 2).is_some()
        })
    }

    fn is_known(&self, word: &str) -> bool {
        self.dictionary.frequency(word) >= self.config.min_frequency.max(1)
    }

    /// Most frequent known candidate; ties go to the alphabetically first word.
    fn most_frequent<'a, I>(&self, candidates: I) -> Option<String>
    where
        I: Iterator<Item = &'a String>,
    {
        candidates
            .filter(|candidate| self.is_known(candidate))
            .map(|candidate| (self.dictionary.frequency(candidate), candidate))
            .max_by(|(freq_a, word_a), (freq_b, word_b)| {
                freq_a.cmp(freq_b).then_with(|| word_b.cmp(word_a))
            })
            .map(|(_, word)| word.clone())
    }

    /// Generate all words one edit away: deletions, transpositions,
    /// replacements and insertions over `a..z`.
    fn generate_edits(word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();

        // Deletions
        for i in 0..len {
            let mut new_word = chars.clone();
            new_word.remove(i);
            edits.insert(new_word.into_iter().collect());
        }

        // Transpositions
        for i in 0..len.saturating_sub(1) {
            let mut new_word = chars.clone();
            new_word.swap(i, i + 1);
            edits.insert(new_word.into_iter().collect());
        }

        // Replacements
        for i in 0..len {
            for ch in ALPHABET.chars() {
                if ch != chars[i] {
                    let mut new_word = chars.clone();
                    new_word[i] = ch;
                    edits.insert(new_word.into_iter().collect());
                }
            }
        }

        // Insertions
        for i in 0..=len {
            for ch in ALPHABET.chars() {
                let mut new_word = chars.clone();
                new_word.insert(i, ch);
                edits.insert(new_word.into_iter().collect());
            }
        }

        edits
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(BuiltinDictionary::english())
    }
}

impl SpellCorrect for SuggestionEngine {
    /// Words containing non-alphabetic characters are returned unchanged.
    fn correct(&self, word: &str) -> Result<String> {
        if word.is_empty() || !word.chars().all(char::is_alphabetic) {
            return Ok(word.to_string());
        }
        Ok(self.suggest(word).unwrap_or_else(|| word.to_lowercase()))
    }
}

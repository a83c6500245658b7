//! Query correction with vocabulary preference.
//!
//! [`QueryCorrector`] rewrites a raw query token by token. Stop words and
//! short tokens pass through untouched, everything else goes through the
//! statistical spelling corrector and is then snapped to the closest corpus
//! word when that word is similar enough. The query is tokenized once and
//! each token span is replaced in place, so separators survive as typed.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::case::CasePattern;
use crate::analysis::token::Token;
use crate::analysis::token_filter::StopFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::{Result, SpellsiftError};
use crate::fuzzy::similarity::{IndelSimilarity, Similarity};
use crate::spelling::suggest::{SpellCorrect, SuggestionEngine};
use crate::vocabulary::VocabularyIndex;

/// Configuration for the query corrector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// A vocabulary word replaces the baseline only when its similarity
    /// is strictly greater than this value (0-100).
    pub vocabulary_threshold: f64,
    /// Tokens of at most this many characters are never corrected.
    pub protected_length: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            vocabulary_threshold: 85.0,
            protected_length: 3,
        }
    }
}

impl CorrectorConfig {
    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.vocabulary_threshold) {
            return Err(SpellsiftError::invalid_config(format!(
                "vocabulary_threshold must be within 0-100, got {}",
                self.vocabulary_threshold
            )));
        }
        Ok(())
    }
}

/// Why a token ended up with its final form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionSource {
    /// Token is a stop word.
    StopWord,
    /// Token is too short to correct.
    Protected,
    /// Correction produced the same word.
    Unchanged,
    /// The spelling corrector's suggestion was used.
    Speller,
    /// A vocabulary word was close enough to win.
    Vocabulary,
    /// The spelling corrector failed or returned nothing.
    Fallback,
}

/// The outcome for a single query token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCorrection {
    pub original: String,
    pub corrected: String,
    pub source: CorrectionSource,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl TokenCorrection {
    /// Check if the token was rewritten.
    pub fn is_changed(&self) -> bool {
        self.original != self.corrected
    }
}

/// A corrected query along with the per-token decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCorrection {
    pub original: String,
    pub corrected: String,
    pub tokens: Vec<TokenCorrection>,
}

impl QueryCorrection {
    /// Tokens whose text differs from the input.
    pub fn changed_tokens(&self) -> impl Iterator<Item = &TokenCorrection> {
        self.tokens.iter().filter(|token| token.is_changed())
    }

    /// Check if any token was rewritten.
    pub fn is_changed(&self) -> bool {
        self.tokens.iter().any(TokenCorrection::is_changed)
    }
}

/// Corrects queries against a spelling corrector and a corpus vocabulary.
pub struct QueryCorrector {
    tokenizer: RegexTokenizer,
    stop_filter: StopFilter,
    speller: Arc<dyn SpellCorrect>,
    similarity: Arc<dyn Similarity>,
    config: CorrectorConfig,
}

impl QueryCorrector {
    /// Create a corrector with the built-in English speller and indel similarity.
    pub fn new(stop_filter: StopFilter, config: CorrectorConfig) -> Self {
        QueryCorrector {
            tokenizer: RegexTokenizer::query_words(),
            stop_filter,
            speller: Arc::new(SuggestionEngine::default()),
            similarity: Arc::new(IndelSimilarity),
            config,
        }
    }

    /// Replace the spelling corrector.
    pub fn with_speller(mut self, speller: Arc<dyn SpellCorrect>) -> Self {
        self.speller = speller;
        self
    }

    /// Replace the similarity used for vocabulary matching.
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    pub fn stop_filter(&self) -> &StopFilter {
        &self.stop_filter
    }

    /// Correct a query and return only the rewritten text.
    pub fn correct(&self, query: &str, vocabulary: &VocabularyIndex) -> String {
        self.correct_detailed(query, vocabulary).corrected
    }

    /// Correct a query, keeping the decision made for every token.
    ///
    /// A query without word tokens corrects to the empty string.
    pub fn correct_detailed(&self, query: &str, vocabulary: &VocabularyIndex) -> QueryCorrection {
        let tokens: Vec<TokenCorrection> = self
            .tokenizer
            .tokens(query)
            .into_iter()
            .map(|token| self.correct_token(&token, vocabulary))
            .collect();

        let corrected = if tokens.is_empty() {
            String::new()
        } else {
            let mut rebuilt = String::with_capacity(query.len());
            let mut cursor = 0;
            for token in &tokens {
                rebuilt.push_str(&query[cursor..token.start_offset]);
                rebuilt.push_str(&token.corrected);
                cursor = token.end_offset;
            }
            rebuilt.push_str(&query[cursor..]);
            rebuilt.trim().to_string()
        };

        QueryCorrection {
            original: query.to_string(),
            corrected,
            tokens,
        }
    }

    fn correct_token(&self, token: &Token, vocabulary: &VocabularyIndex) -> TokenCorrection {
        let original = token.text.as_str();
        let lowered = original.to_lowercase();

        let (corrected, source) = if self.stop_filter.is_stop_word(&lowered) {
            (original.to_string(), CorrectionSource::StopWord)
        } else if token.char_len() <= self.config.protected_length {
            (original.to_string(), CorrectionSource::Protected)
        } else {
            self.correct_word(original, &lowered, vocabulary)
        };

        TokenCorrection {
            original: original.to_string(),
            corrected,
            source,
            start_offset: token.start_offset,
            end_offset: token.end_offset,
        }
    }

    fn correct_word(
        &self,
        original: &str,
        lowered: &str,
        vocabulary: &VocabularyIndex,
    ) -> (String, CorrectionSource) {
        let (baseline, mut source) = match self.speller.correct(lowered) {
            Ok(suggestion) if !suggestion.is_empty() => (suggestion, CorrectionSource::Speller),
            Ok(_) => {
                debug!("Speller returned nothing for {original:?}, keeping token");
                (lowered.to_string(), CorrectionSource::Fallback)
            }
            Err(e) => {
                debug!("Speller failed for {original:?}, keeping token: {e}");
                (lowered.to_string(), CorrectionSource::Fallback)
            }
        };

        let mut word = baseline;
        if let Some((entry, score)) = self.best_vocabulary_match(&word, vocabulary)
            && score > self.config.vocabulary_threshold
        {
            debug!("Vocabulary match {entry:?} ({score:.2}) for {original:?}");
            word = entry.to_string();
            source = CorrectionSource::Vocabulary;
        }

        if word == lowered {
            if source != CorrectionSource::Fallback {
                source = CorrectionSource::Unchanged;
            }
            return (original.to_string(), source);
        }

        if source == CorrectionSource::Speller {
            debug!("Speller corrected {original:?} to {word:?}");
        }
        (CasePattern::detect(original).apply(&word), source)
    }

    /// Most similar vocabulary word; ties go to the lexicographically smallest.
    fn best_vocabulary_match<'a>(
        &self,
        word: &str,
        vocabulary: &'a VocabularyIndex,
    ) -> Option<(&'a str, f64)> {
        vocabulary
            .iter()
            .map(|entry| (entry, self.similarity.ratio(word, entry)))
            .max_by(|(entry_a, score_a), (entry_b, score_b)| {
                score_a
                    .total_cmp(score_b)
                    .then_with(|| entry_b.cmp(entry_a))
            })
    }
}

impl Default for QueryCorrector {
    fn default() -> Self {
        Self::new(StopFilter::new(), CorrectorConfig::default())
    }
}

impl fmt::Debug for QueryCorrector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCorrector")
            .field("stop_words", &self.stop_filter.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSpeller;

    impl SpellCorrect for FailingSpeller {
        fn correct(&self, _word: &str) -> Result<String> {
            Err(anyhow::anyhow!("speller offline").into())
        }
    }

    struct EmptySpeller;

    impl SpellCorrect for EmptySpeller {
        fn correct(&self, _word: &str) -> Result<String> {
            Ok(String::new())
        }
    }

    /// Scores every pair the same.
    struct FlatSimilarity(f64);

    impl Similarity for FlatSimilarity {
        fn ratio(&self, _a: &str, _b: &str) -> f64 {
            self.0
        }

        fn partial_ratio(&self, _a: &str, _b: &str) -> f64 {
            self.0
        }

        fn token_set_ratio(&self, _a: &str, _b: &str) -> f64 {
            self.0
        }
    }

    fn vocabulary(corpus: &[&str]) -> VocabularyIndex {
        let mut index = VocabularyIndex::default();
        index.build(corpus);
        index
    }

    #[test]
    fn test_vocabulary_preference_restores_case() {
        let corrector = QueryCorrector::default();
        let vocab = vocabulary(&["The Avengers (2019) 1080p"]);

        assert_eq!(corrector.correct("avengrs", &vocab), "avengers");
        assert_eq!(corrector.correct("Avangers", &vocab), "Avengers");
        assert_eq!(corrector.correct("AVANGERS", &vocab), "AVENGERS");
    }

    #[test]
    fn test_stop_words_are_never_rewritten() {
        let corrector = QueryCorrector::default();
        let vocab = vocabulary(&["Theater listings", "Movies tonight"]);

        assert_eq!(corrector.correct("The MOVIE", &vocab), "The MOVIE");
        assert_eq!(corrector.correct("download", &vocab), "download");
    }

    #[test]
    fn test_short_tokens_pass_through() {
        let corrector = QueryCorrector::default();
        let vocab = vocabulary(&["KGF Chapter 2 Kannada", "Leon the professional"]);

        assert_eq!(corrector.correct("kgf", &vocab), "kgf");
        assert_eq!(corrector.correct("KGF leo", &vocab), "KGF leo");
    }

    #[test]
    fn test_separators_are_preserved() {
        let corrector = QueryCorrector::default();
        let vocab = vocabulary(&["The Avengers (2019) 1080p"]);

        assert_eq!(
            corrector.correct("  avangers, 2019!  ", &vocab),
            "avengers, 2019!"
        );
    }

    #[test]
    fn test_query_without_words_is_empty() {
        let corrector = QueryCorrector::default();
        let vocab = vocabulary(&["Avatar"]);

        assert_eq!(corrector.correct("", &vocab), "");
        assert_eq!(corrector.correct("   ", &vocab), "");
        assert_eq!(corrector.correct("?!  --", &vocab), "");
    }

    #[test]
    fn test_empty_vocabulary_uses_speller_only() {
        let corrector = QueryCorrector::default();
        let vocab = VocabularyIndex::default();

        assert_eq!(corrector.correct("wrold serach", &vocab), "world search");
        assert_eq!(corrector.correct("Wrold", &vocab), "World");
    }

    #[test]
    fn test_failing_speller_keeps_token() {
        let corrector = QueryCorrector::default().with_speller(Arc::new(FailingSpeller));
        let empty = VocabularyIndex::default();

        let result = corrector.correct_detailed("Avangers", &empty);
        assert_eq!(result.corrected, "Avangers");
        assert_eq!(result.tokens[0].source, CorrectionSource::Fallback);

        // the vocabulary still applies to the original token
        let vocab = vocabulary(&["The Avengers"]);
        assert_eq!(corrector.correct("Avangers", &vocab), "Avengers");
    }

    #[test]
    fn test_empty_suggestion_keeps_token() {
        let corrector = QueryCorrector::default().with_speller(Arc::new(EmptySpeller));
        let vocab = VocabularyIndex::default();
        assert_eq!(corrector.correct("Wrold", &vocab), "Wrold");
    }

    #[test]
    fn test_vocabulary_threshold_is_strict() {
        let vocab = vocabulary(&["zebra"]);

        let at_threshold = QueryCorrector::default()
            .with_speller(Arc::new(FailingSpeller))
            .with_similarity(Arc::new(FlatSimilarity(85.0)));
        assert_eq!(at_threshold.correct("quokka", &vocab), "quokka");

        let above = QueryCorrector::default()
            .with_speller(Arc::new(FailingSpeller))
            .with_similarity(Arc::new(FlatSimilarity(85.01)));
        assert_eq!(above.correct("quokka", &vocab), "zebra");
    }

    #[test]
    fn test_vocabulary_ties_pick_smallest_entry() {
        let vocab = vocabulary(&["mango kiwi apple banana"]);
        let corrector = QueryCorrector::default()
            .with_speller(Arc::new(FailingSpeller))
            .with_similarity(Arc::new(FlatSimilarity(99.0)));

        for _ in 0..5 {
            assert_eq!(corrector.correct("grape", &vocab), "apple");
        }
    }

    #[test]
    fn test_detailed_reports_sources() {
        let corrector = QueryCorrector::default();
        let vocab = vocabulary(&["The Avengers (2019) 1080p"]);

        let result = corrector.correct_detailed("the avengrs kgf search", &vocab);
        let sources: Vec<CorrectionSource> = result.tokens.iter().map(|t| t.source).collect();
        assert_eq!(
            sources,
            vec![
                CorrectionSource::StopWord,
                CorrectionSource::Vocabulary,
                CorrectionSource::Protected,
                CorrectionSource::Unchanged,
            ]
        );
        assert!(result.is_changed());
        assert_eq!(result.changed_tokens().count(), 1);
        assert_eq!(result.corrected, "the avengers kgf search");
    }

    #[test]
    fn test_unchanged_mixed_case_token_is_kept_verbatim() {
        let corrector = QueryCorrector::default();
        let vocab = VocabularyIndex::default();
        assert_eq!(corrector.correct("McDonald", &vocab), "McDonald");
    }

    #[test]
    fn test_config_validation() {
        assert!(CorrectorConfig::default().validate().is_ok());

        let config = CorrectorConfig {
            vocabulary_threshold: 101.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

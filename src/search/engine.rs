//! The auto-correcting fuzzy search engine.

use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fuzzy::similarity::Similarity;
use crate::search::config::SearchConfig;
use crate::search::ranker::{MatchRecord, Ranker};
use crate::spelling::corrector::{QueryCorrection, QueryCorrector};
use crate::spelling::suggest::SpellCorrect;
use crate::vocabulary::VocabularyIndex;

/// Corrected query and ranked matches from one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub corrected_query: String,
    pub matches: Vec<MatchRecord>,
}

impl SearchOutcome {
    /// Check if correction changed the query (ignoring surrounding whitespace).
    pub fn was_corrected(&self, original: &str) -> bool {
        self.corrected_query != original.trim()
    }

    /// The best `limit` matches.
    pub fn top(&self, limit: usize) -> &[MatchRecord] {
        &self.matches[..limit.min(self.matches.len())]
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// A search engine that owns its vocabulary index.
///
/// Each [`search`](SearchEngine::search) rebuilds the index from the corpus
/// it is given, corrects the query against it and ranks the corpus. Taking
/// `&mut self` keeps one search in flight per instance; wrap the engine in
/// a [`SharedSearchEngine`](crate::search::SharedSearchEngine) to share it
/// between tasks.
///
/// # Examples
///
/// ```
/// use spellsift::search::{MatchType, SearchEngine};
///
/// let mut engine = SearchEngine::default();
/// let corpus = ["The Avengers (2019) 1080p", "KGF Chapter 2 Kannada"];
///
/// let outcome = engine.search("avengrs", &corpus);
/// assert_eq!(outcome.corrected_query, "avengers");
/// assert_eq!(outcome.matches[0].match_type, MatchType::Exact);
/// ```
#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    vocabulary: VocabularyIndex,
    corrector: QueryCorrector,
    ranker: Ranker,
}

impl SearchEngine {
    /// Create an engine from a configuration, validating it and loading
    /// any stop word or dictionary files it names.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let stop_filter = config.build_stop_filter()?;
        let speller = config.build_speller()?;

        let corrector = QueryCorrector::new(stop_filter.clone(), config.correction.clone())
            .with_speller(Arc::new(speller));

        Ok(SearchEngine {
            vocabulary: VocabularyIndex::new(stop_filter),
            corrector,
            ranker: Ranker::new(config.ranking.clone()),
            config,
        })
    }

    /// Replace the statistical spelling corrector.
    pub fn with_speller(mut self, speller: Arc<dyn SpellCorrect>) -> Self {
        self.corrector = self.corrector.with_speller(speller);
        self
    }

    /// Replace the similarity used for vocabulary matching and ranking.
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.corrector = self.corrector.with_similarity(Arc::clone(&similarity));
        self.ranker = self.ranker.with_similarity(similarity);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The vocabulary from the most recent build.
    pub fn vocabulary(&self) -> &VocabularyIndex {
        &self.vocabulary
    }

    /// Rebuild the vocabulary index from scratch.
    pub fn build_index<S: AsRef<str>>(&mut self, corpus: &[S]) {
        self.vocabulary.build(corpus);
        info!(
            "Indexed {} documents, {} vocabulary words",
            corpus.len(),
            self.vocabulary.len()
        );
    }

    /// Correct a query against the current vocabulary.
    pub fn correct_query(&self, query: &str) -> String {
        self.corrector.correct(query, &self.vocabulary)
    }

    /// Like [`correct_query`](Self::correct_query), with per-token detail.
    pub fn correct_query_detailed(&self, query: &str) -> QueryCorrection {
        self.corrector.correct_detailed(query, &self.vocabulary)
    }

    /// Index `corpus`, correct `query` against it and rank the corpus.
    pub fn search<S>(&mut self, query: &str, corpus: &[S]) -> SearchOutcome
    where
        S: AsRef<str> + Sync,
    {
        self.build_index(corpus);

        let corrected_query = self.correct_query(query);
        let matches = self.ranker.rank(&corrected_query, corpus);

        info!(
            "Search {query:?} -> {corrected_query:?}: {} matches",
            matches.len()
        );
        SearchOutcome {
            corrected_query,
            matches,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        let config = SearchConfig::default();
        SearchEngine {
            vocabulary: VocabularyIndex::default(),
            corrector: QueryCorrector::new(Default::default(), config.correction.clone()),
            ranker: Ranker::new(config.ranking.clone()),
            config,
        }
    }
}

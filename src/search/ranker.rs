//! Composite fuzzy ranking of corpus documents.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::RegexTokenizer;
use crate::fuzzy::similarity::{IndelSimilarity, Similarity};
use crate::search::config::RankingConfig;

/// Whether a match cleared the exact threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Fuzzy,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// A document that scored above the inclusion threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The document text, as given.
    pub text: String,
    /// Composite score, 0-100, rounded to four decimals.
    ///
    /// The inclusion and exact thresholds compare this rounded value, so a
    /// raw 65.00004 rounds to 65.0 and is excluded by a 65.0 inclusion
    /// threshold, and a raw 89.99996 rounds to 90.0 and counts as exact.
    pub score: f64,
    pub match_type: MatchType,
}

impl MatchRecord {
    pub fn is_exact(&self) -> bool {
        self.match_type == MatchType::Exact
    }
}

/// Round to four decimal places so thresholds compare exactly.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

/// Order matches by descending score, exact before fuzzy on equal scores.
///
/// The sort is stable, so equal records keep their corpus order.
pub fn sort_matches(matches: &mut [MatchRecord]) {
    matches.sort_by(compare_matches);
}

fn compare_matches(a: &MatchRecord, b: &MatchRecord) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| match (a.match_type, b.match_type) {
            (MatchType::Exact, MatchType::Fuzzy) => Ordering::Less,
            (MatchType::Fuzzy, MatchType::Exact) => Ordering::Greater,
            _ => Ordering::Equal,
        })
}

/// Scores documents against a query and keeps the ones above threshold.
pub struct Ranker {
    similarity: Arc<dyn Similarity>,
    tokenizer: RegexTokenizer,
    config: RankingConfig,
}

impl Ranker {
    pub fn new(config: RankingConfig) -> Self {
        Ranker {
            similarity: Arc::new(IndelSimilarity),
            tokenizer: RegexTokenizer::query_words(),
            config,
        }
    }

    /// Replace the similarity measures.
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RankingConfig {
        &mut self.config
    }

    /// Weighted composite of the three measures for an already lowercase query.
    pub fn composite_score(&self, query: &str, document: &str) -> f64 {
        let weights = &self.config.weights;
        let token_set = self.similarity.token_set_ratio(query, document);
        let partial = self.similarity.partial_ratio(query, document);
        let ratio = self.similarity.ratio(query, document);

        let weighted =
            weights.token_set * token_set + weights.partial * partial + weights.ratio * ratio;
        round_score(weighted / weights.total())
    }

    /// Classify a score that already passed the inclusion threshold.
    pub fn classify(&self, score: f64) -> MatchType {
        if score >= self.config.exact_threshold {
            MatchType::Exact
        } else {
            MatchType::Fuzzy
        }
    }

    /// Score one document, returning a record if it qualifies.
    pub fn score_document(&self, query: &str, document: &str) -> Option<MatchRecord> {
        let score = self.composite_score(query, &document.to_lowercase());
        (score > self.config.inclusion_threshold).then(|| MatchRecord {
            text: document.to_string(),
            score,
            match_type: self.classify(score),
        })
    }

    /// Rank the whole corpus against `query`.
    ///
    /// Returns every qualifying document, best first. A query without word
    /// tokens matches nothing.
    pub fn rank<S>(&self, query: &str, corpus: &[S]) -> Vec<MatchRecord>
    where
        S: AsRef<str> + Sync,
    {
        let query = query.to_lowercase();
        if self.tokenizer.tokens(&query).is_empty() {
            return Vec::new();
        }

        let threshold = self.config.parallel_threshold;
        let mut matches: Vec<MatchRecord> = if threshold > 0 && corpus.len() >= threshold {
            corpus
                .par_iter()
                .filter_map(|doc| self.score_document(&query, doc.as_ref()))
                .collect()
        } else {
            corpus
                .iter()
                .filter_map(|doc| self.score_document(&query, doc.as_ref()))
                .collect()
        };

        sort_matches(&mut matches);
        debug!(
            "Ranked {} of {} documents for {query:?}",
            matches.len(),
            corpus.len()
        );
        matches
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}

impl fmt::Debug for Ranker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

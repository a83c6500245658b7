//! Configuration for the search engine.
//!
//! Every section has a `Default` matching the stock behavior, so a JSON
//! config file only needs the fields it changes:
//!
//! ```json
//! { "ranking": { "inclusion_threshold": 70.0 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::StopFilter;
use crate::error::{Result, SpellsiftError};
use crate::spelling::corrector::CorrectorConfig;
use crate::spelling::dictionary::{BuiltinDictionary, SpellingDictionary};
use crate::spelling::suggest::{SuggestionConfig, SuggestionEngine};

/// Top-level search configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub stop_words: StopWordConfig,
    pub spelling: SpellingConfig,
    pub correction: CorrectorConfig,
    pub ranking: RankingConfig,
}

/// Which words are treated as stop words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopWordConfig {
    /// Start from the built-in English and noise word list.
    pub use_defaults: bool,
    /// Additional stop words.
    pub extra: Vec<String>,
    /// File with one stop word per line, merged in.
    pub file: Option<PathBuf>,
}

impl Default for StopWordConfig {
    fn default() -> Self {
        StopWordConfig {
            use_defaults: true,
            extra: Vec::new(),
            file: None,
        }
    }
}

/// Statistical spelling corrector settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellingConfig {
    /// Dictionary file merged into the built-in dictionary.
    pub dictionary: Option<PathBuf>,
    /// Drop the built-in dictionary and use only `dictionary`.
    pub replace_builtin: bool,
    /// Maximum edit distance (1 or 2).
    pub max_distance: usize,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        SpellingConfig {
            dictionary: None,
            replace_builtin: false,
            max_distance: 2,
        }
    }
}

/// Ranking thresholds and composite weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Documents are kept when their score is strictly above this.
    pub inclusion_threshold: f64,
    /// Kept documents scoring at least this are exact matches.
    pub exact_threshold: f64,
    pub weights: ScoreWeights,
    /// Corpora with at least this many documents are scored in parallel.
    /// Zero keeps scoring sequential.
    pub parallel_threshold: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            inclusion_threshold: 65.0,
            exact_threshold: 90.0,
            weights: ScoreWeights::default(),
            parallel_threshold: 256,
        }
    }
}

/// Weights of the three similarity measures in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub token_set: f64,
    pub partial: f64,
    pub ratio: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            token_set: 0.5,
            partial: 0.3,
            ratio: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.token_set + self.partial + self.ratio
    }
}

fn check_percentage(name: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(SpellsiftError::invalid_config(format!(
            "{name} must be within 0-100, got {value}"
        )));
    }
    Ok(())
}

impl SearchConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject thresholds outside 0-100 and unusable weights.
    pub fn validate(&self) -> Result<()> {
        self.correction.validate()?;
        check_percentage("inclusion_threshold", self.ranking.inclusion_threshold)?;
        check_percentage("exact_threshold", self.ranking.exact_threshold)?;

        let weights = &self.ranking.weights;
        for (name, value) in [
            ("token_set", weights.token_set),
            ("partial", weights.partial),
            ("ratio", weights.ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SpellsiftError::invalid_config(format!(
                    "weight {name} must be non-negative, got {value}"
                )));
            }
        }
        if weights.total() <= 0.0 {
            return Err(SpellsiftError::invalid_config(
                "score weights must not all be zero",
            ));
        }

        if !(1..=2).contains(&self.spelling.max_distance) {
            return Err(SpellsiftError::invalid_config(format!(
                "max_distance must be 1 or 2, got {}",
                self.spelling.max_distance
            )));
        }
        if self.spelling.replace_builtin && self.spelling.dictionary.is_none() {
            return Err(SpellsiftError::invalid_config(
                "replace_builtin requires a dictionary file",
            ));
        }

        Ok(())
    }

    /// Build the stop filter described by `stop_words`.
    pub fn build_stop_filter(&self) -> Result<StopFilter> {
        let base = if self.stop_words.use_defaults {
            StopFilter::new()
        } else {
            StopFilter::empty()
        };

        let mut filter = base.extended_with(self.stop_words.extra.iter().cloned());
        if let Some(path) = &self.stop_words.file {
            let loaded = StopFilter::load_from_file(path)?;
            filter = filter.extended_with(loaded.words());
        }

        Ok(filter)
    }

    /// Build the statistical spelling corrector described by `spelling`.
    pub fn build_speller(&self) -> Result<SuggestionEngine> {
        let mut dictionary = if self.spelling.replace_builtin {
            SpellingDictionary::new()
        } else {
            BuiltinDictionary::english()
        };

        if let Some(path) = &self.spelling.dictionary {
            dictionary.merge(&SpellingDictionary::load(path)?);
        }

        let config = SuggestionConfig {
            max_distance: self.spelling.max_distance,
            ..Default::default()
        };
        Ok(SuggestionEngine::with_config(dictionary, config))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.correction.vocabulary_threshold, 85.0);
        assert_eq!(config.correction.protected_length, 3);
        assert_eq!(config.ranking.inclusion_threshold, 65.0);
        assert_eq!(config.ranking.exact_threshold, 90.0);
        assert_eq!(config.ranking.weights, ScoreWeights::default());
        assert!(config.stop_words.use_defaults);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SearchConfig::from_json_str(r#"{ "ranking": { "inclusion_threshold": 70.0 } }"#)
                .unwrap();
        assert_eq!(config.ranking.inclusion_threshold, 70.0);
        assert_eq!(config.ranking.exact_threshold, 90.0);
        assert_eq!(config.correction, CorrectorConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SearchConfig::default();
        config.stop_words.extra = vec!["bluray".to_string()];
        config.ranking.parallel_threshold = 0;

        let json = config.to_json_pretty().unwrap();
        assert_eq!(SearchConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "correction": {{ "protected_length": 4 }} }}"#).unwrap();

        let config = SearchConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.correction.protected_length, 4);

        assert!(SearchConfig::from_json_file("/nonexistent/spellsift.json").is_err());
        assert!(SearchConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SearchConfig::default();
        config.ranking.inclusion_threshold = -1.0;
        assert!(matches!(
            config.validate(),
            Err(SpellsiftError::InvalidConfig(_))
        ));

        let mut config = SearchConfig::default();
        config.ranking.exact_threshold = 100.5;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.ranking.weights.partial = -0.1;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.ranking.weights = ScoreWeights {
            token_set: 0.0,
            partial: 0.0,
            ratio: 0.0,
        };
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.spelling.max_distance = 3;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.spelling.replace_builtin = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_stop_filter() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# release tags").unwrap();
        writeln!(file, "x264").unwrap();

        let config = SearchConfig {
            stop_words: StopWordConfig {
                use_defaults: false,
                extra: vec!["BluRay".to_string()],
                file: Some(file.path().to_path_buf()),
            },
            ..Default::default()
        };

        let filter = config.build_stop_filter().unwrap();
        assert!(filter.is_stop_word("bluray"));
        assert!(filter.is_stop_word("x264"));
        assert!(!filter.is_stop_word("the"));
        assert_eq!(filter.len(), 2);

        let defaults = SearchConfig::default().build_stop_filter().unwrap();
        assert!(defaults.is_stop_word("the"));
        assert!(defaults.is_stop_word("movie"));
    }

    #[test]
    fn test_build_speller_with_dictionary_file() {
        use crate::spelling::suggest::SpellCorrect;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "kannada 500").unwrap();
        writeln!(file, "telugu 400").unwrap();

        let mut config = SearchConfig::default();
        config.spelling.dictionary = Some(file.path().to_path_buf());
        let speller = config.build_speller().unwrap();
        assert_eq!(speller.correct("kanada").unwrap(), "kannada");
        assert_eq!(speller.correct("wrold").unwrap(), "world");

        config.spelling.replace_builtin = true;
        let speller = config.build_speller().unwrap();
        assert_eq!(speller.correct("telugo").unwrap(), "telugu");
        assert_eq!(speller.correct("wrold").unwrap(), "wrold");
    }
}

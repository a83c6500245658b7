//! # Spellsift
//!
//! Spelling-corrected fuzzy search over small, transient corpora such as chat
//! messages or release titles.
//!
//! ## Features
//!
//! - Vocabulary index rebuilt from each corpus
//! - Query correction that prefers words found in the corpus
//! - Short tokens and stop words left untouched
//! - Composite fuzzy ranking with exact/fuzzy classification
//! - Async shared engine with deadlines
//!
//! ```
//! use spellsift::search::SearchEngine;
//!
//! let mut engine = SearchEngine::default();
//! let outcome = engine.search("Avangers", &["The Avengers (2019) 1080p"]);
//! assert_eq!(outcome.corrected_query, "Avengers");
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod fuzzy;
pub mod search;
pub mod spelling;
pub mod vocabulary;

pub mod prelude {
    pub use crate::error::{Result, SpellsiftError};
    pub use crate::fuzzy::Similarity;
    pub use crate::search::{
        MatchRecord, MatchType, SearchConfig, SearchEngine, SearchOutcome, SharedSearchEngine,
    };
    pub use crate::spelling::SpellCorrect;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

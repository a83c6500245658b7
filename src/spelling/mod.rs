//! Spelling correction for search queries.
//!
//! [`SuggestionEngine`] is the frequency-dictionary corrector behind the
//! [`SpellCorrect`] capability; [`QueryCorrector`] applies it token by token
//! and prefers words that actually occur in the corpus.

pub mod corrector;
pub mod dictionary;
pub mod suggest;

pub use corrector::*;
pub use dictionary::*;
pub use suggest::*;

//! Auto-correcting fuzzy search over a transient corpus.
//!
//! A search builds a vocabulary from the corpus, corrects the query against
//! it, and ranks every document with a weighted blend of three similarity
//! measures:
//!
//! - [`config`]: thresholds, weights, stop word and dictionary sources
//! - [`ranker`]: composite scoring, classification and ordering
//! - [`engine`]: [`SearchEngine`], which owns the vocabulary
//! - [`shared`]: [`SharedSearchEngine`], an async handle with deadlines

pub mod config;
pub mod engine;
pub mod ranker;
pub mod shared;

pub use self::config::*;
pub use self::engine::{SearchEngine, SearchOutcome};
pub use self::ranker::*;
pub use self::shared::SharedSearchEngine;

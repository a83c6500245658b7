//! Text analysis for Spellsift.
//!
//! Tokenizers split corpus documents and queries into word tokens, the stop
//! filter drops common and domain-noise words, and [`case::CasePattern`]
//! remembers how a query token was cased so a corrected token can be re-cased.

pub mod case;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use case::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;

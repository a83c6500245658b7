//! Regex-based tokenizer implementation.
//!
//! Two presets cover the search pipeline:
//!
//! - [`RegexTokenizer::index_words`] extracts runs of two or more alphabetic
//!   characters and feeds the vocabulary index. Digits, symbols and single
//!   letters never produce a token, so `"1080p"` contributes nothing.
//! - [`RegexTokenizer::query_words`] extracts word tokens that may contain
//!   inner apostrophes, so `"don't"` stays one token.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, SpellsiftError};

static INDEX_WORD_PATTERN: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(Regex::new(r"\b\p{Alphabetic}{2,}\b").expect("index word pattern should be valid"))
});

static QUERY_WORD_PATTERN: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(Regex::new(r"\w+(?:'\w+)*").expect("query word pattern should be valid"))
});

/// A regex-based tokenizer that extracts tokens using regular expressions.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Name reported through [`Tokenizer::name`]
    name: &'static str,
}

impl RegexTokenizer {
    /// Tokenizer for vocabulary building: alphabetic runs of length two or more.
    pub fn index_words() -> Self {
        RegexTokenizer {
            pattern: Arc::clone(&INDEX_WORD_PATTERN),
            name: "index_words",
        }
    }

    /// Tokenizer for queries: word characters with inner apostrophes.
    pub fn query_words() -> Self {
        RegexTokenizer {
            pattern: Arc::clone(&QUERY_WORD_PATTERN),
            name: "query_words",
        }
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SpellsiftError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            name: "regex",
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Tokenize into a vector; convenience over [`Tokenizer::tokenize`].
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        self.pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::query_words()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        Box::new(self.tokens(text).into_iter())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

//! Stop filter implementation.
//!
//! Stop words are excluded from the vocabulary index and are never rewritten
//! by query correction. The default set combines common English words with
//! noise words that show up in chat-style release requests ("movie", "hd",
//! "download") and carry no matching value.
//!
//! # Examples
//!
//! ```
//! use spellsift::analysis::token_filter::Filter;
//! use spellsift::analysis::token_filter::stop::StopFilter;
//! use spellsift::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("avengers", 1),
//!     Token::new("movie", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "avengers");
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use ahash::AHashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "don", "don't", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "it's", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Generic descriptors that appear in release titles and chat requests.
const DEFAULT_NOISE_WORDS: &[&str] = &[
    "movie", "movies", "film", "films", "full", "hd", "hq", "print", "download", "link", "links",
    "watch", "online", "free", "file", "files", "quality", "send", "please", "pls", "plz", "bro",
    "sir", "latest", "upload", "uploaded", "channel", "group", "join",
];

/// Default stop words (English plus domain noise) as a set.
pub static DEFAULT_STOP_WORDS_SET: LazyLock<AHashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .chain(DEFAULT_NOISE_WORDS)
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// Lookups are case-insensitive: words are stored lowercase and candidates
/// are lowercased before the check.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<AHashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_STOP_WORDS_SET.clone())
    }

    /// Create a stop filter that stops nothing.
    pub fn empty() -> Self {
        Self::with_stop_words(AHashSet::new())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: AHashSet<String>) -> Self {
        let stop_words = stop_words.into_iter().map(|w| w.to_lowercase()).collect();
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(Into::into).collect())
    }

    /// Return a filter that also stops the given words.
    pub fn extended_with<I, S>(&self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stop_words = (*self.stop_words).clone();
        stop_words.extend(words.into_iter().map(|w| w.into().to_lowercase()));
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Load stop words from a file with one word per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut words = AHashSet::new();

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && !word.starts_with('#') {
                words.insert(word.to_lowercase());
            }
        }

        Ok(Self::with_stop_words(words))
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word) || self.stop_words.contains(&word.to_lowercase())
    }

    /// Iterate the stop words in arbitrary order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.stop_words.iter().map(String::as_str)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let stop_words = Arc::clone(&self.stop_words);
        Box::new(tokens.filter(move |token| {
            !(stop_words.contains(&token.text) || stop_words.contains(&token.text.to_lowercase()))
        }))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_default_set_includes_noise_words() {
        let filter = StopFilter::new();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("movie"));
        assert!(filter.is_stop_word("Download"));
        assert!(!filter.is_stop_word("avengers"));
        assert!(!filter.is_stop_word("kannada"));
    }

    #[test]
    fn test_extended_with_keeps_defaults() {
        let filter = StopFilter::new().extended_with(["BluRay"]);
        assert!(filter.is_stop_word("bluray"));
        assert!(filter.is_stop_word("the"));
        assert_eq!(filter.len(), StopFilter::new().len() + 1);
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = StopFilter::empty();
        assert!(filter.is_empty());
        let tokens = vec![Token::new("the", 0)];
        assert_eq!(filter.filter(Box::new(tokens.into_iter())).count(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# release noise").unwrap();
        writeln!(file, "WEBRip").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  x264  ").unwrap();
        file.flush().unwrap();

        let filter = StopFilter::load_from_file(file.path()).unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stop_word("webrip"));
        assert!(filter.is_stop_word("x264"));
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}

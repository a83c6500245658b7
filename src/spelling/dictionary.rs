//! Frequency dictionaries for the statistical spelling corrector.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;

use crate::error::Result;

/// A dictionary that stores words and their frequencies for spelling correction.
#[derive(Debug, Clone, Default)]
pub struct SpellingDictionary {
    /// Words and their frequencies
    words: AHashMap<String, u32>,
}

impl SpellingDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        SpellingDictionary {
            words: AHashMap::new(),
        }
    }

    /// Add a word to the dictionary with the given frequency.
    ///
    /// An existing entry is replaced.
    pub fn add_word(&mut self, word: &str, frequency: u32) {
        self.words.insert(word.to_lowercase(), frequency);
    }

    /// Increment the frequency of a word by 1.
    pub fn increment_word(&mut self, word: &str) {
        let current = self.frequency(word);
        self.add_word(word, current.saturating_add(1));
    }

    /// Check if a word exists in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word) || self.words.contains_key(&word.to_lowercase())
    }

    /// Get the frequency of a word, 0 when unknown.
    pub fn frequency(&self, word: &str) -> u32 {
        self.words
            .get(word)
            .or_else(|| self.words.get(&word.to_lowercase()))
            .copied()
            .unwrap_or(0)
    }

    /// Get the total number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Iterate the stored (lowercase) words in arbitrary order.
    pub fn words(&self) -> impl Iterator<Item = &String> {
        self.words.keys()
    }

    /// Check if the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Load a dictionary from a text file with one word per line.
    ///
    /// Repeated lines raise the word's frequency. Lines that are not purely
    /// alphabetic are skipped.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dictionary = SpellingDictionary::new();
        let reader = BufReader::new(File::open(path)?);

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && word.chars().all(char::is_alphabetic) {
                dictionary.increment_word(word);
            }
        }

        Ok(dictionary)
    }

    /// Load a dictionary from a frequency file with format "word frequency" per line.
    pub fn load_from_frequency_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dictionary = SpellingDictionary::new();
        let reader = BufReader::new(File::open(path)?);

        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();

            if let (Some(word), Some(frequency)) = (parts.next(), parts.next())
                && let Ok(frequency) = frequency.parse::<u32>()
                && word.chars().all(char::is_alphabetic)
            {
                dictionary.add_word(word, frequency);
            }
        }

        Ok(dictionary)
    }

    /// Load either file format, detected from the first non-empty line.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut has_frequencies = false;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            has_frequencies = line.split_whitespace().count() >= 2;
            break;
        }

        if has_frequencies {
            Self::load_from_frequency_file(path)
        } else {
            Self::load_from_file(path)
        }
    }

    /// Merge another dictionary into this one, adding frequencies.
    pub fn merge(&mut self, other: &SpellingDictionary) {
        for (word, frequency) in &other.words {
            let current = self.frequency(word);
            self.add_word(word, current.saturating_add(*frequency));
        }
    }
}

/// Common English words by descending usage, plus vocabulary frequent in
/// titles and chat requests (genres, story words).
const ENGLISH_WORDS_BY_RANK: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say",
    "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what", "so",
    "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make", "can", "like",
    "time", "no", "just", "him", "know", "take", "people", "into", "year", "your", "good", "some",
    "could", "them", "see", "other", "than", "then", "now", "look", "only", "come", "its", "over",
    "think", "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way",
    "even", "new", "want", "because", "any", "these", "give", "day", "most", "us", "is", "was",
    "are", "been", "has", "had", "were", "said", "each", "during", "where", "did", "does", "doing",
    "made", "find", "home", "help", "hand", "right", "world", "life", "love", "house", "water",
    "place", "word", "before", "through", "still", "here", "should", "never", "those", "came",
    "may", "part", "against", "such", "turn", "every", "point", "small", "end", "why", "hello",
    "search", "query", "text", "spell", "correct", "suggestion", "dictionary", "language",
    "english", "computer", "program", "software", "system", "data", "information", "process",
    "result", "value", "number", "string", "character", "man", "woman", "child", "children",
    "family", "friend", "friends", "school", "city", "country", "story", "stories", "night",
    "morning", "evening", "week", "month", "today", "tomorrow", "yesterday", "game", "games",
    "music", "song", "songs", "video", "videos", "picture", "pictures", "photo", "book", "books",
    "page", "pages", "name", "names", "news", "money", "business", "company", "group", "team",
    "party", "war", "peace", "king", "queen", "prince", "princess", "lord", "god", "hero",
    "heroes", "monster", "monsters", "ghost", "ghosts", "dragon", "dragons", "space", "star",
    "stars", "planet", "earth", "moon", "sun", "sea", "ocean", "river", "mountain", "island",
    "forest", "road", "street", "car", "cars", "train", "ship", "plane", "fire", "ice", "stone",
    "gold", "silver", "iron", "blood", "heart", "mind", "soul", "body", "head", "face", "eye",
    "eyes", "voice", "power", "force", "light", "dark", "darkness", "shadow", "dream", "dreams",
    "fear", "hope", "truth", "lie", "secret", "secrets", "mystery", "magic", "death", "murder",
    "crime", "police", "detective", "doctor", "teacher", "student", "soldier", "captain", "agent",
    "spy", "thief", "killer", "hunter", "master", "warrior", "knight", "legend", "legends",
    "return", "rise", "fall", "last", "lost", "found", "second", "third", "final", "chapter",
    "episode", "season", "series", "edition", "version", "collection", "original", "complete",
    "special", "extended", "director", "cut", "big", "little", "long", "great", "old", "young",
    "high", "low", "different", "large", "next", "early", "important", "public", "bad", "able",
    "open", "black", "white", "red", "blue", "green", "real", "best", "better", "true", "free",
    "sure", "human", "local", "late", "hard", "major", "strong", "whole", "clear", "simple",
    "easy", "happy", "sad", "funny", "dead", "alive", "wild", "deep", "dangerous", "beautiful",
    "strange", "perfect", "play", "run", "walk", "talk", "tell", "ask", "feel", "try", "leave",
    "call", "keep", "let", "begin", "seem", "show", "hear", "read", "write", "learn", "change",
    "follow", "stop", "create", "speak", "spend", "grow", "win", "lose", "kill", "fight", "save",
    "live", "die", "meet", "send", "build", "stay", "wait", "remember", "forget", "hate", "start",
    "finish", "watch", "bring", "happen", "believe", "hold", "stand", "understand", "action",
    "adventure", "comedy", "drama", "horror", "thriller", "romance", "romantic", "fantasy",
    "science", "fiction", "animation", "animated", "documentary", "western", "musical",
];

/// Built-in dictionaries.
pub struct BuiltinDictionary;

impl BuiltinDictionary {
    /// Create a dictionary with common English words.
    ///
    /// Frequencies follow a Zipf-like curve over the word's rank, floored at 10.
    pub fn english() -> SpellingDictionary {
        let mut dict = SpellingDictionary::new();

        for (rank, word) in ENGLISH_WORDS_BY_RANK.iter().enumerate() {
            if !dict.contains(word) {
                let frequency = (1_000_000 / (rank as u32 + 1)).max(10);
                dict.add_word(word, frequency);
            }
        }

        dict
    }

    /// Create a minimal dictionary for testing.
    pub fn minimal() -> SpellingDictionary {
        let mut dict = SpellingDictionary::new();

        let words = [
            "hello", "world", "search", "query", "text", "word", "spell", "correct", "dictionary",
            "language", "english", "computer", "program", "software", "system", "data",
        ];

        for word in words {
            dict.add_word(word, 100);
        }

        dict
    }
}

//! Case pattern detection and restoration for query tokens.
//!
//! Correction works on lowercase words. Before a corrected word is put back
//! into the query it is re-cased after the token it replaces: `"Avangers"`
//! becomes `"Avengers"`, `"AVANGERS"` becomes `"AVENGERS"`.
//!
//! Re-casing applies only to tokens that correction rewrote. A token whose
//! correction equals its own lowercase form keeps its exact spelling, so
//! `"McDonald"` stays `"McDonald"` instead of being lowercased by [`CasePattern::Lower`].

use serde::{Deserialize, Serialize};

/// How the cased characters of a token are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePattern {
    /// First cased character upper, every other cased character lower.
    Title,
    /// Every cased character upper.
    Upper,
    /// Anything else, including mixed case and uncased text.
    Lower,
}

impl CasePattern {
    /// Detect the case pattern of a token.
    ///
    /// Title case is checked first, so a single uppercase letter is `Title`.
    pub fn detect(token: &str) -> Self {
        let mut cased = token.chars().filter(|c| c.is_uppercase() || c.is_lowercase());

        let Some(first) = cased.next() else {
            return CasePattern::Lower;
        };

        let rest: Vec<char> = cased.collect();
        if first.is_uppercase() && rest.iter().all(|c| c.is_lowercase()) {
            CasePattern::Title
        } else if first.is_uppercase() && rest.iter().all(|c| c.is_uppercase()) {
            CasePattern::Upper
        } else {
            CasePattern::Lower
        }
    }

    /// Re-case `word` according to this pattern.
    pub fn apply(self, word: &str) -> String {
        match self {
            CasePattern::Upper => word.to_uppercase(),
            CasePattern::Lower => word.to_lowercase(),
            CasePattern::Title => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(CasePattern::detect("Avangers"), CasePattern::Title);
        assert_eq!(CasePattern::detect("AVANGERS"), CasePattern::Upper);
        assert_eq!(CasePattern::detect("avangers"), CasePattern::Lower);
        assert_eq!(CasePattern::detect("aVANGERS"), CasePattern::Lower);
        assert_eq!(CasePattern::detect("McDonald"), CasePattern::Lower);
        assert_eq!(CasePattern::detect("2019"), CasePattern::Lower);
        assert_eq!(CasePattern::detect("X"), CasePattern::Title);
    }

    #[test]
    fn test_apply() {
        assert_eq!(CasePattern::Title.apply("avengers"), "Avengers");
        assert_eq!(CasePattern::Upper.apply("avengers"), "AVENGERS");
        assert_eq!(CasePattern::Lower.apply("AvEnGeRs"), "avengers");
        assert_eq!(CasePattern::Title.apply(""), "");
    }

    #[test]
    fn test_title_with_apostrophe() {
        assert_eq!(CasePattern::detect("Don't"), CasePattern::Title);
        assert_eq!(CasePattern::Title.apply("don't"), "Don't");
    }
}

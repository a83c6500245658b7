//! Output formatting for CLI commands.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellsiftArgs};
use crate::error::Result;
use crate::search::ranker::MatchRecord;
use crate::spelling::corrector::TokenCorrection;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub query: String,
    pub corrected_query: String,
    pub was_corrected: bool,
    pub total_matches: usize,
    pub matches: Vec<MatchRecord>,
    pub duration_ms: u64,
}

/// Result structure for query correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub query: String,
    pub corrected_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenCorrection>>,
}

/// Result structure for the vocabulary listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyReport {
    pub documents: usize,
    pub words: Vec<String>,
}

/// Plain text rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self, verbosity: u8) -> String;
}

impl HumanOutput for SearchReport {
    fn render_human(&self, verbosity: u8) -> String {
        let mut out = String::new();

        if self.was_corrected {
            let _ = writeln!(out, "Showing results for: {}", self.corrected_query);
            if verbosity > 1 {
                let _ = writeln!(out, "Searched instead of: {}", self.query);
            }
        }

        if self.matches.is_empty() {
            let _ = writeln!(out, "No matches.");
        }

        for (i, record) in self.matches.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. [{}] {:>8.4}  {}",
                i + 1,
                record.match_type,
                record.score,
                record.text
            );
        }

        if verbosity > 0 {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} of {} matches shown ({}ms)",
                self.matches.len(),
                self.total_matches,
                self.duration_ms
            );
        }
        out
    }
}

impl HumanOutput for CorrectionReport {
    fn render_human(&self, _verbosity: u8) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.corrected_query);

        if let Some(tokens) = &self.tokens {
            for token in tokens {
                let _ = writeln!(
                    out,
                    "  {:<16} -> {:<16} ({:?})",
                    token.original, token.corrected, token.source
                );
            }
        }
        out
    }
}

impl HumanOutput for VocabularyReport {
    fn render_human(&self, verbosity: u8) -> String {
        let mut out = String::new();
        for word in &self.words {
            let _ = writeln!(out, "{word}");
        }
        if verbosity > 1 {
            let _ = writeln!(
                out,
                "{} words from {} documents",
                self.words.len(),
                self.documents
            );
        }
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(result: &T, args: &SpellsiftArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let rendered = match args.output_format {
        OutputFormat::Human => result.render_human(args.verbosity()),
        OutputFormat::Json => render_json(result, args.pretty)?,
    };
    print!("{rendered}");
    Ok(())
}

/// Serialize a result as newline-terminated JSON.
pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    json.push('\n');
    Ok(json)
}

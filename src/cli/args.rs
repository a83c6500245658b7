//! Command line argument parsing for the spellsift CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Spellsift - spelling-corrected fuzzy search over ad-hoc text
#[derive(Parser, Debug, Clone)]
#[command(name = "spellsift")]
#[command(about = "Spelling-corrected fuzzy search over a corpus of short texts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellsiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Search configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SPELLSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra spelling dictionary ("word frequency" lines or one word per line)
    #[arg(short, long, value_name = "DICTIONARY_FILE")]
    pub dictionary: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellsiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct a query and rank the corpus against it
    Search(SearchArgs),

    /// Print the corrected query only
    Correct(CorrectArgs),

    /// Print the vocabulary built from the corpus
    Vocab(VocabArgs),
}

/// Where to read the corpus from
#[derive(Args, Debug, Clone, Default)]
pub struct CorpusArgs {
    /// Corpus file, one document per line (stdin when omitted)
    #[arg(long, value_name = "CORPUS_FILE")]
    pub corpus: Option<PathBuf>,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Maximum number of results to print
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Keep documents scoring strictly above this (0-100)
    #[arg(long)]
    pub inclusion_threshold: Option<f64>,

    /// Label documents scoring at least this as exact (0-100)
    #[arg(long)]
    pub exact_threshold: Option<f64>,

    /// Give up after this many milliseconds
    #[arg(long, value_name = "MILLIS")]
    pub timeout_ms: Option<u64>,
}

/// Arguments for query correction
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Correct against the vocabulary of this corpus (no corpus when omitted)
    #[arg(long, value_name = "CORPUS_FILE")]
    pub corpus: Option<PathBuf>,

    /// Show the decision made for each token
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for listing the vocabulary
#[derive(Parser, Debug, Clone)]
pub struct VocabArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command() {
        let args = SpellsiftArgs::try_parse_from([
            "spellsift",
            "search",
            "avengrs",
            "--corpus",
            "titles.txt",
            "--limit",
            "5",
            "--inclusion-threshold",
            "70",
        ])
        .unwrap();

        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.query, "avengrs");
            assert_eq!(search_args.corpus.corpus, Some(PathBuf::from("titles.txt")));
            assert_eq!(search_args.limit, 5);
            assert_eq!(search_args.inclusion_threshold, Some(70.0));
            assert_eq!(search_args.exact_threshold, None);
            assert_eq!(search_args.timeout_ms, None);
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_search_defaults() {
        let args = SpellsiftArgs::try_parse_from(["spellsift", "search", "kgf"]).unwrap();

        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.limit, 10);
            assert!(search_args.corpus.corpus.is_none());
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_correct_command() {
        let args = SpellsiftArgs::try_parse_from([
            "spellsift",
            "correct",
            "The Avangers",
            "--explain",
        ])
        .unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert_eq!(correct_args.query, "The Avangers");
            assert!(correct_args.explain);
            assert!(correct_args.corpus.is_none());
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_vocab_command() {
        let args =
            SpellsiftArgs::try_parse_from(["spellsift", "vocab", "--corpus", "chat.log"]).unwrap();
        assert!(matches!(args.command, Command::Vocab(_)));
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SpellsiftArgs::try_parse_from(["spellsift", "vocab"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SpellsiftArgs::try_parse_from(["spellsift", "-v", "vocab"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = SpellsiftArgs::try_parse_from(["spellsift", "-vv", "vocab"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = SpellsiftArgs::try_parse_from(["spellsift", "-vv", "--quiet", "vocab"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_global_options() {
        let args = SpellsiftArgs::try_parse_from([
            "spellsift",
            "--format",
            "json",
            "--pretty",
            "--config",
            "spellsift.json",
            "--dictionary",
            "words.txt",
            "vocab",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        assert_eq!(args.config, Some(PathBuf::from("spellsift.json")));
        assert_eq!(args.dictionary, Some(PathBuf::from("words.txt")));
    }

    #[test]
    fn test_missing_query_is_rejected() {
        assert!(SpellsiftArgs::try_parse_from(["spellsift", "search"]).is_err());
        assert!(SpellsiftArgs::try_parse_from(["spellsift", "--format", "yaml", "vocab"]).is_err());
    }
}

//! Command implementations for the spellsift CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::search::config::SearchConfig;
use crate::search::engine::{SearchEngine, SearchOutcome};
use crate::search::shared::SharedSearchEngine;

/// Execute a CLI command.
pub fn execute_command(args: SpellsiftArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Correct(correct_args) => correct(correct_args, &args),
        Command::Vocab(vocab_args) => vocab(vocab_args, &args),
    }
}

/// Load the configuration named on the command line, or the defaults.
pub fn load_config(cli_args: &SpellsiftArgs) -> Result<SearchConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            SearchConfig::from_json_file(path)?
        }
        None => SearchConfig::default(),
    };

    if let Some(dictionary) = &cli_args.dictionary {
        config.spelling.dictionary = Some(dictionary.clone());
    }
    Ok(config)
}

/// Read one document per line, skipping blank lines.
pub fn read_corpus_from<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut corpus = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            corpus.push(line);
        }
    }
    Ok(corpus)
}

/// Read the corpus from a file, or from stdin when no path is given.
pub fn read_corpus(path: Option<&Path>) -> Result<Vec<String>> {
    let corpus = match path {
        Some(path) => read_corpus_from(BufReader::new(File::open(path)?))?,
        None => read_corpus_from(io::stdin().lock())?,
    };
    info!("Loaded {} documents", corpus.len());
    Ok(corpus)
}

fn search(args: &SearchArgs, cli_args: &SpellsiftArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(threshold) = args.inclusion_threshold {
        config.ranking.inclusion_threshold = threshold;
    }
    if let Some(threshold) = args.exact_threshold {
        config.ranking.exact_threshold = threshold;
    }

    let engine = SearchEngine::new(config)?;
    let corpus = read_corpus(args.corpus.corpus.as_deref())?;

    let start_time = Instant::now();
    let outcome = match args.timeout_ms {
        Some(millis) => search_with_deadline(engine, &args.query, corpus, millis)?,
        None => {
            let mut engine = engine;
            engine.search(&args.query, &corpus)
        }
    };
    let duration = start_time.elapsed();

    output_result(
        &SearchReport {
            query: args.query.clone(),
            corrected_query: outcome.corrected_query.clone(),
            was_corrected: outcome.was_corrected(&args.query),
            total_matches: outcome.len(),
            matches: outcome.top(args.limit).to_vec(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

fn search_with_deadline(
    engine: SearchEngine,
    query: &str,
    corpus: Vec<String>,
    millis: u64,
) -> Result<SearchOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let shared = SharedSearchEngine::new(engine).with_deadline(Duration::from_millis(millis));
    let result = runtime.block_on(shared.search(query, corpus));
    // Dropping the runtime would wait for the abandoned blocking task.
    runtime.shutdown_background();
    result
}

fn correct(args: &CorrectArgs, cli_args: &SpellsiftArgs) -> Result<()> {
    let mut engine = SearchEngine::new(load_config(cli_args)?)?;
    if let Some(path) = &args.corpus {
        let corpus = read_corpus(Some(path))?;
        engine.build_index(&corpus);
    }

    let correction = engine.correct_query_detailed(&args.query);
    output_result(
        &CorrectionReport {
            query: correction.original,
            corrected_query: correction.corrected,
            tokens: args.explain.then_some(correction.tokens),
        },
        cli_args,
    )
}

fn vocab(args: &VocabArgs, cli_args: &SpellsiftArgs) -> Result<()> {
    let mut engine = SearchEngine::new(load_config(cli_args)?)?;
    let corpus = read_corpus(args.corpus.corpus.as_deref())?;
    engine.build_index(&corpus);

    output_result(
        &VocabularyReport {
            documents: corpus.len(),
            words: engine
                .vocabulary()
                .sorted_words()
                .into_iter()
                .map(str::to_string)
                .collect(),
        },
        cli_args,
    )
}

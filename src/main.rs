//! Lanai - command line entrypoint.
//!
//! Loads configuration, initializes logging and runs one of the subcommands.
//! `search` bulk-loads a word list into an index and answers prefix queries.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lanai_index::config::cache::CacheConfig;
use lanai_index::config::{ConfigLoader, LanaiConfig, LogConfig, ENV_PREFIX};
use lanai_index::{EntryValue, KeyCase, LanaiError, LanaiResult, PrefixIndex};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Cache id used for the dictionary loaded by `search`.
const DICTIONARY_CACHE: &str = "dictionary";

/// Command line arguments for Lanai.
#[derive(Parser, Debug)]
#[clap(name = "lanai", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Index a word list (one word per line) and print the matches of each prefix
    Search {
        /// Path to the word list
        #[clap(short, long, value_parser)]
        dictionary: PathBuf,

        /// Index words exactly as written instead of lowercasing them
        #[clap(long)]
        case_sensitive: bool,

        /// Prefixes to look up
        #[clap(required = true)]
        prefixes: Vec<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// One dictionary line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
struct DictionaryRecord {
    word: String,
    line: usize,
}

impl EntryValue for DictionaryRecord {
    fn search_key(&self) -> Option<&str> {
        Some(&self.word)
    }
}

/// Matches printed for one prefix.
#[derive(Debug, Serialize)]
struct PrefixMatches {
    prefix: String,
    count: usize,
    matches: Vec<DictionaryRecord>,
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr so
/// that stdout only carries results.
fn init_logging(log: &LogConfig) -> LanaiResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_thread_names(true);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| LanaiError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn search(
    config: &LanaiConfig,
    dictionary: &Path,
    case_sensitive: bool,
    prefixes: Vec<String>,
) -> anyhow::Result<()> {
    let index: PrefixIndex<&'static str, usize, DictionaryRecord> =
        PrefixIndex::from_config(&config.index)?;

    let cache_config = CacheConfig {
        key_case: if case_sensitive {
            KeyCase::Sensitive
        } else {
            KeyCase::Insensitive
        },
        ..config.cache.clone()
    };
    index.add_cache(DICTIONARY_CACHE, cache_config, |_| None)?;

    let started = Instant::now();
    let file = File::open(dictionary)
        .with_context(|| format!("Failed to open dictionary {dictionary:?}"))?;

    for (line, word) in BufReader::new(file).lines().enumerate() {
        let word = word.with_context(|| format!("Failed to read line {}", line + 1))?;
        let word = word.trim();
        if word.is_empty() {
            continue;
        }

        let record = DictionaryRecord {
            word: word.to_string(),
            line: line + 1,
        };
        index.put(&DICTIONARY_CACHE, line, record)?;
    }

    info!(
        size = index.size(),
        node_count = index.node_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Dictionary indexed"
    );

    let mut results = Vec::with_capacity(prefixes.len());
    for prefix in prefixes {
        let started = Instant::now();
        let mut matches = index.get_by_prefix(&prefix)?;
        matches.sort();
        debug!(
            %prefix,
            count = matches.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Prefix resolved"
        );

        results.push(PrefixMatches {
            prefix,
            count: matches.len(),
            matches,
        });
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    match args.command {
        Command::Search {
            dictionary,
            case_sensitive,
            prefixes,
        } => {
            let config = config_loader.load()?;
            init_logging(&config.log)?;
            info!(version = lanai_index::VERSION, "Starting Lanai search");
            search(&config, &dictionary, case_sensitive, prefixes)
        }
        Command::Validate => {
            let config = config_loader.load()?;
            init_logging(&config.log)?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            init_logging(&LogConfig::default())?;
            info!("Generating default configuration");

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(LanaiError::Io)?;
            }

            let toml = toml::to_string_pretty(&LanaiConfig::default())
                .map_err(|e| LanaiError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml).map_err(LanaiError::Io)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

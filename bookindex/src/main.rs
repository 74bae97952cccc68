use anyhow::{Context, Result};
use clap::Parser;
use search_core::config::DEFAULT_TOP_K;
use search_core::{IdfScheme, IndexConfig, MatchMode, SearchIndex, StopWords, TfScheme};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

mod book;
mod catalog;

use book::{render_hits, Book};

const PROMPT: &str = "Enter a query, or hit enter to quit: ";

#[derive(Parser)]
#[command(name = "bookindex")]
#[command(about = "Index a book catalog and answer tf-idf ranked queries", long_about = None)]
struct Cli {
    /// Catalog file or directory (tab-separated `id title author`, or .jsonl)
    #[arg(long, short, default_value = "data/title_author.tab.txt")]
    data: PathBuf,
    /// JSON file with index configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of results per query
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
    /// File with one stop word per line
    #[arg(long)]
    stop_words: Option<PathBuf>,
    /// Use smoothed IDF = ln((N+1)/(df+1)) + 1 instead of ln(N/df)
    #[arg(long, default_value_t = false)]
    smoothed_idf: bool,
    /// Use 1 + ln(tf) instead of the raw term count
    #[arg(long, default_value_t = false)]
    log_tf: bool,
    /// Only return books containing every query term
    #[arg(long, default_value_t = false)]
    match_all: bool,
    /// Worker threads for indexing (default: one per core)
    #[arg(long)]
    threads: Option<usize>,
    /// Run one query and exit instead of prompting
    #[arg(long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let started = Instant::now();
    tracing::info!(data = %cli.data.display(), "loading books");
    let books = catalog::load(&cli.data)?;
    let index = SearchIndex::build(books, &config)?;
    tracing::info!(elapsed_s = started.elapsed().as_secs_f64(), "done loading books, {} docs in index", index.len());

    match cli.query {
        Some(query) => println!("{}", search(&index, &query, cli.top_k)),
        None => run_prompt(&index, cli.top_k)?,
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<IndexConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => IndexConfig::default(),
    };
    if let Some(path) = &cli.stop_words {
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        config.analyzer.stop_words = StopWords::Custom(raw.lines().map(str::to_string).collect());
    }
    if cli.smoothed_idf { config.idf = IdfScheme::Smoothed; }
    if cli.log_tf { config.tf = TfScheme::LogScaled; }
    if cli.match_all { config.match_mode = MatchMode::All; }
    if cli.threads.is_some() { config.threads = cli.threads; }
    Ok(config)
}

fn search(index: &SearchIndex<Book>, query: &str, top_k: usize) -> String {
    let started = Instant::now();
    let hits = index.rank(query, top_k);
    tracing::info!(elapsed_s = started.elapsed().as_secs_f64(), hits = hits.len(), "search_books");
    render_hits(&hits)
}

/// Prompt until an empty line or end of input.
fn run_prompt(index: &SearchIndex<Book>, top_k: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            break;
        }
        writeln!(stdout, "{}", search(index, query, top_k))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("index.json");
        fs::write(&cfg_path, r#"{"idf": "standard", "match_mode": "any", "batch_size": 16}"#).unwrap();
        let stop_path = dir.path().join("stop_words.txt");
        fs::write(&stop_path, "the\nof\n").unwrap();

        let cli = Cli::parse_from([
            "bookindex",
            "--config", cfg_path.to_str().unwrap(),
            "--stop-words", stop_path.to_str().unwrap(),
            "--smoothed-idf",
            "--match-all",
            "--threads", "2",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.idf, IdfScheme::Smoothed);
        assert_eq!(config.tf, TfScheme::Linear);
        assert_eq!(config.match_mode, MatchMode::All);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.batch_size.get(), 16);
        assert_eq!(config.analyzer.stop_words, StopWords::Custom(vec!["the".into(), "of".into()]));
    }

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::parse_from(["bookindex"]);
        assert_eq!(cli.top_k, DEFAULT_TOP_K);
        assert_eq!(load_config(&cli).unwrap(), IndexConfig::default());
    }
}

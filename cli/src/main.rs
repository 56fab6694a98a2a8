use anyhow::Result;
use clap::{Parser, Subcommand};
use engine::{Config, Document, EngineStats, LoadReport, SearchEngine};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docindex")]
#[command(about = "Load a CSV corpus and query it from the command line", long_about = None)]
struct Cli {
    /// JSON settings file (defaults to $CONF_JSON_PATH, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the data directory and print what was ingested
    Stats {
        /// Directory of CSV data files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print documents containing every keyword
    Search {
        /// Directory of CSV data files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Maximum documents to print
        #[arg(long)]
        max_results: Option<usize>,
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

#[derive(Serialize)]
struct StatsOutput {
    load: LoadReport,
    index: EngineStats,
}

#[derive(Serialize)]
struct SearchOutput {
    results: Vec<Document>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    // logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Commands::Stats { data_dir } => {
            if let Some(dir) = data_dir {
                config.engine.index_data_dir = dir;
            }
            let (engine, load) = SearchEngine::load(config.engine)?;
            log_load(&load);
            print_json(&StatsOutput { load, index: engine.stats() })
        }
        Commands::Search { data_dir, max_results, keywords } => {
            if let Some(dir) = data_dir {
                config.engine.index_data_dir = dir;
            }
            if let Some(max) = max_results {
                config.engine.max_search_results = max;
            }
            let (engine, load) = SearchEngine::load(config.engine)?;
            log_load(&load);
            let results = engine.search(keywords.as_slice());
            tracing::info!(keywords = ?keywords, hits = results.len(), "search done");
            print_json(&SearchOutput { results })
        }
    }
}

fn log_load(load: &LoadReport) {
    tracing::info!(
        documents = load.documents,
        files_loaded = load.files_loaded,
        files_failed = load.files_failed,
        rows_rejected = load.rows_rejected,
        "corpus loaded"
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

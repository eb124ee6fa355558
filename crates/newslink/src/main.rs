//! # Newslink CLI (`nlk`)
//!
//! The `nlk` binary is the interface to the Newslink retrieval engine. It
//! provides commands for database initialization, JSONL import, single
//! query retrieval, and batch retrieval.
//!
//! ## Usage
//!
//! ```bash
//! nlk --config ./config/nlk.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `nlk init` | Create the SQLite database schema |
//! | `nlk import entries <file.jsonl>` | Import entries |
//! | `nlk import translations <file.jsonl>` | Import translations |
//! | `nlk neighbours <id> --pivot <lang>` | Ranked neighbours for one entry |
//! | `nlk batch <ids-file> --pivot <lang>` | Retrieval for every id in a file |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! nlk init --config ./config/nlk.toml
//!
//! # Load entries and translations
//! nlk import entries ./data/entries.jsonl
//! nlk import translations ./data/translations.jsonl
//!
//! # Nearest English neighbours of entry 4211
//! nlk neighbours 4211 --pivot en
//!
//! # Batch over a list of query ids, one JSON result per line
//! nlk batch ./data/query_ids.txt --pivot en > neighbours.jsonl
//! ```

mod batch;
mod config;
mod db;
mod import;
mod migrate;
mod neighbours;
mod progress;
mod sqlite_store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Newslink CLI — multilingual news neighbour retrieval over a local
/// SQLite store.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/nlk.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "nlk",
    about = "Newslink — multilingual news neighbour retrieval over a local store",
    version,
    long_about = "Newslink retrieves, for a multilingual news entry, the most similar entries \
    in a pivot language within a bounded date window, ranking candidates by TF-IDF cosine \
    similarity over normalized text. Entries and their machine translations live in a local \
    SQLite store populated via JSONL import."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/nlk.toml`. Database and retrieval settings
    /// are read from this file.
    #[arg(long, global = true, default_value = "./config/nlk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the entries/translations
    /// tables. This command is idempotent — running it multiple times is
    /// safe.
    Init,

    /// Import entries or translations from a JSONL file.
    ///
    /// One JSON object per line. Entries upsert on id; translations
    /// append.
    Import {
        #[command(subcommand)]
        what: ImportWhat,
    },

    /// Retrieve ranked neighbours for one query entry.
    ///
    /// Selects candidate entries in the pivot language (or, for a
    /// hub-language query, across all supported languages) within the
    /// configured date window, and ranks them by TF-IDF cosine similarity
    /// against the query's translation.
    Neighbours {
        /// Query entry id.
        query_id: i64,

        /// Pivot language code for similarity comparison.
        #[arg(long)]
        pivot: String,

        /// Translation model whose output supplies the query text.
        #[arg(long, default_value = "mm_all_iter1")]
        model: String,

        /// Maximum number of neighbours to return (overrides config).
        #[arg(long)]
        top_k: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run retrieval for every query id in a file (one id per line).
    ///
    /// Prints one JSON result object per query on stdout. Failed queries
    /// are logged with their id and skipped; the batch continues.
    Batch {
        /// File with one query entry id per line.
        ids_file: PathBuf,

        /// Pivot language code for similarity comparison.
        #[arg(long)]
        pivot: String,

        /// Translation model whose output supplies the query text.
        #[arg(long, default_value = "mm_all_iter1")]
        model: String,

        /// Progress reporting on stderr: `auto` (TTY only), `off`,
        /// `human`, or `json`.
        #[arg(long, default_value = "auto")]
        progress: String,
    },
}

/// Import subcommands.
#[derive(Subcommand)]
enum ImportWhat {
    /// Import entries (`id`, `lang`, `date`, `content`).
    Entries {
        /// Path to the JSONL file.
        file: PathBuf,
    },
    /// Import translations (`parent_id`, `model`, `lang`, `translated`).
    Translations {
        /// Path to the JSONL file.
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nlk=info".parse()?)
                .add_directive("newslink_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Import { what } => match what {
            ImportWhat::Entries { file } => {
                import::run_import_entries(&cfg, &file).await?;
            }
            ImportWhat::Translations { file } => {
                import::run_import_translations(&cfg, &file).await?;
            }
        },
        Commands::Neighbours {
            query_id,
            pivot,
            model,
            top_k,
            json,
        } => {
            neighbours::run_neighbours(&cfg, query_id, &pivot, &model, top_k, json).await?;
        }
        Commands::Batch {
            ids_file,
            pivot,
            model,
            progress,
        } => {
            batch::run_batch(&cfg, &ids_file, &pivot, &model, &progress).await?;
        }
    }

    Ok(())
}

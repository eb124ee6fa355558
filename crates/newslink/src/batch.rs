//! Batch retrieval over a list of query ids.
//!
//! One JSON result object per query on stdout. A failed query is logged
//! with its id and the batch continues; a single missing translation must
//! not abort a long run.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{error, info};

use newslink_core::normalize::Normalizer;
use newslink_core::retrieve::Retriever;

use crate::config::Config;
use crate::db;
use crate::progress::{BatchProgressEvent, ProgressMode};
use crate::sqlite_store::SqliteStore;

pub async fn run_batch(
    config: &Config,
    ids_path: &Path,
    pivot_lang: &str,
    model: &str,
    progress: &str,
) -> Result<()> {
    let mode = match progress {
        "auto" => ProgressMode::default_for_tty(),
        "off" => ProgressMode::Off,
        "human" => ProgressMode::Human,
        "json" => ProgressMode::Json,
        other => bail!("Unknown progress mode: {}. Use auto, off, human, or json.", other),
    };

    let content = std::fs::read_to_string(ids_path)
        .with_context(|| format!("Failed to read ids file: {}", ids_path.display()))?;

    let ids: Vec<i64> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<i64>()
                .with_context(|| format!("invalid query id: '{}'", line))
        })
        .collect::<Result<_>>()?;

    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let retriever = Retriever::new(store, Normalizer::english(), config.retrieval.to_core());

    let reporter = mode.reporter();
    let total = ids.len() as u64;
    let mut failed: u64 = 0;

    for (i, query_id) in ids.iter().enumerate() {
        match retriever.retrieve_neighbours(*query_id, pivot_lang, model).await {
            Ok(neighbours) => {
                let result = serde_json::json!({
                    "query_id": query_id,
                    "neighbours": neighbours,
                });
                println!("{}", serde_json::to_string(&result)?);
            }
            Err(e) => {
                failed += 1;
                error!(query_id, error = %e, "retrieval failed, continuing");
            }
        }
        reporter.report(BatchProgressEvent::Retrieved {
            n: (i + 1) as u64,
            total,
            failed,
        });
    }

    info!(total, failed, "batch complete");
    pool.close().await;
    Ok(())
}

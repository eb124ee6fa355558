//! Single-query retrieval command.
//!
//! Builds a retriever over the SQLite store, runs one call, and prints
//! the ranked neighbours to stdout. Used by `nlk neighbours`.

use anyhow::Result;

use newslink_core::normalize::Normalizer;
use newslink_core::retrieve::Retriever;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

pub async fn run_neighbours(
    config: &Config,
    query_id: i64,
    pivot_lang: &str,
    model: &str,
    top_k: Option<usize>,
    json: bool,
) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());

    let mut core_config = config.retrieval.to_core();
    if let Some(k) = top_k {
        core_config.top_k = k;
    }

    let retriever = Retriever::new(store, Normalizer::english(), core_config);
    let neighbours = retriever
        .retrieve_neighbours(query_id, pivot_lang, model)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&neighbours)?);
    } else if neighbours.is_empty() {
        println!("No neighbours.");
    } else {
        for (i, neighbour) in neighbours.iter().enumerate() {
            println!("{}. [{:.4}] entry {}", i + 1, neighbour.score, neighbour.entry_id);
        }
    }

    pool.close().await;
    Ok(())
}

//! JSONL import for entries and translations.
//!
//! Thin ingestion glue: the retrieval engine itself never writes to the
//! store. One JSON object per line; blank lines are skipped, a malformed
//! line aborts the import with its line number.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

use crate::config::Config;
use crate::db;

#[derive(Debug, Deserialize)]
struct EntryRecord {
    id: i64,
    lang: String,
    date: NaiveDate,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslationRecord {
    parent_id: i64,
    model: String,
    lang: String,
    #[serde(default)]
    translated: Option<String>,
}

pub async fn run_import_entries(config: &Config, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {}", path.display()))?;

    let pool = db::connect(config).await?;
    let mut count: u64 = 0;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: EntryRecord = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid entry record", path.display(), lineno + 1))?;

        sqlx::query(
            r#"
            INSERT INTO entries (id, lang, date, content)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                lang = excluded.lang,
                date = excluded.date,
                content = excluded.content
            "#,
        )
        .bind(record.id)
        .bind(&record.lang)
        .bind(record.date.format("%Y-%m-%d").to_string())
        .bind(&record.content)
        .execute(&pool)
        .await?;

        count += 1;
    }

    pool.close().await;
    println!("Imported {} entries.", count);
    Ok(())
}

pub async fn run_import_translations(config: &Config, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {}", path.display()))?;

    let pool = db::connect(config).await?;
    let mut count: u64 = 0;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: TranslationRecord = serde_json::from_str(line).with_context(|| {
            format!(
                "{}:{}: invalid translation record",
                path.display(),
                lineno + 1
            )
        })?;

        sqlx::query(
            "INSERT INTO translations (parent_id, model, lang, translated) VALUES (?, ?, ?, ?)",
        )
        .bind(record.parent_id)
        .bind(&record.model)
        .bind(&record.lang)
        .bind(&record.translated)
        .execute(&pool)
        .await?;

        count += 1;
    }

    pool.close().await;
    println!("Imported {} translations.", count);
    Ok(())
}

//! SQLite-backed [`EntryStore`] implementation.
//!
//! Maps each store operation to a query against the entries/translations
//! schema created by `nlk init`. Dates are stored as ISO `YYYY-MM-DD`
//! text, which compares correctly under `BETWEEN`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use newslink_core::models::{Candidate, Entry, EntryId, Translation};
use newslink_core::store::{EntryStore, LangScope};

/// SQLite implementation of the [`EntryStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn entry_from_row(row: &SqliteRow) -> Result<Entry> {
    let raw_date: String = row.get("date");
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .with_context(|| format!("invalid entry date: '{}'", raw_date))?;
    Ok(Entry {
        id: row.get("id"),
        lang: row.get("lang"),
        date,
        content: row.get("content"),
    })
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl EntryStore for SqliteStore {
    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>> {
        let row = sqlx::query("SELECT id, lang, date, content FROM entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn find_candidates(
        &self,
        scope: LangScope<'_>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candidate>> {
        let rows = match scope {
            LangScope::Exactly(lang) => {
                sqlx::query("SELECT id, lang FROM entries WHERE lang = ? AND date BETWEEN ? AND ?")
                    .bind(lang)
                    .bind(iso(from))
                    .bind(iso(to))
                    .fetch_all(&self.pool)
                    .await?
            }
            LangScope::AnyOfExcept { allowed, except } => {
                if allowed.is_empty() {
                    return Ok(Vec::new());
                }
                // sqlite has no array binds; expand the placeholder list.
                let placeholders = vec!["?"; allowed.len()].join(", ");
                let sql = format!(
                    "SELECT id, lang FROM entries WHERE lang != ? AND lang IN ({}) AND date BETWEEN ? AND ?",
                    placeholders
                );
                let mut query = sqlx::query(&sql).bind(except);
                for lang in allowed {
                    query = query.bind(lang);
                }
                query
                    .bind(iso(from))
                    .bind(iso(to))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows
            .iter()
            .map(|row| Candidate {
                id: row.get("id"),
                lang: row.get("lang"),
            })
            .collect())
    }

    async fn fetch_entries(&self, ids: &[EntryId]) -> Result<Vec<Entry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, lang, date, content FROM entries WHERE id IN ({})",
            placeholders
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn find_translation(
        &self,
        parent_id: EntryId,
        model: &str,
        lang: Option<&str>,
    ) -> Result<Option<Translation>> {
        let row = match lang {
            Some(l) => {
                sqlx::query(
                    "SELECT parent_id, model, lang, translated FROM translations \
                     WHERE parent_id = ? AND model = ? AND lang = ? LIMIT 1",
                )
                .bind(parent_id)
                .bind(model)
                .bind(l)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT parent_id, model, lang, translated FROM translations \
                     WHERE parent_id = ? AND model = ? LIMIT 1",
                )
                .bind(parent_id)
                .bind(model)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(row.map(|r| Translation {
            parent_id: r.get("parent_id"),
            model: r.get("model"),
            lang: r.get("lang"),
            translated: r.get("translated"),
        }))
    }
}

use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    // Create entries table. Dates are ISO `YYYY-MM-DD` text so BETWEEN
    // compares correctly without a date type.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY,
            lang TEXT NOT NULL,
            date TEXT NOT NULL,
            content TEXT
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create translations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER NOT NULL,
            model TEXT NOT NULL,
            lang TEXT NOT NULL,
            translated TEXT,
            FOREIGN KEY (parent_id) REFERENCES entries(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_lang_date ON entries(lang, date)")
        .execute(&pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_translations_parent ON translations(parent_id, model, lang)",
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}

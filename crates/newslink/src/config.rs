use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use newslink_core::retrieve::RetrieverConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_hub_lang")]
    pub hub_lang: String,
    #[serde(default = "default_supported_langs")]
    pub supported_langs: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            top_k: default_top_k(),
            hub_lang: default_hub_lang(),
            supported_langs: default_supported_langs(),
        }
    }
}

fn default_window_days() -> i64 {
    2
}
fn default_top_k() -> usize {
    5
}
fn default_hub_lang() -> String {
    "en".to_string()
}
fn default_supported_langs() -> Vec<String> {
    ["hi", "ta", "te", "ml", "ur", "bn", "gu", "mr", "pa", "or"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl RetrievalConfig {
    pub fn to_core(&self) -> RetrieverConfig {
        RetrieverConfig {
            window_days: self.window_days,
            top_k: self.top_k,
            hub_lang: self.hub_lang.clone(),
            supported_langs: self.supported_langs.clone(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.retrieval.window_days < 0 {
        anyhow::bail!("retrieval.window_days must be >= 0");
    }

    if config.retrieval.top_k < 1 {
        anyhow::bail!("retrieval.top_k must be >= 1");
    }

    if config.retrieval.supported_langs.is_empty() {
        anyhow::bail!("retrieval.supported_langs must not be empty");
    }

    if config
        .retrieval
        .supported_langs
        .contains(&config.retrieval.hub_lang)
    {
        anyhow::bail!("retrieval.hub_lang must not appear in retrieval.supported_langs");
    }

    Ok(config)
}

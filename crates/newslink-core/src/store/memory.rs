//! In-memory [`EntryStore`] implementation for tests.
//!
//! Uses `Vec` behind `std::sync::RwLock` for thread safety. Entries
//! iterate in insertion order, which stands in for the store-native order
//! of a real backend.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Candidate, Entry, EntryId, Translation};

use super::{EntryStore, LangScope};

/// In-memory store for unit tests.
pub struct InMemoryStore {
    entries: RwLock<Vec<Entry>>,
    translations: RwLock<Vec<Translation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            translations: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_entry(&self, entry: Entry) {
        self.entries.write().unwrap().push(entry);
    }

    pub fn insert_translation(&self, translation: Translation) {
        self.translations.write().unwrap().push(translation);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for InMemoryStore {
    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>> {
        let entries = self.entries.read().unwrap();
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn find_candidates(
        &self,
        scope: LangScope<'_>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candidate>> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .iter()
            .filter(|e| scope.matches(&e.lang) && e.date >= from && e.date <= to)
            .map(|e| Candidate {
                id: e.id,
                lang: e.lang.clone(),
            })
            .collect())
    }

    async fn fetch_entries(&self, ids: &[EntryId]) -> Result<Vec<Entry>> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn find_translation(
        &self,
        parent_id: EntryId,
        model: &str,
        lang: Option<&str>,
    ) -> Result<Option<Translation>> {
        let translations = self.translations.read().unwrap();
        Ok(translations
            .iter()
            .find(|t| {
                t.parent_id == parent_id
                    && t.model == model
                    && lang.map_or(true, |l| t.lang == l)
            })
            .cloned())
    }
}

//! Retrieval orchestrator.
//!
//! Ties candidate selection, normalization, and TF-IDF ranking together
//! for one query entry. Each call is stateless: the TF-IDF model is fit
//! fresh on that call's candidate corpus, so scores are always relative
//! to the current candidate set and never cached across calls.

use chrono::Duration;
use tracing::{debug, warn};

use crate::error::{Result, RetrieveError};
use crate::models::{Candidate, Entry, EntryId, RankedNeighbour};
use crate::normalize::{NoopCleaner, Normalizer, TextCleaner};
use crate::rank;
use crate::store::{EntryStore, LangScope};

/// Retrieval tuning parameters.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Symmetric candidate window in days around the query date.
    pub window_days: i64,
    /// Maximum neighbours returned per query.
    pub top_k: usize,
    /// Language whose queries scan across all supported languages
    /// instead of a single pivot.
    pub hub_lang: String,
    /// Languages eligible for the cross-language scan.
    pub supported_langs: Vec<String>,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            window_days: 2,
            top_k: 5,
            hub_lang: "en".to_string(),
            supported_langs: ["hi", "ta", "te", "ml", "ur", "bn", "gu", "mr", "pa", "or"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Orchestrates retrieval calls against an [`EntryStore`].
///
/// All collaborators are injected at construction; the retriever holds no
/// process-wide state and is safe to share across tasks.
pub struct Retriever<S> {
    store: S,
    normalizer: Normalizer,
    cleaner: Box<dyn TextCleaner>,
    config: RetrieverConfig,
}

impl<S: EntryStore> Retriever<S> {
    pub fn new(store: S, normalizer: Normalizer, config: RetrieverConfig) -> Self {
        Self {
            store,
            normalizer,
            cleaner: Box::new(NoopCleaner),
            config,
        }
    }

    /// Replace the upstream translation-cleaning hook.
    pub fn with_cleaner(mut self, cleaner: Box<dyn TextCleaner>) -> Self {
        self.cleaner = cleaner;
        self
    }

    /// Retrieve the ranked nearest neighbours of `query_id` in
    /// `pivot_lang`, comparing the query's `model` translation against
    /// candidate content.
    ///
    /// An empty candidate window is a valid terminal state and returns an
    /// empty result; a missing query entry or translation is an error.
    pub async fn retrieve_neighbours(
        &self,
        query_id: EntryId,
        pivot_lang: &str,
        model: &str,
    ) -> Result<Vec<RankedNeighbour>> {
        let query = self
            .store
            .get_entry(query_id)
            .await?
            .ok_or(RetrieveError::EntryNotFound(query_id))?;

        let candidates = self.select_candidates(&query, pivot_lang).await?;
        debug!(query_id, pivot_lang, n = candidates.len(), "selected candidates");

        // Hub-language pivots translate through a language-agnostic model
        // row; every other pivot narrows to its own language.
        let lang_filter = if pivot_lang == self.config.hub_lang {
            None
        } else {
            Some(pivot_lang)
        };
        let translation = self
            .store
            .find_translation(query_id, model, lang_filter)
            .await?
            .ok_or_else(|| RetrieveError::TranslationNotFound {
                id: query_id,
                model: model.to_string(),
                lang: lang_filter.map(str::to_string),
            })?;

        let raw_query = translation.translated.unwrap_or_default();
        let cleaned = self.cleaner.clean(&raw_query, pivot_lang);
        let query_text = self.normalizer.normalize(&cleaned);

        // The store may hand entries back in a different order than the
        // candidate list; positional correspondence comes from this fetch.
        let ids: Vec<EntryId> = candidates.iter().map(|c| c.id).collect();
        let fetched = self.store.fetch_entries(&ids).await?;
        if fetched.is_empty() {
            return Ok(Vec::new());
        }

        let mut corpus = Vec::with_capacity(fetched.len());
        for entry in &fetched {
            let content = match &entry.content {
                Some(c) => c.as_str(),
                None => {
                    warn!(entry_id = entry.id, "candidate has no content, treating as empty");
                    ""
                }
            };
            corpus.push(self.normalizer.normalize(content));
        }

        let ranked = rank::rank(&query_text, &corpus)?;
        Ok(ranked
            .into_iter()
            .take(self.config.top_k)
            .map(|(idx, score)| RankedNeighbour {
                entry_id: fetched[idx].id,
                score,
            })
            .collect())
    }

    /// Candidate set for one query, with the query itself excluded.
    async fn select_candidates(
        &self,
        query: &Entry,
        pivot_lang: &str,
    ) -> Result<Vec<Candidate>> {
        let delta = Duration::days(self.config.window_days);
        let from = query.date - delta;
        let to = query.date + delta;

        let scope = if query.lang == self.config.hub_lang {
            LangScope::AnyOfExcept {
                allowed: &self.config.supported_langs,
                except: &self.config.hub_lang,
            }
        } else {
            LangScope::Exactly(pivot_lang)
        };

        let mut candidates = self.store.find_candidates(scope, from, to).await?;
        // A same-language pivot would otherwise surface the query itself.
        candidates.retain(|c| c.id != query.id);
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Translation;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    const MODEL: &str = "mm_all_iter1";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: EntryId, lang: &str, d: &str, content: Option<&str>) -> Entry {
        Entry {
            id,
            lang: lang.to_string(),
            date: date(d),
            content: content.map(str::to_string),
        }
    }

    fn translation(parent_id: EntryId, lang: &str, text: &str) -> Translation {
        Translation {
            parent_id,
            model: MODEL.to_string(),
            lang: lang.to_string(),
            translated: Some(text.to_string()),
        }
    }

    fn retriever(store: InMemoryStore) -> Retriever<InMemoryStore> {
        Retriever::new(store, Normalizer::english(), RetrieverConfig::default())
    }

    #[tokio::test]
    async fn missing_query_is_entry_not_found() {
        let r = retriever(InMemoryStore::new());
        let err = r.retrieve_neighbours(42, "en", MODEL).await.unwrap_err();
        assert!(matches!(err, RetrieveError::EntryNotFound(42)));
    }

    #[tokio::test]
    async fn missing_translation_is_translation_not_found() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "hi", "2020-05-10", Some("content")));
        store.insert_entry(entry(2, "en", "2020-05-10", Some("content")));
        let r = retriever(store);
        let err = r.retrieve_neighbours(1, "en", MODEL).await.unwrap_err();
        assert!(matches!(err, RetrieveError::TranslationNotFound { id: 1, .. }));
    }

    #[tokio::test]
    async fn empty_window_returns_empty_result() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "hi", "2020-05-10", Some("content")));
        store.insert_translation(translation(1, "en", "some english text"));
        let r = retriever(store);
        let neighbours = r.retrieve_neighbours(1, "en", MODEL).await.unwrap();
        assert!(neighbours.is_empty());
    }

    #[tokio::test]
    async fn window_is_inclusive_and_bounded() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "hi", "2020-05-10", Some("query content")));
        store.insert_translation(translation(1, "en", "festival celebration announcement"));
        // English candidates straddling the two-day window.
        store.insert_entry(entry(10, "en", "2020-05-07", Some("festival celebration")));
        store.insert_entry(entry(11, "en", "2020-05-08", Some("festival celebration")));
        store.insert_entry(entry(12, "en", "2020-05-10", Some("festival celebration")));
        store.insert_entry(entry(13, "en", "2020-05-12", Some("festival celebration")));
        store.insert_entry(entry(14, "en", "2020-05-13", Some("festival celebration")));
        let r = retriever(store);

        let neighbours = r.retrieve_neighbours(1, "en", MODEL).await.unwrap();
        let ids: Vec<EntryId> = neighbours.iter().map(|n| n.entry_id).collect();
        assert!(ids.contains(&11));
        assert!(ids.contains(&12));
        assert!(ids.contains(&13));
        assert!(!ids.contains(&10), "D-3 must be outside the window");
        assert!(!ids.contains(&14), "D+3 must be outside the window");
    }

    #[tokio::test]
    async fn truncates_to_min_of_top_k_and_candidate_count() {
        for count in [0usize, 3, 5, 10] {
            let store = InMemoryStore::new();
            store.insert_entry(entry(1, "hi", "2020-05-10", Some("query content")));
            store.insert_translation(translation(1, "en", "shared words"));
            for i in 0..count {
                store.insert_entry(entry(
                    100 + i as EntryId,
                    "en",
                    "2020-05-10",
                    Some("shared words here"),
                ));
            }
            let r = retriever(store);
            let neighbours = r.retrieve_neighbours(1, "en", MODEL).await.unwrap();
            assert_eq!(neighbours.len(), count.min(5), "count = {}", count);
        }
    }

    #[tokio::test]
    async fn same_language_pivot_excludes_query_itself() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "hi", "2020-05-10", Some("shared hindi words")));
        store.insert_entry(entry(2, "hi", "2020-05-10", Some("shared hindi words")));
        store.insert_entry(entry(3, "hi", "2020-05-11", Some("shared hindi words")));
        store.insert_translation(translation(1, "hi", "shared hindi words"));
        let r = retriever(store);

        let neighbours = r.retrieve_neighbours(1, "hi", MODEL).await.unwrap();
        let ids: Vec<EntryId> = neighbours.iter().map(|n| n.entry_id).collect();
        assert!(!ids.contains(&1), "query must never match itself");
        assert!(ids.contains(&2));
        assert!(ids.contains(&3));
    }

    #[tokio::test]
    async fn hub_language_query_scans_supported_languages() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "en", "2020-05-10", Some("english query")));
        store.insert_translation(translation(1, "en", "minister statement economy"));
        store.insert_entry(entry(2, "hi", "2020-05-10", Some("minister statement economy")));
        store.insert_entry(entry(3, "ta", "2020-05-11", Some("minister statement")));
        store.insert_entry(entry(4, "en", "2020-05-10", Some("minister statement economy")));
        store.insert_entry(entry(5, "fr", "2020-05-10", Some("minister statement economy")));
        let r = retriever(store);

        let neighbours = r.retrieve_neighbours(1, "en", MODEL).await.unwrap();
        let ids: Vec<EntryId> = neighbours.iter().map(|n| n.entry_id).collect();
        assert!(ids.contains(&2));
        assert!(ids.contains(&3));
        assert!(!ids.contains(&4), "hub-language entries are not candidates");
        assert!(!ids.contains(&5), "unsupported languages are not candidates");
    }

    #[tokio::test]
    async fn term_free_corpus_propagates_empty_vocabulary() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "hi", "2020-05-10", Some("query content")));
        store.insert_translation(translation(1, "en", "some english text"));
        // Candidates exist by count but normalize to nothing: punctuation
        // runs and stopword-only content.
        store.insert_entry(entry(2, "en", "2020-05-10", Some("!!! ???")));
        store.insert_entry(entry(3, "en", "2020-05-11", Some("the of and")));
        let r = retriever(store);

        let err = r.retrieve_neighbours(1, "en", MODEL).await.unwrap_err();
        assert!(matches!(err, RetrieveError::EmptyVocabulary));
    }

    #[tokio::test]
    async fn missing_content_participates_as_empty() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "hi", "2020-05-10", Some("query content")));
        store.insert_translation(translation(1, "en", "budget announcement"));
        store.insert_entry(entry(2, "en", "2020-05-10", Some("budget announcement today")));
        store.insert_entry(entry(3, "en", "2020-05-10", None));
        let r = retriever(store);

        let neighbours = r.retrieve_neighbours(1, "en", MODEL).await.unwrap();
        assert_eq!(neighbours.len(), 2);
        let absent = neighbours.iter().find(|n| n.entry_id == 3).unwrap();
        assert!(absent.score.abs() < 1e-12);
    }

    #[tokio::test]
    async fn results_sorted_descending_by_score() {
        let store = InMemoryStore::new();
        store.insert_entry(entry(1, "hi", "2020-05-10", Some("query content")));
        store.insert_translation(translation(1, "en", "quick brown fox"));
        store.insert_entry(entry(2, "en", "2020-05-10", Some("completely unrelated text")));
        store.insert_entry(entry(3, "en", "2020-05-10", Some("a quick brown fox")));
        store.insert_entry(entry(4, "en", "2020-05-10", Some("quick fox")));
        let r = retriever(store);

        let neighbours = r.retrieve_neighbours(1, "en", MODEL).await.unwrap();
        for pair in neighbours.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_ne!(neighbours[0].entry_id, 2, "unrelated text must not rank first");
    }
}

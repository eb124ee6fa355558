//! Storage abstraction for the retrieval engine.
//!
//! The [`EntryStore`] trait defines the read operations the retrieval
//! pipeline needs, enabling pluggable backends (SQLite in the `newslink`
//! application crate, in-memory for tests).
//!
//! The engine only ever reads; writes belong to the ingestion glue that
//! owns the concrete backend. Implementations must be `Send + Sync`.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Candidate, Entry, EntryId, Translation};

/// Language filter for candidate selection.
#[derive(Debug, Clone)]
pub enum LangScope<'a> {
    /// Entries whose language equals the given code.
    Exactly(&'a str),
    /// Entries whose language is in `allowed` and differs from `except`.
    AnyOfExcept {
        allowed: &'a [String],
        except: &'a str,
    },
}

impl LangScope<'_> {
    /// Whether an entry language passes this filter.
    pub fn matches(&self, lang: &str) -> bool {
        match self {
            LangScope::Exactly(l) => lang == *l,
            LangScope::AnyOfExcept { allowed, except } => {
                lang != *except && allowed.iter().any(|a| a == lang)
            }
        }
    }
}

/// Abstract entry/translation store consumed by the retrieval engine.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Look up one entry by id.
    async fn get_entry(&self, id: EntryId) -> Result<Option<Entry>>;

    /// Entries matching a language scope inside an inclusive date window,
    /// in store-native order.
    async fn find_candidates(
        &self,
        scope: LangScope<'_>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Candidate>>;

    /// Load full entries for a set of ids.
    ///
    /// Order is store-native and may differ from `ids`; callers derive
    /// positional correspondence from the returned sequence. Missing ids
    /// are silently absent.
    async fn fetch_entries(&self, ids: &[EntryId]) -> Result<Vec<Entry>>;

    /// Find a translation by parent entry and model, optionally narrowed
    /// to a target language. First match wins when several exist.
    async fn find_translation(
        &self,
        parent_id: EntryId,
        model: &str,
        lang: Option<&str>,
    ) -> Result<Option<Translation>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_matches_only_that_language() {
        let scope = LangScope::Exactly("hi");
        assert!(scope.matches("hi"));
        assert!(!scope.matches("en"));
        assert!(!scope.matches("ta"));
    }

    #[test]
    fn any_of_except_excludes_and_restricts() {
        let allowed = vec!["hi".to_string(), "ta".to_string(), "en".to_string()];
        let scope = LangScope::AnyOfExcept {
            allowed: &allowed,
            except: "en",
        };
        assert!(scope.matches("hi"));
        assert!(scope.matches("ta"));
        assert!(!scope.matches("en"));
        assert!(!scope.matches("fr"));
    }
}

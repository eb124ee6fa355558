//! Error types for the retrieval pipeline.

use thiserror::Error;

use crate::models::EntryId;

/// Failures surfaced by [`Retriever::retrieve_neighbours`](crate::retrieve::Retriever::retrieve_neighbours).
///
/// An empty candidate window is not an error: it produces an empty result.
/// Store-layer failures pass through unmodified; the orchestrator never
/// retries, since retrieval is idempotent and the caller can rerun the
/// whole call.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The query entry does not exist in the store.
    #[error("entry {0} not found")]
    EntryNotFound(EntryId),

    /// No translation row matched the query entry, model, and pivot.
    #[error("no translation of entry {id} for model '{model}' (lang {lang:?})")]
    TranslationNotFound {
        id: EntryId,
        model: String,
        lang: Option<String>,
    },

    /// The candidate corpus was non-empty by count but yielded no terms,
    /// so no TF-IDF model could be fit. A data-quality failure, not a
    /// transient one; do not retry.
    #[error("candidate corpus produced an empty vocabulary")]
    EmptyVocabulary,

    /// Underlying store failure, bubbled up unmodified.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RetrieveError>;

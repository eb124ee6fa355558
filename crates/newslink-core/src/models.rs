//! Core data models used throughout Newslink.
//!
//! These types represent the entries, translations, and ranked results
//! that flow through the retrieval pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// Identifier of a stored entry.
pub type EntryId = i64;

/// A stored text unit with language, publication date, and content.
///
/// Content may be absent; consumers coerce it to an empty string at the
/// point of use rather than rejecting the entry.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub lang: String,
    pub date: NaiveDate,
    pub content: Option<String>,
}

/// A derived translation of an entry, tagged by generating model and
/// target language. Several rows may exist per entry.
#[derive(Debug, Clone)]
pub struct Translation {
    pub parent_id: EntryId,
    pub model: String,
    pub lang: String,
    pub translated: Option<String>,
}

/// A candidate entry surfaced by language/date filtering, in store order.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: EntryId,
    pub lang: String,
}

/// One ranked retrieval result.
#[derive(Debug, Clone, Serialize)]
pub struct RankedNeighbour {
    pub entry_id: EntryId,
    pub score: f64,
}

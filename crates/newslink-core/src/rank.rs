//! TF-IDF similarity ranking.
//!
//! Fits a TF-IDF model on the candidate corpus only, projects the query
//! into that vocabulary, and scores each candidate by cosine similarity
//! against the query independently (no pairwise candidate matrix).
//!
//! Vocabulary comes from the candidates, so query terms absent from every
//! candidate carry no weight. That is a documented property of the scoring,
//! not a defect: scores are always relative to the current candidate set.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, RetrieveError};

/// TF-IDF model fit on one candidate corpus.
///
/// Smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, with L2-normalized
/// vectors. Fit fresh per retrieval call and never cached.
struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    fn fit(corpus: &[String]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();

        for doc in corpus {
            let mut seen: HashSet<usize> = HashSet::new();
            for term in doc.split_whitespace() {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term.to_string()).or_insert(next);
                if idx == df.len() {
                    df.push(0);
                }
                if seen.insert(idx) {
                    df[idx] += 1;
                }
            }
        }

        let n = corpus.len() as f64;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Term-count × IDF vector, L2-normalized. Terms outside the fitted
    /// vocabulary are ignored.
    fn transform(&self, text: &str) -> Vec<f64> {
        let mut vec = vec![0.0f64; self.vocabulary.len()];
        for term in text.split_whitespace() {
            if let Some(&idx) = self.vocabulary.get(term) {
                vec[idx] += 1.0;
            }
        }
        for (idx, v) in vec.iter_mut().enumerate() {
            *v *= self.idf[idx];
        }
        let norm = vec.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > f64::EPSILON {
            for v in vec.iter_mut() {
                *v /= norm;
            }
        }
        vec
    }
}

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude, so an all-empty
/// candidate scores 0 instead of producing NaN.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }

    dot / denom
}

/// Rank `candidates` against `query` by TF-IDF cosine similarity.
///
/// Returns `(candidate index, score)` pairs sorted descending by score;
/// equal scores keep candidate order. The output length always equals the
/// candidate count; empty candidates participate with a ~0 score.
///
/// An empty candidate list short-circuits to an empty result without
/// fitting a model. A non-empty list that yields no terms at all fails
/// with [`RetrieveError::EmptyVocabulary`].
pub fn rank(query: &str, candidates: &[String]) -> Result<Vec<(usize, f64)>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let model = TfidfModel::fit(candidates);
    if model.vocabulary.is_empty() {
        return Err(RetrieveError::EmptyVocabulary);
    }

    let query_vec = model.transform(query);
    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(i, text)| (i, cosine_similarity(&query_vec, &model.transform(text))))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    Ok(scored)
}

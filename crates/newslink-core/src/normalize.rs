//! Text normalization for TF-IDF vectorization.
//!
//! Turns raw entry text into a flat, space-joined stream of lowercased,
//! stopword-filtered, stemmed tokens. Each line is processed on its own,
//! then every surviving token lands in one output string; line boundaries
//! are deliberately flattened.
//!
//! # Pipeline (per line)
//!
//! 1. Remove the fixed ASCII punctuation set.
//! 2. Tokenize with the configured [`WordTokenizer`].
//! 3. Lowercase; drop English stopwords (NLTK list).
//! 4. Stem survivors (Porter-family English stemmer).
//! 5. Strip remaining non-word characters; drop empty tokens.

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};

/// ASCII punctuation removed before tokenization.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Pluggable word segmentation step.
///
/// The default splits on whitespace. Deployments comparing in languages
/// without whitespace word boundaries plug a subword segmenter in here;
/// the segmenter itself lives outside this crate.
pub trait WordTokenizer: Send + Sync {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

/// Whitespace word tokenizer, the default.
pub struct WhitespaceTokenizer;

impl WordTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }
}

/// Upstream cleaning hook applied to translated query text before
/// normalization. The translation pipeline owns the real implementation;
/// the default passes text through unchanged.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, raw: &str, lang: &str) -> String;
}

/// Pass-through [`TextCleaner`].
pub struct NoopCleaner;

impl TextCleaner for NoopCleaner {
    fn clean(&self, raw: &str, _lang: &str) -> String {
        raw.to_string()
    }
}

/// Stopword-filtering, stemming text normalizer.
///
/// Stopword filtering happens on the lowercased raw token; stemming only
/// on survivors. Running the normalizer on its own output is a no-op as
/// long as no stemmed token lands back in the stopword list.
pub struct Normalizer {
    stemmer: Stemmer,
    stopwords: HashSet<String>,
    tokenizer: Box<dyn WordTokenizer>,
}

impl Normalizer {
    /// English normalizer with the NLTK stopword list and whitespace
    /// tokenization.
    pub fn english() -> Self {
        Self::with_tokenizer(Box::new(WhitespaceTokenizer))
    }

    /// English normalizer with a custom tokenization step.
    pub fn with_tokenizer(tokenizer: Box<dyn WordTokenizer>) -> Self {
        let stopwords = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stopwords,
            tokenizer,
        }
    }

    /// Normalize raw text into a space-joined token stream.
    ///
    /// Empty input produces an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let mut processed: Vec<String> = Vec::new();
        for line in text.lines() {
            let stripped: String = line
                .chars()
                .filter(|c| !PUNCTUATION.contains(*c))
                .collect();
            for token in self.tokenizer.tokenize(&stripped) {
                let lowered = token.to_lowercase();
                if self.stopwords.contains(&lowered) {
                    continue;
                }
                let mut stemmed = self.stemmer.stem(&lowered).into_owned();
                stemmed.retain(|c| c.is_alphanumeric() || c == '_');
                if !stemmed.is_empty() {
                    processed.push(stemmed);
                }
            }
        }
        processed.join(" ")
    }
}

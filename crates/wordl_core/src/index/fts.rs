//! Field-aware full-text index.
//!
//! The `FtsIndex` provides token-based text search with support for:
//! - Tokenization (whitespace, punctuation splitting)
//! - Case-insensitive matching
//! - Field-scoped and unscoped lookups
//! - Prefix matching
//!
//! It stores postings only. Query evaluation lives in [`super::query`].

use crate::record::SearchField;
use crate::types::RecordId;
use std::collections::{HashMap, HashSet};

/// Configuration for the FTS tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Minimum token length to index.
    pub min_token_length: usize,
    /// Maximum token length to index.
    pub max_token_length: usize,
    /// Whether to perform case-insensitive matching.
    pub case_insensitive: bool,
    /// Additional characters to treat as separators.
    pub extra_separators: Vec<char>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_length: 1,
            max_token_length: 256,
            case_insensitive: true,
            extra_separators: vec![],
        }
    }
}

impl TokenizerConfig {
    /// Creates a new tokenizer configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets minimum token length.
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_token_length = len;
        self
    }

    /// Sets maximum token length.
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_token_length = len;
        self
    }

    /// Sets case sensitivity.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    /// Adds extra separator characters.
    #[must_use]
    pub fn with_separators(mut self, chars: &[char]) -> Self {
        self.extra_separators.extend_from_slice(chars);
        self
    }

    /// Splits text into normalized tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| {
            c.is_whitespace() || c.is_ascii_punctuation() || self.extra_separators.contains(&c)
        })
        .filter(|token| {
            let len = token.chars().count();
            len > 0 && len >= self.min_token_length && len <= self.max_token_length
        })
        .map(|token| self.normalize(token))
        .collect()
    }

    /// Normalizes a single token the way indexed tokens are normalized.
    pub fn normalize(&self, token: &str) -> String {
        if self.case_insensitive {
            token.to_lowercase()
        } else {
            token.to_string()
        }
    }
}

/// A (field, token) posting key.
type FieldToken = (String, String);

/// Full-text index over record fields.
///
/// `FtsIndex` keeps:
/// - Inverted index: token → record ids (any field)
/// - Field index: (field, token) → record ids
/// - Forward index: record id → postings (for replacement and removal)
#[derive(Default)]
pub struct FtsIndex {
    tokenizer: TokenizerConfig,
    inverted: HashMap<String, HashSet<RecordId>>,
    fielded: HashMap<FieldToken, HashSet<RecordId>>,
    forward: HashMap<RecordId, HashSet<FieldToken>>,
}

impl FtsIndex {
    /// Creates an empty index.
    pub fn new(tokenizer: TokenizerConfig) -> Self {
        Self {
            tokenizer,
            ..Self::default()
        }
    }

    /// Returns the tokenizer configuration.
    pub fn tokenizer(&self) -> &TokenizerConfig {
        &self.tokenizer
    }

    /// Returns the number of indexed records.
    pub fn record_count(&self) -> usize {
        self.forward.len()
    }

    /// Returns the number of unique tokens in the index.
    pub fn unique_token_count(&self) -> usize {
        self.inverted.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Clears the index.
    pub fn clear(&mut self) {
        self.inverted.clear();
        self.fielded.clear();
        self.forward.clear();
    }

    /// Indexes the fields of a record, replacing anything indexed before
    /// under the same id.
    pub fn index_fields(&mut self, id: RecordId, fields: &[SearchField]) {
        self.remove(id);

        let mut postings = HashSet::new();
        for field in fields {
            for token in self.tokenizer.tokenize(&field.text) {
                postings.insert((field.name.to_string(), token));
            }
        }

        for (field, token) in &postings {
            self.inverted.entry(token.clone()).or_default().insert(id);
            self.fielded
                .entry((field.clone(), token.clone()))
                .or_default()
                .insert(id);
        }

        self.forward.insert(id, postings);
    }

    /// Removes a record from the index. Returns whether it was indexed.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let Some(postings) = self.forward.remove(&id) else {
            return false;
        };

        for key in postings {
            if let Some(ids) = self.inverted.get_mut(&key.1) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.inverted.remove(&key.1);
                }
            }
            if let Some(ids) = self.fielded.get_mut(&key) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.fielded.remove(&key);
                }
            }
        }

        true
    }

    /// Returns records containing `token`, optionally restricted to `field`.
    ///
    /// `token` must already be normalized.
    pub fn lookup(&self, field: Option<&str>, token: &str) -> HashSet<RecordId> {
        let ids = match field {
            Some(field) => self.fielded.get(&(field.to_string(), token.to_string())),
            None => self.inverted.get(token),
        };
        ids.cloned().unwrap_or_default()
    }

    /// Returns records containing a token starting with `prefix`, optionally
    /// restricted to `field`.
    pub fn lookup_prefix(&self, field: Option<&str>, prefix: &str) -> HashSet<RecordId> {
        let mut results = HashSet::new();
        match field {
            Some(field) => {
                for ((f, token), ids) in &self.fielded {
                    if f == field && token.starts_with(prefix) {
                        results.extend(ids.iter().copied());
                    }
                }
            }
            None => {
                for (token, ids) in &self.inverted {
                    if token.starts_with(prefix) {
                        results.extend(ids.iter().copied());
                    }
                }
            }
        }
        results
    }

    /// Returns every indexed record id.
    pub fn all_ids(&self) -> HashSet<RecordId> {
        self.forward.keys().copied().collect()
    }

    /// Returns the count of records containing a token in any field.
    pub fn token_frequency(&self, token: &str) -> usize {
        let normalized = self.tokenizer.normalize(token);
        self.inverted.get(&normalized).map_or(0, HashSet::len)
    }
}

impl std::fmt::Debug for FtsIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtsIndex")
            .field("record_count", &self.record_count())
            .field("unique_tokens", &self.unique_token_count())
            .finish_non_exhaustive()
    }
}

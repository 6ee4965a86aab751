//! Dictionary word.

use super::{push_text, Record, SearchField};
use crate::types::RecordId;
use serde::{Deserialize, Serialize};

/// A dictionary word that thumbnails can point at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInfo {
    /// Record id.
    pub id: Option<RecordId>,
    /// The word.
    pub word: Option<String>,
}

impl WordInfo {
    /// Creates an unsaved word.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            id: None,
            word: Some(word.into()),
        }
    }
}

impl Record for WordInfo {
    const COLLECTION: &'static str = "word-infos";
    const TABLE: &'static str = "word_info";
    const ENTITY_NAME: &'static str = "wordInfo";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<SearchField> {
        let mut fields = Vec::with_capacity(1);
        push_text(&mut fields, "word", &self.word);
        fields
    }
}

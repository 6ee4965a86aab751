//! Category/word pairing.

use super::{push_text, Record, SearchField};
use crate::types::RecordId;
use serde::{Deserialize, Serialize};

/// A word filed under a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWord {
    /// Record id.
    pub id: Option<RecordId>,
    /// Category name.
    pub category: Option<String>,
    /// The word itself.
    pub word: Option<String>,
}

impl CategoryWord {
    /// Creates an unsaved category word.
    pub fn new(category: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            id: None,
            category: Some(category.into()),
            word: Some(word.into()),
        }
    }
}

impl Record for CategoryWord {
    const COLLECTION: &'static str = "category-words";
    const TABLE: &'static str = "category_word";
    const ENTITY_NAME: &'static str = "categoryWord";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<SearchField> {
        let mut fields = Vec::with_capacity(2);
        push_text(&mut fields, "category", &self.category);
        push_text(&mut fields, "word", &self.word);
        fields
    }
}

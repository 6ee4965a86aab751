//! Record abstraction and the concrete admin record types.
//!
//! The sync layer is schema-agnostic: it only needs a record's id and the
//! text it should be searchable by. Each concrete type plugs in through the
//! [`Record`] trait.

mod category_word;
mod feedback;
mod user_thumb_info;
mod word_info;
mod word_thumb_info;

pub use category_word::CategoryWord;
pub use feedback::Feedback;
pub use user_thumb_info::UserThumbInfo;
pub use word_info::WordInfo;
pub use word_thumb_info::WordThumbInfo;

use crate::types::{RecordId, RecordRef};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A named, searchable field value extracted from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    /// Field name as exposed in JSON.
    pub name: &'static str,
    /// Text to index under that name.
    pub text: String,
}

impl SearchField {
    /// Creates a search field.
    pub fn new(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
        }
    }
}

/// A persistable, indexable record type.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// URL collection segment, e.g. `category-words`.
    const COLLECTION: &'static str;

    /// Relational table name.
    const TABLE: &'static str;

    /// Entity name used in client alerts, e.g. `categoryWord`.
    const ENTITY_NAME: &'static str;

    /// Returns the record id, if persisted.
    fn id(&self) -> Option<RecordId>;

    /// Assigns the record id.
    fn set_id(&mut self, id: RecordId);

    /// Returns the fields the search index should know about.
    fn search_fields(&self) -> Vec<SearchField>;

    /// Returns this record with the given id.
    #[must_use]
    fn with_id(mut self, id: RecordId) -> Self {
        self.set_id(id);
        self
    }
}

/// Pushes an optional text field.
pub(crate) fn push_text(fields: &mut Vec<SearchField>, name: &'static str, value: &Option<String>) {
    if let Some(text) = value {
        fields.push(SearchField::new(name, text.as_str()));
    }
}

/// Pushes an optional integer field.
pub(crate) fn push_number(fields: &mut Vec<SearchField>, name: &'static str, value: Option<i32>) {
    if let Some(n) = value {
        fields.push(SearchField::new(name, n.to_string()));
    }
}

/// Pushes an optional reference as its id.
pub(crate) fn push_ref(fields: &mut Vec<SearchField>, name: &'static str, value: Option<RecordRef>) {
    if let Some(r) = value {
        fields.push(SearchField::new(name, r.id.to_string()));
    }
}

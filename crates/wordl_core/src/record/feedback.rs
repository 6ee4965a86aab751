//! User feedback.

use super::{push_ref, push_text, Record, SearchField};
use crate::types::{RecordId, RecordRef};
use serde::{Deserialize, Serialize};

/// Feedback left by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Record id.
    pub id: Option<RecordId>,
    /// Feedback category, kept as the client sent it.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Message body.
    pub content: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Author.
    pub creator: Option<RecordRef>,
}

impl Record for Feedback {
    const COLLECTION: &'static str = "feedbacks";
    const TABLE: &'static str = "feedback";
    const ENTITY_NAME: &'static str = "feedback";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<SearchField> {
        let mut fields = Vec::with_capacity(4);
        push_text(&mut fields, "type", &self.kind);
        push_text(&mut fields, "content", &self.content);
        push_text(&mut fields, "phone", &self.phone);
        push_ref(&mut fields, "creator", self.creator);
        fields
    }
}

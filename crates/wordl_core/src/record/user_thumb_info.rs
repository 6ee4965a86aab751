//! Thumbnail a user clicked.

use super::{push_number, push_ref, push_text, Record, SearchField};
use crate::types::{RecordId, RecordRef};
use serde::{Deserialize, Serialize};

/// A thumbnail as seen by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserThumbInfo {
    /// Record id.
    pub id: Option<RecordId>,
    /// The word the thumbnail illustrates.
    pub word: Option<String>,
    /// Thumbs-up given by the user.
    pub self_num: Option<i32>,
    /// Total thumbs-up.
    pub thumb_num: Option<i32>,
    /// Picture location.
    pub pic_url: Option<String>,
    /// Thumbnail lookup id.
    pub thumb_lid: Option<String>,
    /// User who clicked.
    pub clicker: Option<RecordRef>,
}

impl Record for UserThumbInfo {
    const COLLECTION: &'static str = "user-thumb-infos";
    const TABLE: &'static str = "user_thumb_info";
    const ENTITY_NAME: &'static str = "userThumbInfo";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<SearchField> {
        let mut fields = Vec::with_capacity(6);
        push_text(&mut fields, "word", &self.word);
        push_number(&mut fields, "selfNum", self.self_num);
        push_number(&mut fields, "thumbNum", self.thumb_num);
        push_text(&mut fields, "picUrl", &self.pic_url);
        push_text(&mut fields, "thumbLid", &self.thumb_lid);
        push_ref(&mut fields, "clicker", self.clicker);
        fields
    }
}
